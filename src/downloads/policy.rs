//! How a download attempt's result turns into what the user is told.
//! Shared by the home view, the products view and the assistant widget.

use serde_json::Value;
use xeriwo_sdk::{DownloadGrant, ErrorCode, QuotaLimits, QuotaPeriod, Result, XeriwoError};

use crate::notify::Notice;

pub const LOGIN_TO_DOWNLOAD: &str = "🔒 Please login to download products";
pub const VERIFY_TO_DOWNLOAD: &str = "📧 Please verify your email to download products";
pub const PRODUCT_NOT_FOUND: &str = "❌ Product not found";
pub const DOWNLOAD_FAILED: &str = "❌ Download failed. Please try again.";
pub const LIMIT_REACHED: &str = "⏱️ Download limit reached. Please wait and try again.";

/// Which period ran out. Daily is checked first and wins the message even
/// when the monthly period is also spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuotaExhaustion {
    Daily(QuotaPeriod),
    Monthly(QuotaPeriod),
}

impl QuotaExhaustion {
    pub fn from_limits(limits: &QuotaLimits) -> Option<Self> {
        if limits.daily.remaining == 0 {
            Some(Self::Daily(limits.daily))
        } else if limits.monthly.remaining == 0 {
            Some(Self::Monthly(limits.monthly))
        } else {
            None
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::Daily(p) => format!("📅 Daily limit reached! Used {}/{}. Try tomorrow!", p.used, p.limit),
            Self::Monthly(p) => format!("📊 Monthly limit reached! Used {}/{}.", p.used, p.limit),
        }
    }
}

/// Headline for a rejected attempt: the spent period when the limits name
/// one, else the generic limit message.
pub fn limit_message(limits: Option<&QuotaLimits>) -> String {
    limits
        .and_then(QuotaExhaustion::from_limits)
        .map(|e| e.message())
        .unwrap_or_else(|| LIMIT_REACHED.to_string())
}

#[derive(Debug, Clone, PartialEq)]
pub enum DownloadOutcome {
    Started(DownloadGrant),
    /// No session, or the backend answered 401
    LoginRequired,
    QuotaExceeded {
        limits: Option<QuotaLimits>,
        message: Option<String>,
    },
    Unverified,
    NotFound,
    Failed {
        message: Option<String>,
    },
    /// The backend answered without `success: true`
    Declined,
    /// An attempt on the same product is still in flight
    Busy,
}

/// Read `limits` out of an error body, if it has a usable one.
pub fn limits_from_payload(payload: Option<&Value>) -> Option<QuotaLimits> {
    let limits = payload?.get("limits")?;
    serde_json::from_value(limits.clone()).ok()
}

pub fn classify(result: Result<Option<DownloadGrant>>) -> DownloadOutcome {
    match result {
        Ok(Some(grant)) => DownloadOutcome::Started(grant),
        Ok(None) => DownloadOutcome::Declined,
        Err(err) => classify_error(&err),
    }
}

pub fn classify_error(err: &XeriwoError) -> DownloadOutcome {
    if err.is_quota_rejection() {
        return DownloadOutcome::QuotaExceeded {
            limits: limits_from_payload(err.payload.as_ref()),
            message: err.server_message().map(String::from),
        };
    }
    match err.code {
        ErrorCode::Unauthorized => DownloadOutcome::LoginRequired,
        ErrorCode::Unverified => DownloadOutcome::Unverified,
        ErrorCode::NotFound => DownloadOutcome::NotFound,
        _ => DownloadOutcome::Failed {
            message: err.server_message().map(String::from),
        },
    }
}

impl DownloadOutcome {
    pub fn is_started(&self) -> bool {
        matches!(self, DownloadOutcome::Started(_))
    }

    /// Notice for the page surfaces (home and products).
    pub fn notice(&self) -> Option<Notice> {
        let notice = match self {
            DownloadOutcome::Started(grant) if grant.is_redownload => Notice::info(&grant.message),
            DownloadOutcome::Started(grant) => Notice::success(&grant.message),
            DownloadOutcome::LoginRequired => Notice::error(LOGIN_TO_DOWNLOAD),
            DownloadOutcome::QuotaExceeded { limits, .. } => {
                Notice::error(limit_message(limits.as_ref()))
            }
            DownloadOutcome::Unverified => Notice::error(VERIFY_TO_DOWNLOAD),
            DownloadOutcome::NotFound => Notice::error(PRODUCT_NOT_FOUND),
            DownloadOutcome::Failed { .. } => Notice::error(DOWNLOAD_FAILED),
            DownloadOutcome::Declined | DownloadOutcome::Busy => return None,
        };
        Some(notice)
    }
}
