use serde::{Deserialize, Serialize};

/// Usage within one quota period.
///
/// `remaining` is never trusted from the wire: it is always re-derived as
/// `max(limit - used, 0)` so what the user sees stays consistent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawQuotaPeriod")]
pub struct QuotaPeriod {
    pub used: u32,
    pub limit: u32,
    pub remaining: u32,
}

#[derive(Deserialize)]
struct RawQuotaPeriod {
    #[serde(default)]
    used: u32,
    #[serde(default)]
    limit: u32,
}

impl From<RawQuotaPeriod> for QuotaPeriod {
    fn from(raw: RawQuotaPeriod) -> Self {
        Self::new(raw.used, raw.limit)
    }
}

impl QuotaPeriod {
    pub fn new(used: u32, limit: u32) -> Self {
        Self {
            used,
            limit,
            remaining: limit.saturating_sub(used),
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }

    /// Share of the period already used, 0-100.
    pub fn percent_used(&self) -> u32 {
        if self.limit == 0 {
            return 100;
        }
        ((self.used as u64 * 100) / self.limit as u64).min(100) as u32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Subscription {
    #[default]
    Free,
    Premium,
}

impl Subscription {
    pub fn as_str(&self) -> &'static str {
        match self {
            Subscription::Free => "free",
            Subscription::Premium => "premium",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Subscription::Free => "Free",
            Subscription::Premium => "Premium",
        }
    }
}

/// Per-period limits as carried on download responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotaLimits {
    pub daily: QuotaPeriod,
    pub monthly: QuotaPeriod,
}

/// The authoritative quota record from `GET /chatbot/stats`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadQuota {
    pub daily: QuotaPeriod,
    pub monthly: QuotaPeriod,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub subscription: Subscription,
}

impl DownloadQuota {
    pub fn limits(&self) -> QuotaLimits {
        QuotaLimits {
            daily: self.daily,
            monthly: self.monthly,
        }
    }
}
