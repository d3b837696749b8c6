//! User-facing notices: the toast layer, reduced to data the front end prints.

use std::fmt;

use serde::Serialize;
use strum::{Display, EnumString};
use xeriwo_sdk::{ErrorCode, XeriwoError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Success,
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: Level,
    pub text: String,
}

impl Notice {
    pub fn new(level: Level, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self::new(Level::Success, text)
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self::new(Level::Info, text)
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self::new(Level::Warning, text)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(Level::Error, text)
    }

    /// The fixed string for each failure kind, used where a view has no
    /// more specific wording of its own.
    pub fn for_error(err: &XeriwoError) -> Self {
        let text = match err.code {
            ErrorCode::Network => "Network error. Check your connection and try again.",
            ErrorCode::Unauthorized => "🔒 Please login to continue",
            ErrorCode::Unverified => "📧 Please verify your email to continue",
            ErrorCode::NotFound => "❌ Not found",
            ErrorCode::QuotaExceeded => "⏱️ Download limit reached. Please wait and try again.",
            ErrorCode::Server | ErrorCode::Decode => "❌ Something went wrong. Please try again.",
            ErrorCode::Validation => return Self::error(err.message.clone()),
        };
        Self::error(text)
    }

    /// A failed call as one notice: the backend's own message when it sent
    /// one, the kind's fixed string when the request never got a usable
    /// answer, else the view's `fallback`.
    pub fn from_failure(err: &XeriwoError, fallback: &str) -> Self {
        if let Some(message) = err.server_message() {
            return Self::error(message);
        }
        match err.code {
            ErrorCode::Network | ErrorCode::Decode | ErrorCode::Validation => Self::for_error(err),
            _ => Self::error(fallback),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.level, self.text)
    }
}

/// Collects notices raised while a view handles one user action.
#[derive(Debug, Default)]
pub struct Notices {
    items: Vec<Notice>,
}

impl Notices {
    pub fn push(&mut self, notice: Notice) {
        match notice.level {
            Level::Error | Level::Warning => tracing::debug!("notice: {}", notice),
            _ => tracing::trace!("notice: {}", notice),
        }
        self.items.push(notice);
    }

    /// Hand over everything collected so far.
    pub fn drain(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.items)
    }

    pub fn last(&self) -> Option<&Notice> {
        self.items.last()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
