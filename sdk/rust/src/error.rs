//! Error types for the Xeriwo SDK

use serde_json::Value;
use thiserror::Error;

/// Error codes for Xeriwo API failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Request never produced an HTTP response (DNS, connect, timeout)
    Network,
    /// 401: missing or rejected session
    Unauthorized,
    /// 403: account exists but email is not verified
    Unverified,
    /// 404: resource missing or disabled
    NotFound,
    /// 429: download quota exhausted
    QuotaExceeded,
    /// Any other non-2xx status
    Server,
    /// 2xx response whose body was not the expected JSON
    Decode,
    /// Client-side input checks, never sent
    Validation,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Network => write!(f, "NETWORK_ERROR"),
            Self::Unauthorized => write!(f, "UNAUTHORIZED"),
            Self::Unverified => write!(f, "UNVERIFIED"),
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::QuotaExceeded => write!(f, "QUOTA_EXCEEDED"),
            Self::Server => write!(f, "SERVER_ERROR"),
            Self::Decode => write!(f, "DECODE_ERROR"),
            Self::Validation => write!(f, "VALIDATION_ERROR"),
        }
    }
}

/// Xeriwo SDK error
#[derive(Debug, Error)]
#[error("{message} (code: {code})")]
pub struct XeriwoError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable message, the backend's own `message` when it sent one
    pub message: String,
    /// HTTP status code (for API errors)
    pub status_code: Option<u16>,
    /// Raw JSON error body, kept so callers can read `limits` and friends
    pub payload: Option<Value>,
}

impl XeriwoError {
    /// Create a new error
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            status_code: None,
            payload: None,
        }
    }

    /// Build an error from a non-2xx response.
    ///
    /// `message` falls back to the reason phrase when the body has none.
    pub fn from_response(status: u16, reason: Option<&str>, payload: Option<Value>) -> Self {
        let message = payload
            .as_ref()
            .and_then(|p| p.get("message"))
            .and_then(Value::as_str)
            .map(String::from)
            .or_else(|| reason.map(String::from))
            .unwrap_or_else(|| format!("HTTP {}", status));

        Self {
            code: map_status_to_error_code(status),
            message,
            status_code: Some(status),
            payload,
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Validation, message)
    }

    /// Create a network error
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Network, message)
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Decode, message)
    }

    /// Whether the backend flagged this as a quota rejection, either by
    /// status or by `limitReached: true` in the body.
    pub fn is_quota_rejection(&self) -> bool {
        self.code == ErrorCode::QuotaExceeded
            || self
                .payload
                .as_ref()
                .and_then(|p| p.get("limitReached"))
                .and_then(Value::as_bool)
                .unwrap_or(false)
    }

    /// The backend's `message` field, if the error body carried one.
    pub fn server_message(&self) -> Option<&str> {
        self.payload
            .as_ref()
            .and_then(|p| p.get("message"))
            .and_then(Value::as_str)
    }
}

impl From<reqwest::Error> for XeriwoError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return Self::decode(err.to_string());
        }
        Self::network(err.to_string())
    }
}

/// Result type for Xeriwo operations
pub type Result<T> = std::result::Result<T, XeriwoError>;

/// Map HTTP status code to error code
pub fn map_status_to_error_code(status: u16) -> ErrorCode {
    match status {
        401 => ErrorCode::Unauthorized,
        403 => ErrorCode::Unverified,
        404 => ErrorCode::NotFound,
        429 => ErrorCode::QuotaExceeded,
        _ => ErrorCode::Server,
    }
}
