//! Error payloads reported by the session manager
//!
//! These are values forwarded to observers, not failures of this crate.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Session-level failure reported by the ad-insertion session
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionErrorCode {
    #[error("session request timed out")]
    Timeout,

    #[error("session host could not be resolved")]
    Unresolvable,

    #[error("session response was malformed")]
    MalformedResponse,

    #[error("session is not ad-enabled")]
    NotAdEnabled,

    #[error("unknown session error code {0}")]
    Unknown(i32),
}

impl SessionErrorCode {
    /// Map a numeric SDK code to a known variant
    pub fn from_code(code: i32) -> Self {
        match code {
            -1 => SessionErrorCode::Timeout,
            -2 => SessionErrorCode::Unresolvable,
            -3 => SessionErrorCode::MalformedResponse,
            -4 => SessionErrorCode::NotAdEnabled,
            other => SessionErrorCode::Unknown(other),
        }
    }

    /// Numeric SDK code
    pub fn code(&self) -> i32 {
        match self {
            SessionErrorCode::Timeout => -1,
            SessionErrorCode::Unresolvable => -2,
            SessionErrorCode::MalformedResponse => -3,
            SessionErrorCode::NotAdEnabled => -4,
            SessionErrorCode::Unknown(code) => *code,
        }
    }
}

/// A tracking beacon that could not be delivered
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("tracking beacon '{event}' failed for {url}")]
pub struct TrackingError {
    /// Tracking event name (e.g. "impression", "firstQuartile")
    pub event: String,
    /// Beacon URL that failed
    pub url: String,
    /// HTTP status, if a response was received
    pub status: Option<u16>,
}

impl TrackingError {
    pub fn new(event: impl Into<String>, url: impl Into<String>, status: Option<u16>) -> Self {
        Self {
            event: event.into(),
            url: url.into(),
            status,
        }
    }
}
