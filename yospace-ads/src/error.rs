use thiserror::Error;

/// Errors that can occur while configuring the ad handler
///
/// Event handling itself never fails; these only surface when building a
/// [`HandlerConfig`](crate::config::HandlerConfig) from external input.
#[derive(Error, Debug)]
pub enum AdsError {
    /// Environment variable holds a value we do not understand
    #[error("Invalid value {value:?} for {var}")]
    InvalidEnv { var: &'static str, value: String },

    /// Observer failure policy name is neither `isolate` nor `propagate`
    #[error("Unknown observer failure policy {0:?}")]
    InvalidPolicy(String),

    /// JSON configuration could not be decoded
    #[error("Invalid handler configuration: {0}")]
    InvalidConfig(#[from] serde_json::Error),
}

/// Result type for yospace-ads operations
pub type Result<T> = std::result::Result<T, AdsError>;
