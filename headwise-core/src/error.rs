//! Error types for headwise.
//!
//! Only genuinely malformed structured input is an error here. Trust and
//! validation decisions around client addresses degrade to a fallback
//! instead of failing, so most of the resolver never produces one of these.

use thiserror::Error;

/// Result type alias for headwise operations.
pub type Result<T> = std::result::Result<T, HeadwiseError>;

/// Unified error type for headwise operations.
///
/// # Example
///
/// ```
/// use headwise_core::error::{HeadwiseError, Result};
///
/// fn require_quality(raw: &str) -> Result<f64> {
///     raw.parse().map_err(|_| HeadwiseError::InvalidQuality(raw.to_string()))
/// }
///
/// assert!(require_quality("0.5").is_ok());
/// assert!(require_quality("high").is_err());
/// ```
#[derive(Debug, Error, Clone, PartialEq)]
pub enum HeadwiseError {
    /// A `q` parameter that is not a number in `[0, 1]`.
    #[error("Invalid quality value: {0:?}")]
    InvalidQuality(String),

    /// Invalid IP address format or value.
    #[error("Invalid IP address: {0}")]
    InvalidIp(String),

    /// Configuration error (missing or invalid values).
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Invalid HTTP header value.
    #[error("Invalid header: {0}")]
    InvalidHeader(String),
}

impl HeadwiseError {
    /// Returns the appropriate HTTP status code for this error.
    pub fn status_code(&self) -> hyper::StatusCode {
        use hyper::StatusCode;

        match self {
            Self::InvalidQuality(_) => StatusCode::BAD_REQUEST,
            Self::InvalidIp(_) => StatusCode::BAD_REQUEST,
            Self::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::InvalidHeader(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Returns a user-friendly error message suitable for HTTP responses.
    ///
    /// The message never echoes the offending client input.
    pub fn user_message(&self) -> &str {
        match self {
            Self::InvalidQuality(_) => "Malformed quality value in request header",
            Self::InvalidIp(_) => "Invalid request",
            Self::ConfigError(_) => "Internal server error",
            Self::InvalidHeader(_) => "Bad request",
        }
    }

    /// Returns true if this error should be logged at error level.
    ///
    /// Malformed client headers are expected noise and only deserve
    /// debug/warn level logging.
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::ConfigError(_))
    }
}
