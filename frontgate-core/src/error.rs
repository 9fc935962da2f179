//! Error types for FrontGate.
//!
//! Every per-request failure is represented by [`FrontGateError`] and turned
//! into an HTTP status by the request pipeline. Only startup failures
//! (binding the listening socket) are fatal to the process.

use thiserror::Error;

/// Result type alias for FrontGate operations.
pub type Result<T> = std::result::Result<T, FrontGateError>;

/// Unified error type for FrontGate operations.
///
/// # Example
///
/// ```
/// use frontgate_core::error::{FrontGateError, Result};
///
/// fn endpoint(name: &str) -> Result<&'static str> {
///     match name {
///         "health" => Ok("health"),
///         other => Err(FrontGateError::RouteNotFound(other.into())),
///     }
/// }
///
/// assert!(endpoint("nope").is_err());
/// ```
#[derive(Debug, Error)]
pub enum FrontGateError {
    /// Client exceeded its request quota for the current window.
    #[error("Rate limit exceeded for client: {0}")]
    RateLimitExceeded(String),

    /// `/api/<name>` did not match any known endpoint.
    #[error("API endpoint not found: {0}")]
    RouteNotFound(String),

    /// Path under `/api/` that does not have the `api/<endpoint>` shape.
    #[error("Invalid API path: {0}")]
    InvalidApiPath(String),

    /// Static file missing or unreadable.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Unexpected failure while composing a response.
    #[error("Handler failure: {0}")]
    HandlerFailure(String),

    /// JSON encoding failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Gzip encoding failed.
    #[error("Compression error: {0}")]
    Compression(String),

    /// Listening port already bound by another process.
    #[error("Port {0} is already in use")]
    PortInUse(u16),

    /// Any other failure to bind the listening socket.
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        /// Address we tried to bind.
        addr: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Configuration error (missing or invalid values).
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl FrontGateError {
    /// Returns the HTTP status code sent to the client for this error.
    pub fn status_code(&self) -> hyper::StatusCode {
        use hyper::StatusCode;

        match self {
            Self::RateLimitExceeded(_) => StatusCode::TOO_MANY_REQUESTS,
            Self::RouteNotFound(_) | Self::InvalidApiPath(_) | Self::FileNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            Self::HandlerFailure(_)
            | Self::Serialization(_)
            | Self::Compression(_)
            | Self::PortInUse(_)
            | Self::Bind { .. }
            | Self::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the message placed in the response body.
    ///
    /// API not-found errors name the endpoint, and handler failures carry
    /// their textual description.
    pub fn user_message(&self) -> String {
        match self {
            Self::RateLimitExceeded(_) => "Rate limit exceeded".to_string(),
            Self::RouteNotFound(endpoint) => format!("API endpoint not found: {endpoint}"),
            Self::InvalidApiPath(_) => "Invalid API path".to_string(),
            Self::FileNotFound(_) => "File not found".to_string(),
            Self::HandlerFailure(msg) | Self::Compression(msg) => msg.clone(),
            Self::Serialization(err) => err.to_string(),
            Self::PortInUse(_) | Self::Bind { .. } | Self::ConfigError(_) => {
                "Internal server error".to_string()
            }
        }
    }

    /// Returns true if this error should be logged at error level.
    ///
    /// Not-found and rate-limit errors are expected traffic and go to warn.
    pub fn is_server_error(&self) -> bool {
        self.status_code().is_server_error()
    }
}
