//! Error types for the transfer workspace
//!
//! This module defines all error types used throughout the crate.

use thiserror::Error;

/// Result type alias for transfer operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration errors (missing or conflicting inputs)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed identifiers (import ids, job names, self links)
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// Remote object not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rate limiting errors (HTTP 429)
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// Authentication errors
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Non-success API response
    #[error("API error ({code}): {message}")]
    Api {
        /// HTTP status code
        code: u16,
        /// Message extracted from the error body
        message: String,
    },

    /// Transport-level HTTP errors (connect, timeout, body read)
    #[error("HTTP error: {0}")]
    Http(String),

    /// The retry window closed before the operation succeeded
    #[error("{operation} did not succeed after {attempts} attempt(s): {source}")]
    RetryExhausted {
        /// Operation name
        operation: String,
        /// Number of attempts made
        attempts: u32,
        /// The last error observed
        #[source]
        source: Box<Error>,
    },

    /// State store-related errors
    #[error("State store error: {0}")]
    StateStore(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an invalid identifier error
    pub fn invalid_identifier(msg: impl Into<String>) -> Self {
        Self::InvalidIdentifier(msg.into())
    }

    /// Create a "not found" error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a rate limit error
    pub fn rate_limited(msg: impl Into<String>) -> Self {
        Self::RateLimited(msg.into())
    }

    /// Create an authentication error
    pub fn auth(msg: impl Into<String>) -> Self {
        Self::Authentication(msg.into())
    }

    /// Create an API error from a status code and message
    pub fn api(code: u16, message: impl Into<String>) -> Self {
        Self::Api {
            code,
            message: message.into(),
        }
    }

    /// Create an HTTP transport error
    pub fn http(msg: impl Into<String>) -> Self {
        Self::Http(msg.into())
    }

    /// Create a state store error
    pub fn state_store(msg: impl Into<String>) -> Self {
        Self::StateStore(msg.into())
    }

    /// Whether the remote side reported the object as absent
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound(_) => true,
            Self::Api { code, .. } => *code == 404,
            _ => false,
        }
    }

    /// Whether retrying the same call may succeed
    ///
    /// Rate limiting, server-side 5xx (except 501) and transport failures
    /// are transient. Everything else is final.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::RateLimited(_) | Self::Http(_) => true,
            Self::Api { code, .. } => matches!(*code, 408 | 429 | 500 | 502 | 503 | 504),
            _ => false,
        }
    }
}

/// Helper for converting anyhow::Error to our Error type
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_classification() {
        assert!(Error::not_found("job").is_not_found());
        assert!(Error::api(404, "gone").is_not_found());
        assert!(!Error::api(400, "bad").is_not_found());
        assert!(!Error::config("x").is_not_found());
    }

    #[test]
    fn test_transient_classification() {
        assert!(Error::rate_limited("slow down").is_transient());
        assert!(Error::http("connection reset").is_transient());
        assert!(Error::api(503, "unavailable").is_transient());
        assert!(Error::api(429, "quota").is_transient());
        assert!(!Error::api(501, "not implemented").is_transient());
        assert!(!Error::api(400, "bad request").is_transient());
        assert!(!Error::auth("denied").is_transient());
        assert!(!Error::not_found("job").is_transient());
    }

    #[test]
    fn test_retry_exhausted_keeps_source() {
        let err = Error::RetryExhausted {
            operation: "delete transfer job".to_string(),
            attempts: 3,
            source: Box::new(Error::api(503, "backend unavailable")),
        };
        let msg = err.to_string();
        assert!(msg.contains("delete transfer job"));
        assert!(msg.contains("3 attempt(s)"));
        assert!(msg.contains("backend unavailable"));
        assert!(!err.is_transient());
    }
}
