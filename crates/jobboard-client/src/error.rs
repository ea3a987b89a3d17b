//! Error types for the jobboard client

use std::time::Duration;

use thiserror::Error;

/// Errors that can occur while talking to the job-board backend
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Origin cannot carry an `/api/...` path
    #[error("Invalid origin: {0}")]
    InvalidOrigin(String),

    /// Request could not be built from the given arguments
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Request timeout
    #[error("Request timed out after {timeout:?}")]
    Timeout {
        /// Per-attempt timeout that was exceeded
        timeout: Duration,
    },

    /// API returned an error status
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body
        message: String,
    },

    /// Item lookup returned 404
    #[error("Item not found")]
    NotFound,

    /// Backend answered with an explicit `success: false`
    #[error("{0}")]
    Unsuccessful(String),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Configuration file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be parsed
    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),
}

impl ClientError {
    /// Check if another attempt could succeed
    ///
    /// A 404 on an item lookup and anything wrong with the request itself
    /// are definitive.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        !matches!(
            self,
            ClientError::NotFound
                | ClientError::Url(_)
                | ClientError::InvalidOrigin(_)
                | ClientError::InvalidRequest(_)
                | ClientError::Io(_)
                | ClientError::Config(_)
        )
    }
}

/// Result type for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_is_definitive() {
        assert!(!ClientError::NotFound.is_retryable());
        assert_eq!(ClientError::NotFound.to_string(), "Item not found");
    }

    #[test]
    fn test_transient_errors_are_retryable() {
        let api = ClientError::Api {
            status: 500,
            message: "boom".into(),
        };
        assert!(api.is_retryable());
        assert!(
            ClientError::Timeout {
                timeout: Duration::from_secs(1)
            }
            .is_retryable()
        );
        assert!(ClientError::Unsuccessful("nope".into()).is_retryable());
    }

    #[test]
    fn test_unsuccessful_message_is_verbatim() {
        let err = ClientError::Unsuccessful("Tin tức không tồn tại".into());
        assert_eq!(err.to_string(), "Tin tức không tồn tại");
    }
}
