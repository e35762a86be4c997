//! Error types for the SearXNG HTTP client.

use thiserror::Error;

/// Errors that can occur when talking to a SearXNG instance.
#[derive(Debug, Error)]
pub enum SearxError {
    /// Caller supplied an out-of-contract argument; no request was made.
    #[error("{0}")]
    InvalidArgument(String),

    /// The network connection could not be established.
    #[error("Unable to connect to SearXNG at {base_url}. Please ensure SearXNG is running.")]
    Connection {
        base_url: String,
        #[source]
        source: reqwest::Error,
    },

    /// No response arrived within the configured timeout.
    #[error("Request timed out after {timeout_secs}s")]
    Timeout {
        timeout_secs: u64,
        #[source]
        source: reqwest::Error,
    },

    /// Any other transport-level failure, including HTTP error statuses.
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// SearXNG responded but the payload violates the expected shape.
    #[error("Invalid SearXNG response: {message}")]
    MalformedResponse {
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },
}

impl SearxError {
    /// Shorthand for a `MalformedResponse` without an underlying cause.
    pub fn malformed(message: impl Into<String>) -> Self {
        SearxError::MalformedResponse {
            message: message.into(),
            source: None,
        }
    }
}

/// Result type for SearXNG client operations.
pub type Result<T> = std::result::Result<T, SearxError>;
