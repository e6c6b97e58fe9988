//! Gateway error types

use thiserror::Error;

/// Errors that can occur when talking to the news backend
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Backend could not be reached
    #[error("News backend unavailable")]
    Unavailable,

    /// Backend did not answer within the configured timeout
    #[error("Request timeout")]
    Timeout,

    /// Any other transport-level failure
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Backend answered with a non-success status
    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    /// Response body did not have the expected shape
    #[error("Malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl GatewayError {
    /// Classify a reqwest send/read error
    pub(crate) fn from_transport(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            GatewayError::Timeout
        } else if e.is_connect() {
            GatewayError::Unavailable
        } else {
            GatewayError::Request(e)
        }
    }

    /// True for failures caused by the response body rather than the transport
    pub fn is_decode(&self) -> bool {
        matches!(self, GatewayError::Decode(_))
    }
}

/// Result type for gateway operations
pub type GatewayResult<T> = Result<T, GatewayError>;
