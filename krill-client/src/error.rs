//! Client error types

use crate::builder::BuildError;
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Request build failure
    #[error("Build error: {0}")]
    Build(#[from] BuildError),

    /// Client-side request timeout
    #[error("Request timed out")]
    Timeout,

    /// Submission cancelled before a request was committed
    #[error("Submission cancelled")]
    Cancelled,

    /// A submission is already in flight for this flow
    #[error("Submission already in flight")]
    AlreadyInFlight,

    /// Server rejected the operation
    #[error("Server rejected the operation ({status}): {message}")]
    Api { status: u16, message: String },

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
