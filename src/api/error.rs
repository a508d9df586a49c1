//! Data API-specific error types.

/// Errors that can occur while talking to the data API.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Access token was rejected
    #[error("Unauthorized: the data API rejected the access token")]
    Unauthorized,

    /// Request completed with a non-success status
    #[error("Request failed with status {status}")]
    RequestFailed { status: u16 },

    /// Response body did not match the expected shape
    #[error("Failed to deserialize response: {0}")]
    Deserialization(String),

    /// Generic API error
    #[error("{0}")]
    #[allow(dead_code)]
    Other(String),
}
