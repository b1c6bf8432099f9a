//! Error types for the Vibra API client.

use thiserror::Error;

/// Errors that can occur when talking to the Vibra backend.
#[derive(Error, Debug)]
pub enum ApiClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned an error response
    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// Authentication required but no token available
    #[error("Authentication required")]
    AuthRequired,

    /// Invalid server URL
    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse server response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Server is offline or unreachable
    #[error("Server unreachable: {0}")]
    ServerUnreachable(String),
}

impl From<ApiClientError> for vibra_core::VibraError {
    fn from(err: ApiClientError) -> Self {
        match err {
            ApiClientError::ServerError { status, message } => {
                vibra_core::VibraError::Catalog(format!("server error ({status}): {message}"))
            }
            other => vibra_core::VibraError::Network(other.to_string()),
        }
    }
}

/// Result type for API client operations.
pub type Result<T> = std::result::Result<T, ApiClientError>;
