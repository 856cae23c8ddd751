//! Error types for the image client.

use thiserror::Error;

use crate::form::FormError;

/// Errors that can occur when using the image client.
#[derive(Debug, Error)]
pub enum ImageApiError {
    /// Base error for the image client.
    #[error("[ImageApi Error]: {message}")]
    Base {
        /// Error message
        message: String,
    },

    /// Building the multipart body failed.
    #[error("Form assembly failed: {0}")]
    FormError(#[from] FormError),

    /// The API answered with a non-success status.
    #[error("API returned status {status}: {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message reported by the API, or the raw body
        message: String,
    },

    /// Error occurred during an API request.
    #[error("API request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    /// Error occurred when accessing environment variables.
    #[error("Environment variable not found: {0}")]
    EnvError(#[from] std::env::VarError),

    /// Error occurred when parsing JSON.
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// The blocking task assembling a form panicked or was cancelled.
    #[error("Form assembly task failed: {0}")]
    TaskError(#[from] tokio::task::JoinError),
}

impl ImageApiError {
    /// Creates a new Base error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self::Base {
            message: message.into(),
        }
    }
}
