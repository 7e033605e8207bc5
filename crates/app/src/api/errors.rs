//! API errors.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur when talking to the storefront API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// An HTTP transport or serialization error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The token is missing, invalid or expired.
    #[error("not authenticated")]
    Unauthorized,

    /// The addressed resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The request conflicts with existing state.
    #[error("conflict: {0}")]
    Conflict(String),

    /// The API returned another non-2xx response.
    #[error("unexpected response ({status}): {body}")]
    UnexpectedResponse {
        /// Response status.
        status: StatusCode,

        /// Response body, as text.
        body: String,
    },
}

impl ApiError {
    /// Classify a non-2xx response.
    pub(crate) fn from_status(status: StatusCode, body: String) -> Self {
        match status {
            StatusCode::UNAUTHORIZED => Self::Unauthorized,
            StatusCode::NOT_FOUND => Self::NotFound(body),
            StatusCode::CONFLICT => Self::Conflict(body),
            _ => Self::UnexpectedResponse { status, body },
        }
    }
}
