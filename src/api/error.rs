//! Errors raised while talking to the backend.

use std::sync::Arc;
use thiserror::Error;

/// Result type for backend calls.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors returned by backend calls, whether remote or emulated in memory.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// The configured base URL is not an `http://` or `https://` URL.
    #[error("invalid API base URL '{0}', expected http:// or https://")]
    InvalidBaseUrl(String),

    /// The backend refused the credentials or the token expired.
    #[error("not authenticated: {0}")]
    Unauthorized(String),

    /// The backend answered with a non-success status.
    #[error("request failed with status {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Server message, verbatim when available.
        message: String,
    },

    /// The backend answered `success: false`.
    #[error("request rejected: {0}")]
    Rejected(String),

    /// The envelope was successful but carried no `data`.
    #[error("response envelope carried no data")]
    MissingData,

    /// The request never produced a response.
    #[error("transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),

    /// The response body could not be decoded.
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// The request body could not be encoded.
    #[error("failed to encode request: {0}")]
    Encode(String),
}

impl ApiError {
    /// Wraps a transport-layer error.
    #[must_use]
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }

    /// Builds a not-found error in the backend's shape.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::Status {
            status: 404,
            message: message.into(),
        }
    }

    /// Builds a validation error in the backend's shape.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::Status {
            status: 400,
            message: message.into(),
        }
    }

    /// Returns `true` for authentication failures: a 401, or a message that
    /// mentions the token.
    #[must_use]
    pub fn is_auth(&self) -> bool {
        match self {
            Self::Unauthorized(_) => true,
            Self::Status { status, message } => *status == 401 || mentions_token(message),
            Self::Rejected(message) => mentions_token(message),
            _ => false,
        }
    }

    /// Returns the HTTP status, when the backend produced one.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized(_) => Some(401),
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return Self::Decode(err.to_string());
        }
        Self::transport(err)
    }
}

pub(crate) fn mentions_token(message: &str) -> bool {
    message.to_ascii_lowercase().contains("token")
}
