//! Error types for the short code store
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::models::ErrorResponse;
use thiserror::Error;

// == Shortener Error Enum ==
/// Unified error type for the store, the allocator and the HTTP layer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShortenerError {
    /// No entry exists for the key
    #[error("Short code not found: {0}")]
    NotFound(String),

    /// Insert collided with a live entry
    #[error("Short code already exists: {0}")]
    AlreadyExists(String),

    /// Entry is present but its TTL has elapsed
    #[error("Short code expired: {0}")]
    Expired(String),

    /// Every allocation attempt collided
    #[error("Unable to allocate a unique short code after {attempts} attempts")]
    RetriesExhausted { attempts: u32 },

    /// Caller aborted the operation before it started
    #[error("Operation canceled")]
    Canceled,

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ShortenerError {
    /// Returns true for errors meaning "nothing resolvable lives at this key".
    pub fn is_missing(&self) -> bool {
        matches!(self, ShortenerError::NotFound(_) | ShortenerError::Expired(_))
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ShortenerError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            err if err.is_missing() => (
                StatusCode::NOT_FOUND,
                "not_found",
                "short code not found or expired".to_string(),
            ),
            ShortenerError::InvalidRequest(msg) => {
                (StatusCode::BAD_REQUEST, "validation_error", msg.clone())
            }
            ShortenerError::Canceled => (
                StatusCode::SERVICE_UNAVAILABLE,
                "canceled",
                "request canceled".to_string(),
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "internal server error".to_string(),
            ),
        };

        (status, Json(ErrorResponse::new(code, message))).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the short code store.
pub type Result<T> = std::result::Result<T, ShortenerError>;
