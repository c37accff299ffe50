//! Error types for the banner service
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::auth::AuthError;
use crate::models::ErrorResponse;

// == Banner Error Enum ==
/// Unified error type for the read and admin paths.
#[derive(Error, Debug)]
pub enum BannerError {
    /// Malformed parameters or banner fields
    #[error("{0}")]
    Validation(String),

    /// No banner for the filter pair, or hidden from this caller
    #[error("Banner not available")]
    NotAvailable,

    /// Admin operation on an id the store does not know
    #[error("banner with ID (id {0}) not found")]
    BannerNotFound(i64),

    /// A unique field, such as a user's email, is already taken
    #[error("{0}")]
    Conflict(String),

    /// The store did not answer within the per-request deadline
    #[error("request timeout")]
    Timeout,

    /// Missing, invalid or expired token
    #[error("{0}")]
    Unauthorized(String),

    /// Valid token without the admin flag
    #[error("user does not have access")]
    Forbidden,

    /// Any other store failure. The message is logged, never returned.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<AuthError> for BannerError {
    fn from(err: AuthError) -> Self {
        BannerError::Unauthorized(err.to_string())
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for BannerError {
    fn into_response(self) -> Response {
        let status = match &self {
            BannerError::Validation(_) => StatusCode::BAD_REQUEST,
            BannerError::NotAvailable | BannerError::BannerNotFound(_) => StatusCode::NOT_FOUND,
            BannerError::Conflict(_) => StatusCode::CONFLICT,
            BannerError::Timeout => StatusCode::REQUEST_TIMEOUT,
            BannerError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            BannerError::Forbidden => StatusCode::FORBIDDEN,
            BannerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let message = match self {
            BannerError::Internal(_) => "internal server error".to_string(),
            other => other.to_string(),
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the banner service.
pub type Result<T> = std::result::Result<T, BannerError>;
