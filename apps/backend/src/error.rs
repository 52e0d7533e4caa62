//! Error handling for the backend API

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use typing_test_core::TestError;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Typing test error: {0}")]
    Test(#[from] TestError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Session limit reached: {0}")]
    SessionLimit(usize),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type) = match &self {
            ApiError::Test(TestError::EmptyAnswer) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "empty_answer")
            }
            ApiError::Test(TestError::InvalidState { .. }) => {
                (StatusCode::CONFLICT, "invalid_state")
            }
            ApiError::Test(TestError::NoCards) => (StatusCode::BAD_REQUEST, "no_cards"),
            ApiError::Test(TestError::InvalidSettings(_)) => {
                (StatusCode::BAD_REQUEST, "invalid_settings")
            }
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            ApiError::SessionLimit(_) => (StatusCode::SERVICE_UNAVAILABLE, "session_limit"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        };

        let body = Json(ErrorResponse {
            error: error_type.to_string(),
            message: self.to_string(),
        });

        (status, body).into_response()
    }
}

/// Result type alias for API operations
pub type Result<T> = std::result::Result<T, ApiError>;
