//! Error types for the signup service.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

/// Signup service errors. Display strings are the exact texts the page's
/// modal shows; nothing more detailed ever reaches the user.
#[derive(Debug, Error)]
pub enum SignupError {
    #[error("Please enter a valid email address.")]
    InvalidEmail,

    #[error("Please complete the reCAPTCHA.")]
    ChallengeFailed,

    #[error("This email is already on the waiting list.")]
    AlreadySubscribed,

    #[error("An error occurred. Please try again later.")]
    Store,

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl IntoResponse for SignupError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            SignupError::InvalidEmail => (StatusCode::BAD_REQUEST, "INVALID_EMAIL"),
            SignupError::ChallengeFailed => (StatusCode::BAD_REQUEST, "CAPTCHA_FAILED"),
            SignupError::AlreadySubscribed => (StatusCode::CONFLICT, "ALREADY_SUBSCRIBED"),
            SignupError::Store => (StatusCode::BAD_GATEWAY, "STORE_ERROR"),
            SignupError::RateLimitExceeded => (StatusCode::TOO_MANY_REQUESTS, "RATE_LIMIT_EXCEEDED"),
            SignupError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        let body = ErrorResponse {
            error: self.to_string(),
            code: code.to_string(),
        };

        (status, Json(body)).into_response()
    }
}
