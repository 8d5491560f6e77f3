//! Mapping of service failures onto HTTP responses.
//!
//! Clients only ever see one of two fixed messages; internal detail stays in
//! the server log.

use ai4s_core::Error;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

pub const GENERATION_FAILED_MESSAGE: &str = "Failed to generate article";
pub const INVALID_JSON_MESSAGE: &str = "Invalid JSON body";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request itself is unusable.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Anything that went wrong after validation.
    #[error("internal error: {0}")]
    Internal(Error),
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            Error::Validation(message) => ApiError::BadRequest(message),
            other => ApiError::Internal(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::Internal(err) => {
                tracing::error!(error = %err, "article generation failed");
                (StatusCode::INTERNAL_SERVER_ERROR, GENERATION_FAILED_MESSAGE.to_string())
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}
