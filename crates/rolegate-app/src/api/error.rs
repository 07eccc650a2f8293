//! API error types and helpers.
//!
//! Every failure leaves the API as `{code, message}` with a status that
//! matches the code. Authentication failures share one generic message so a
//! client cannot tell an unknown user from a wrong password or a bad token.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use rolegate_usecase::RbacError;

use crate::api::types::ErrorResponse;

pub const UNAUTHORIZED_MESSAGE: &str = "invalid credentials or token";

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorResponse,
}

impl ApiError {
    fn new(status: StatusCode, code: &str, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorResponse {
                code: code.to_string(),
                message: message.into(),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status, Json(self.body)).into_response()
    }
}

pub fn api_unauthorized(message: &str) -> ApiError {
    ApiError::new(StatusCode::UNAUTHORIZED, "unauthorized", message)
}

pub fn api_internal_message(message: &str) -> ApiError {
    ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "internal", message)
}

impl From<RbacError> for ApiError {
    fn from(err: RbacError) -> Self {
        match &err {
            _ if err.is_unauthorized() => api_unauthorized(UNAUTHORIZED_MESSAGE),
            RbacError::Validation { .. } => {
                ApiError::new(StatusCode::BAD_REQUEST, "validation", err.to_string())
            }
            RbacError::DuplicateName { .. } => {
                ApiError::new(StatusCode::CONFLICT, "duplicate_name", err.to_string())
            }
            RbacError::NotFound { .. } => {
                ApiError::new(StatusCode::NOT_FOUND, "not_found", err.to_string())
            }
            RbacError::StoreUnavailable(message) => {
                tracing::error!(error = %message, "store unavailable");
                ApiError::new(
                    StatusCode::SERVICE_UNAVAILABLE,
                    "store_unavailable",
                    "store unavailable",
                )
            }
            other => {
                tracing::error!(error = %other, "credential primitive failed");
                api_internal_message("internal error")
            }
        }
    }
}
