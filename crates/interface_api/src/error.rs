//! API error handling
//!
//! Maps the domain error taxonomy to transport-level status codes:
//! Unauthorized -> 401, Forbidden -> 403, NotFound -> 404,
//! InvalidArgument -> 400, Conflict -> 409, Internal -> 500. Every rejected
//! operation carries a short human-readable message.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use core_kernel::PortError;
use domain_claims::ClaimError;
use domain_posts::PostError;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ApiError {
    /// The transport status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let (error_type, message) = match &self {
            ApiError::NotFound(msg) => ("not_found", msg.clone()),
            ApiError::BadRequest(msg) => ("bad_request", msg.clone()),
            ApiError::Unauthorized => ("unauthorized", "Unauthorized".to_string()),
            ApiError::Forbidden(msg) => ("forbidden", msg.clone()),
            ApiError::Conflict(msg) => ("conflict", msg.clone()),
            ApiError::Internal(msg) => ("internal_error", msg.clone()),
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

impl From<PortError> for ApiError {
    fn from(error: PortError) -> Self {
        match &error {
            PortError::NotFound { .. } => ApiError::NotFound(error.to_string()),
            PortError::Conflict { .. } => ApiError::Conflict(error.to_string()),
            PortError::Validation { .. } => ApiError::BadRequest(error.to_string()),
            _ => ApiError::Internal(error.to_string()),
        }
    }
}

impl From<ClaimError> for ApiError {
    fn from(error: ClaimError) -> Self {
        let message = error.to_string();
        match error {
            ClaimError::PostNotFound(_) | ClaimError::ClaimNotFound(_) => {
                ApiError::NotFound(message)
            }
            ClaimError::OwnPost | ClaimError::NotPostOwner | ClaimError::NotClaimant => {
                ApiError::Forbidden(message)
            }
            ClaimError::PostAlreadyClaimed
            | ClaimError::DuplicateClaim
            | ClaimError::AlreadyProcessed => ApiError::Conflict(message),
            ClaimError::WrongClaimType { .. }
            | ClaimError::MessageRequired
            | ClaimError::InvalidForApproval(_)
            | ClaimError::UnsupportedImageType(_)
            | ClaimError::PhotoTooLarge { .. } => ApiError::BadRequest(message),
            ClaimError::UploadFailed(_) => ApiError::Internal(message),
            ClaimError::Store(port) => port.into(),
        }
    }
}

impl From<PostError> for ApiError {
    fn from(error: PostError) -> Self {
        let message = error.to_string();
        match error {
            PostError::PostNotFound(_) => ApiError::NotFound(message),
            PostError::NotOwner => ApiError::Forbidden(message),
            PostError::Validation(_) | PostError::NoUpdateFields => ApiError::BadRequest(message),
            PostError::UploadFailed(_) => ApiError::Internal(message),
            PostError::Store(port) => port.into(),
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ApiError::BadRequest(errors.to_string())
    }
}
