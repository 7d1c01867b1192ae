//! API error mapping
//!
//! Boundary translation of model and store errors onto HTTP status codes
//! and the error body shape.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::model::{FieldError, ValidationError};
use crate::store::StoreError;

/// Result type for request handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors surfaced by the HTTP layer.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed or out-of-range input, with per-field detail.
    #[error("{0}")]
    Validation(ValidationError),

    /// The referenced book does not exist.
    #[error("Book not found")]
    NotFound,

    /// Underlying store failure; not individually handled.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Validation(err)
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Validation(v) => ApiError::Validation(v),
            StoreError::NotFound(_) => ApiError::NotFound,
            other => ApiError::Internal(other.to_string()),
        }
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

impl From<&ApiError> for ErrorResponse {
    fn from(err: &ApiError) -> Self {
        let details = match err {
            ApiError::Validation(v) => Some(v.errors.clone()),
            _ => None,
        };
        Self {
            error: err.to_string(),
            code: err.status_code().as_u16(),
            details,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorResponse::from(&self));
        (status, body).into_response()
    }
}
