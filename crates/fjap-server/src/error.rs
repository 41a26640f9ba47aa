//! Server-wide error type
//!
//! Every command and query defines its own `thiserror` enum; route modules
//! convert those into [`AppError`], which owns the mapping to HTTP status
//! codes and the JSON error body.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::api::response::ErrorResponse;
use crate::features::shared::validation::{FieldError, ValidationErrors};

/// Detail returned to clients for any database failure
pub const DATABASE_ERROR_DETAIL: &str = "A database error occurred";

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Validation(#[from] ValidationErrors),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<FieldError> for AppError {
    fn from(error: FieldError) -> Self {
        Self::Validation(error.into())
    }
}

/// Malformed bodies answer `400` like any other invalid request. A body
/// that parses but does not fit the command type is reported against the
/// offending field, or `body` when serde does not name one.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(err) => {
                let (field, message) = describe_data_error(&err.body_text());
                let mut errors = ValidationErrors::new();
                errors.add(field, message);
                Self::Validation(errors)
            },
            other => Self::BadRequest(other.body_text()),
        }
    }
}

/// Split serde's `path: message at line L column C` into field and message
fn describe_data_error(text: &str) -> (String, String) {
    let detail = text
        .split_once("target type: ")
        .map_or(text, |(_, detail)| detail);
    let detail = detail
        .rfind(" at line ")
        .map_or(detail, |index| &detail[..index]);

    if let Some(rest) = detail.strip_prefix("missing field `") {
        if let Some((field, _)) = rest.split_once('`') {
            return (field.to_string(), format!("The {} field is required", field));
        }
    }
    match detail.split_once(": ") {
        Some((path, message)) if !path.contains(' ') => (path.to_string(), message.to_string()),
        _ => ("body".to_string(), detail.to_string()),
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            AppError::Validation(errors) => ErrorResponse::validation(errors.into_map()),
            AppError::Database(ref e) => {
                tracing::error!(error = ?e, "Database error");
                ErrorResponse::internal(DATABASE_ERROR_DETAIL)
            },
            AppError::Internal(ref message) => {
                tracing::error!("Internal error: {}", message);
                ErrorResponse::internal("An internal error occurred")
            },
            AppError::BadRequest(message)
            | AppError::NotFound(message)
            | AppError::Conflict(message)
            | AppError::Unauthorized(message)
            | AppError::Forbidden(message) => ErrorResponse::new(status, message),
        };

        body.into_response()
    }
}
