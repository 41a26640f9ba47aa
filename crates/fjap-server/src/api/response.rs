//! API response types
//!
//! Every JSON body the API produces is one of two shapes:
//!
//! - [`ApiResponse`]: `{ "code": 200, "message": "Success", "data": ... }`
//! - [`ErrorResponse`]: `{ "code": 400, "message": "...", "errors": {...} }` or
//!   `{ "code": 500, "message": "...", "detail": "..." }`

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Standard success envelope
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// `200 Success` with a payload
    pub fn success(data: T) -> Self {
        Self {
            code: StatusCode::OK.as_u16(),
            message: "Success".to_string(),
            data: Some(data),
        }
    }

    /// `200` with a custom message and a payload
    pub fn with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            code: StatusCode::OK.as_u16(),
            message: message.into(),
            data: Some(data),
        }
    }

    fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.code).unwrap_or(StatusCode::OK)
    }
}

impl ApiResponse<()> {
    /// `200` envelope carrying only a message
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            code: StatusCode::OK.as_u16(),
            message: message.into(),
            data: None,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}

/// Field name to messages, as returned with `400 Bad Request`
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Standard error body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrors>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ErrorResponse {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            code: status.as_u16(),
            message: message.into(),
            errors: None,
            detail: None,
        }
    }

    /// `400` listing every invalid field
    pub fn validation(errors: FieldErrors) -> Self {
        Self {
            code: StatusCode::BAD_REQUEST.as_u16(),
            message: "One or more validation errors occurred.".to_string(),
            errors: Some(errors),
            detail: None,
        }
    }

    /// `500` with a generic detail line
    pub fn internal(detail: impl Into<String>) -> Self {
        Self {
            code: StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
            message: "Internal Server Error".to_string(),
            errors: None,
            detail: Some(detail.into()),
        }
    }

    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_envelope_shape() {
        let body = serde_json::to_value(ApiResponse::success(vec![1, 2])).unwrap();
        assert_eq!(body, json!({"code": 200, "message": "Success", "data": [1, 2]}));
    }

    #[test]
    fn test_message_envelope_omits_data() {
        let body = serde_json::to_value(ApiResponse::message("Class status updated")).unwrap();
        assert_eq!(body, json!({"code": 200, "message": "Class status updated"}));
    }

    #[test]
    fn test_validation_error_shape() {
        let mut errors = FieldErrors::new();
        errors.insert("class_name".to_string(), vec!["Class name is required".to_string()]);
        let error = ErrorResponse::validation(errors);
        assert_eq!(error.status(), StatusCode::BAD_REQUEST);
        let body = serde_json::to_value(&error).unwrap();
        assert_eq!(body["errors"]["class_name"][0], "Class name is required");
        assert!(body.get("detail").is_none());
    }

    #[test]
    fn test_internal_error_shape() {
        let body = serde_json::to_value(ErrorResponse::internal("A database error occurred")).unwrap();
        assert_eq!(
            body,
            json!({
                "code": 500,
                "message": "Internal Server Error",
                "detail": "A database error occurred"
            })
        );
    }
}
