//! Request extractors

use axum::extract::FromRequest;

use crate::error::AppError;

/// JSON request body whose rejections use the API error body
///
/// Works like [`axum::Json`], except that an unreadable or ill-typed body
/// answers `400` with the usual `{"code", "message", "errors"}` shape
/// instead of axum's plain-text rejection.
#[derive(Debug, Clone, Copy, Default, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);
