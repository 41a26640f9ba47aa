//! Class management API routes
//!
//! # Route Structure
//!
//! - `GET /api/manager/classes` - List classes with semester details
//! - `GET /api/manager/classes/lookup` - Active classes as dropdown items
//! - `GET /api/manager/classes/options` - Semesters and levels for the class form
//! - `GET /api/manager/classes/:class_id` - Subjects taught in a class
//! - `GET /api/manager/classes/:class_id/info` - Editable class fields
//! - `POST /api/manager/classes` - Create a class
//! - `PUT /api/manager/classes/:class_id` - Update a class
//! - `PATCH /api/manager/classes/:class_id/status` - Activate or deactivate
//! - `DELETE /api/manager/classes/:class_id` - Delete a class

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, patch},
    Json, Router,
};
use serde_json::json;
use sqlx::PgPool;

use super::commands::{
    self, CreateClassCommand, CreateClassError, DeleteClassCommand, DeleteClassError,
    UpdateClassCommand, UpdateClassError, UpdateClassStatusCommand, UpdateClassStatusError,
};
use super::queries::{
    self, GetClassInfoError, GetClassInfoQuery, GetClassOptionsQuery, ListActiveClassesQuery,
    ListClassSubjectsQuery, ListClassesQuery,
};
use crate::api::extract::ApiJson;
use crate::api::response::ApiResponse;
use crate::error::AppError;

/// Path prefix the router is mounted under
pub const CLASSES_PATH: &str = "/api/manager/classes";

// ============================================================================
// Router Configuration
// ============================================================================

pub fn classes_routes() -> Router<PgPool> {
    Router::new()
        .route("/", get(list_classes).post(create_class))
        .route("/lookup", get(list_active_classes))
        .route("/options", get(get_options))
        .route(
            "/:class_id",
            get(list_class_subjects).put(update_class).delete(delete_class),
        )
        .route("/:class_id/info", get(get_class_info))
        .route("/:class_id/status", patch(update_class_status))
}

// ============================================================================
// Command Handlers (Write Operations)
// ============================================================================

/// Create a class
///
/// # Endpoint
///
/// `POST /api/manager/classes`
///
/// ```json
/// { "class_name": "SE1801", "semester_id": 1, "level_id": 2 }
/// ```
///
/// # Response
///
/// - `201 Created` - `Location` points at the class info resource
/// - `400 Bad Request` - Validation error or unknown semester/level
async fn create_class(
    State(pool): State<PgPool>,
    ApiJson(command): ApiJson<CreateClassCommand>,
) -> Result<Response, AppError> {
    let response = commands::create::handle(pool, command).await?;
    let location = format!("{}/{}/info", CLASSES_PATH, response.class_id);

    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(response)).into_response())
}

/// Update a class
///
/// # Response
///
/// - `200 OK` - `{ "message": "Class updated successfully" }`
/// - `400 Bad Request` - Validation error
/// - `404 Not Found` - Unknown class
async fn update_class(
    State(pool): State<PgPool>,
    Path(class_id): Path<String>,
    ApiJson(mut command): ApiJson<UpdateClassCommand>,
) -> Result<Response, AppError> {
    command.class_id = class_id;
    commands::update::handle(pool, command).await?;

    Ok(Json(json!({ "message": "Class updated successfully" })).into_response())
}

/// Activate or deactivate a class
///
/// `PATCH /api/manager/classes/:class_id/status` with `{ "status": true }`
async fn update_class_status(
    State(pool): State<PgPool>,
    Path(class_id): Path<String>,
    ApiJson(mut command): ApiJson<UpdateClassStatusCommand>,
) -> Result<Response, AppError> {
    command.class_id = class_id;
    let status = commands::update_status::handle(pool, command).await?;

    Ok(ApiResponse::with_message("Class status updated", json!({ "status": status }))
        .into_response())
}

/// Delete a class
///
/// # Response
///
/// - `200 OK`
/// - `404 Not Found` - Unknown class
/// - `409 Conflict` - Class still has subjects or enrollments
async fn delete_class(
    State(pool): State<PgPool>,
    Path(class_id): Path<String>,
) -> Result<Response, AppError> {
    commands::delete::handle(pool, DeleteClassCommand { class_id }).await?;

    Ok(ApiResponse::message("Class deleted successfully").into_response())
}

// ============================================================================
// Query Handlers (Read Operations)
// ============================================================================

async fn list_classes(State(pool): State<PgPool>) -> Result<Response, AppError> {
    let rows = queries::list::handle(pool, ListClassesQuery).await?;
    tracing::debug!(count = rows.len(), "Classes listed");

    Ok(ApiResponse::success(rows).into_response())
}

async fn list_active_classes(State(pool): State<PgPool>) -> Result<Response, AppError> {
    let items = queries::list_active::handle(pool, ListActiveClassesQuery).await?;
    Ok(Json(items).into_response())
}

/// `{ "semesters": [...], "levels": [...] }`
async fn get_options(State(pool): State<PgPool>) -> Result<Response, AppError> {
    let options = queries::options::handle(pool, GetClassOptionsQuery).await?;
    Ok(Json(options).into_response())
}

/// Editable class fields
///
/// # Response
///
/// - `200 OK` - `{ class_id, class_name, semester_id, level_id, status }`
/// - `404 Not Found` - `{ code: 404, message: "Class <id> not found" }`
async fn get_class_info(
    State(pool): State<PgPool>,
    Path(class_id): Path<String>,
) -> Result<Response, AppError> {
    let info = queries::get_info::handle(pool, GetClassInfoQuery { class_id }).await?;
    Ok(Json(info).into_response())
}

async fn list_class_subjects(
    State(pool): State<PgPool>,
    Path(class_id): Path<String>,
) -> Result<Response, AppError> {
    let rows = queries::list_subjects::handle(pool, ListClassSubjectsQuery { class_id }).await?;
    Ok(ApiResponse::success(rows).into_response())
}

// ============================================================================
// Error Handling
// ============================================================================

impl From<CreateClassError> for AppError {
    fn from(err: CreateClassError) -> Self {
        match err {
            CreateClassError::Validation(e) => AppError::Validation(e),
            CreateClassError::UnknownReference { .. } => AppError::bad_request(err.to_string()),
            CreateClassError::Database(e) => AppError::Database(e),
        }
    }
}

impl From<UpdateClassError> for AppError {
    fn from(err: UpdateClassError) -> Self {
        match err {
            UpdateClassError::Validation(e) => AppError::Validation(e),
            UpdateClassError::NotFound(_) => AppError::not_found(err.to_string()),
            UpdateClassError::UnknownReference { .. } => AppError::bad_request(err.to_string()),
            UpdateClassError::Database(e) => AppError::Database(e),
        }
    }
}

impl From<UpdateClassStatusError> for AppError {
    fn from(err: UpdateClassStatusError) -> Self {
        match err {
            UpdateClassStatusError::NotFound(_) => AppError::not_found(err.to_string()),
            UpdateClassStatusError::Database(e) => AppError::Database(e),
        }
    }
}

impl From<DeleteClassError> for AppError {
    fn from(err: DeleteClassError) -> Self {
        match err {
            DeleteClassError::NotFound(_) => AppError::not_found(err.to_string()),
            DeleteClassError::InUse(_) => AppError::conflict(err.to_string()),
            DeleteClassError::Database(e) => AppError::Database(e),
        }
    }
}

impl From<GetClassInfoError> for AppError {
    fn from(err: GetClassInfoError) -> Self {
        match err {
            GetClassInfoError::NotFound(_) => AppError::not_found(err.to_string()),
            GetClassInfoError::Database(e) => AppError::Database(e),
        }
    }
}
