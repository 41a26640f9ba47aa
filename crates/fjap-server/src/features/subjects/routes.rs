//! Subject management API routes
//!
//! # Route Structure
//!
//! - `GET /api/manager/subjects` - Filtered, paginated subjects
//! - `GET /api/manager/subjects/details` - Subjects with class, level and semester names
//! - `GET /api/manager/subjects/options` - Semesters, levels and active classes
//! - `GET /api/manager/subjects/:subject_id` - One subject
//! - `GET /api/manager/subjects/code/:subject_code` - One subject by code
//! - `GET /api/manager/subjects/class/:class_id` - Subjects of a class
//! - `GET /api/manager/subjects/semester/:semester_id` - Subjects of a semester
//! - `GET /api/manager/subjects/level/:level_id` - Subjects of a level
//! - `POST /api/manager/subjects` - Create a subject
//! - `PUT /api/manager/subjects/:subject_id` - Update a subject
//! - `PATCH /api/manager/subjects/:subject_id/status` - Activate or deactivate
//! - `DELETE /api/manager/subjects/:subject_id` - Delete a subject

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, patch},
    Json, Router,
};
use serde_json::json;
use sqlx::PgPool;

use super::commands::{
    self, CreateSubjectCommand, CreateSubjectError, DeleteSubjectCommand, DeleteSubjectError,
    UpdateSubjectCommand, UpdateSubjectError, UpdateSubjectStatusCommand,
    UpdateSubjectStatusError,
};
use super::queries::{
    self, GetSubjectByCodeQuery, GetSubjectError, GetSubjectOptionsQuery, GetSubjectQuery,
    ListSubjectDetailsQuery, ListSubjectsByQuery, ListSubjectsError, ListSubjectsQuery,
    SubjectScope,
};
use crate::api::extract::ApiJson;
use crate::api::response::ApiResponse;
use crate::error::AppError;

pub const SUBJECTS_PATH: &str = "/api/manager/subjects";

// ============================================================================
// Router Configuration
// ============================================================================

pub fn subjects_routes() -> Router<PgPool> {
    Router::new()
        .route("/", get(list_subjects).post(create_subject))
        .route("/details", get(list_subject_details))
        .route("/options", get(get_options))
        .route("/code/:subject_code", get(get_subject_by_code))
        .route("/class/:class_id", get(list_by_class))
        .route("/semester/:semester_id", get(list_by_semester))
        .route("/level/:level_id", get(list_by_level))
        .route(
            "/:subject_id",
            get(get_subject).put(update_subject).delete(delete_subject),
        )
        .route("/:subject_id/status", patch(update_subject_status))
}

// ============================================================================
// Command Handlers (Write Operations)
// ============================================================================

/// Create a subject
///
/// # Endpoint
///
/// `POST /api/manager/subjects`
///
/// ```json
/// {
///   "subject_code": "PRF192",
///   "subject_name": "Programming Fundamentals",
///   "description": null,
///   "pass_mark": 5.0,
///   "semester_id": 1,
///   "level_id": 1,
///   "class_id": "CL..."
/// }
/// ```
///
/// # Response
///
/// - `201 Created` - `Location: /api/manager/subjects/{id}`
/// - `400 Bad Request` - Validation error or unknown semester/level/class
/// - `409 Conflict` - Subject code already used
async fn create_subject(
    State(pool): State<PgPool>,
    ApiJson(command): ApiJson<CreateSubjectCommand>,
) -> Result<Response, AppError> {
    let subject = commands::create::handle(pool, command).await?;
    let location = format!("{}/{}", SUBJECTS_PATH, subject.subject_id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        ApiResponse::with_message("Subject created successfully", subject),
    )
        .into_response())
}

async fn update_subject(
    State(pool): State<PgPool>,
    Path(subject_id): Path<i32>,
    ApiJson(mut command): ApiJson<UpdateSubjectCommand>,
) -> Result<Response, AppError> {
    command.subject_id = subject_id;
    let subject = commands::update::handle(pool, command).await?;

    Ok(ApiResponse::with_message("Subject updated successfully", subject).into_response())
}

async fn update_subject_status(
    State(pool): State<PgPool>,
    Path(subject_id): Path<i32>,
    ApiJson(mut command): ApiJson<UpdateSubjectStatusCommand>,
) -> Result<Response, AppError> {
    command.subject_id = subject_id;
    let status = commands::update_status::handle(pool, command).await?;

    Ok(ApiResponse::with_message("Subject status updated", json!({ "status": status }))
        .into_response())
}

/// `409 Conflict` once grades exist for the subject
async fn delete_subject(
    State(pool): State<PgPool>,
    Path(subject_id): Path<i32>,
) -> Result<Response, AppError> {
    commands::delete::handle(pool, DeleteSubjectCommand { subject_id }).await?;
    Ok(ApiResponse::message("Subject deleted successfully").into_response())
}

// ============================================================================
// Query Handlers (Read Operations)
// ============================================================================

/// List subjects
///
/// # Endpoint
///
/// `GET /api/manager/subjects?search=prf&status=Active&class_id=CL..&page=1&per_page=20`
///
/// # Response
///
/// Envelope whose `data` is `{ items, pagination }`.
async fn list_subjects(
    State(pool): State<PgPool>,
    Query(query): Query<ListSubjectsQuery>,
) -> Result<Response, AppError> {
    let page = queries::list::handle(pool, query).await?;
    Ok(ApiResponse::success(page).into_response())
}

async fn list_subject_details(State(pool): State<PgPool>) -> Result<Response, AppError> {
    let rows = queries::details::handle(pool, ListSubjectDetailsQuery).await?;
    Ok(ApiResponse::success(rows).into_response())
}

async fn get_options(State(pool): State<PgPool>) -> Result<Response, AppError> {
    let options = queries::options::handle(pool, GetSubjectOptionsQuery).await?;
    Ok(Json(options).into_response())
}

async fn get_subject(
    State(pool): State<PgPool>,
    Path(subject_id): Path<i32>,
) -> Result<Response, AppError> {
    let subject = queries::get::handle(pool, GetSubjectQuery { subject_id }).await?;
    Ok(Json(subject).into_response())
}

async fn get_subject_by_code(
    State(pool): State<PgPool>,
    Path(subject_code): Path<String>,
) -> Result<Response, AppError> {
    let subject = queries::get::handle_by_code(pool, GetSubjectByCodeQuery { subject_code }).await?;
    Ok(Json(subject).into_response())
}

async fn list_scoped(pool: PgPool, scope: SubjectScope) -> Result<Response, AppError> {
    let rows = queries::list_by::handle(pool, ListSubjectsByQuery { scope }).await?;
    Ok(ApiResponse::success(rows).into_response())
}

async fn list_by_class(
    State(pool): State<PgPool>,
    Path(class_id): Path<String>,
) -> Result<Response, AppError> {
    list_scoped(pool, SubjectScope::Class(class_id)).await
}

async fn list_by_semester(
    State(pool): State<PgPool>,
    Path(semester_id): Path<i32>,
) -> Result<Response, AppError> {
    list_scoped(pool, SubjectScope::Semester(semester_id)).await
}

async fn list_by_level(
    State(pool): State<PgPool>,
    Path(level_id): Path<i32>,
) -> Result<Response, AppError> {
    list_scoped(pool, SubjectScope::Level(level_id)).await
}

// ============================================================================
// Error Handling
// ============================================================================

impl From<CreateSubjectError> for AppError {
    fn from(err: CreateSubjectError) -> Self {
        match err {
            CreateSubjectError::Validation(e) => AppError::Validation(e),
            CreateSubjectError::DuplicateCode(_) => AppError::conflict(err.to_string()),
            CreateSubjectError::UnknownReference => AppError::bad_request(err.to_string()),
            CreateSubjectError::Database(e) => AppError::Database(e),
        }
    }
}

impl From<UpdateSubjectError> for AppError {
    fn from(err: UpdateSubjectError) -> Self {
        match err {
            UpdateSubjectError::Validation(e) => AppError::Validation(e),
            UpdateSubjectError::NotFound(_) => AppError::not_found(err.to_string()),
            UpdateSubjectError::DuplicateCode(_) => AppError::conflict(err.to_string()),
            UpdateSubjectError::UnknownReference => AppError::bad_request(err.to_string()),
            UpdateSubjectError::Database(e) => AppError::Database(e),
        }
    }
}

impl From<UpdateSubjectStatusError> for AppError {
    fn from(err: UpdateSubjectStatusError) -> Self {
        match err {
            UpdateSubjectStatusError::NotFound(_) => AppError::not_found(err.to_string()),
            UpdateSubjectStatusError::Database(e) => AppError::Database(e),
        }
    }
}

impl From<DeleteSubjectError> for AppError {
    fn from(err: DeleteSubjectError) -> Self {
        match err {
            DeleteSubjectError::NotFound(_) => AppError::not_found(err.to_string()),
            DeleteSubjectError::InUse(_) => AppError::conflict(err.to_string()),
            DeleteSubjectError::Database(e) => AppError::Database(e),
        }
    }
}

impl From<GetSubjectError> for AppError {
    fn from(err: GetSubjectError) -> Self {
        match err {
            GetSubjectError::NotFound(_) => AppError::not_found(err.to_string()),
            GetSubjectError::Database(e) => AppError::Database(e),
        }
    }
}

impl From<ListSubjectsError> for AppError {
    fn from(err: ListSubjectsError) -> Self {
        match err {
            ListSubjectsError::Validation(e) => AppError::Validation(e),
            ListSubjectsError::Database(e) => AppError::Database(e),
        }
    }
}
