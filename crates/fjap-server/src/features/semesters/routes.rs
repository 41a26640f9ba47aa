//! Semester API routes
//!
//! # Route Structure
//!
//! - `GET /api/manager/semesters` - Semesters as dropdown items
//! - `GET /api/manager/semesters/all` - Full semester records
//! - `GET /api/manager/semesters/:semester_id` - One semester
//! - `POST /api/manager/semesters` - Create a semester
//! - `PUT /api/manager/semesters/:semester_id` - Update a semester
//! - `DELETE /api/manager/semesters/:semester_id` - Delete a semester

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use sqlx::PgPool;

use super::commands::{
    self, CreateSemesterCommand, CreateSemesterError, DeleteSemesterCommand, DeleteSemesterError,
    UpdateSemesterCommand, UpdateSemesterError,
};
use super::queries::{
    self, GetSemesterError, GetSemesterQuery, ListSemestersQuery, LookupSemestersQuery,
};
use crate::api::extract::ApiJson;
use crate::api::response::ApiResponse;
use crate::error::AppError;

pub const SEMESTERS_PATH: &str = "/api/manager/semesters";

pub fn semesters_routes() -> Router<PgPool> {
    Router::new()
        .route("/", get(lookup_semesters).post(create_semester))
        .route("/all", get(list_semesters))
        .route(
            "/:semester_id",
            get(get_semester).put(update_semester).delete(delete_semester),
        )
}

/// Create a semester
///
/// # Response
///
/// - `201 Created` - the stored semester, `Location` points at it
/// - `400 Bad Request` - blank name, missing dates or end before start
async fn create_semester(
    State(pool): State<PgPool>,
    ApiJson(command): ApiJson<CreateSemesterCommand>,
) -> Result<Response, AppError> {
    let semester = commands::create::handle(pool, command).await?;
    let location = format!("{}/{}", SEMESTERS_PATH, semester.semester_id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        ApiResponse::with_message("Semester created successfully", semester),
    )
        .into_response())
}

async fn update_semester(
    State(pool): State<PgPool>,
    Path(semester_id): Path<i32>,
    ApiJson(mut command): ApiJson<UpdateSemesterCommand>,
) -> Result<Response, AppError> {
    command.semester_id = semester_id;
    let semester = commands::update::handle(pool, command).await?;

    Ok(ApiResponse::with_message("Semester updated successfully", semester).into_response())
}

/// Delete a semester
///
/// `409 Conflict` while classes or subjects still belong to it.
async fn delete_semester(
    State(pool): State<PgPool>,
    Path(semester_id): Path<i32>,
) -> Result<Response, AppError> {
    commands::delete::handle(pool, DeleteSemesterCommand { semester_id }).await?;
    Ok(ApiResponse::message("Semester deleted successfully").into_response())
}

async fn lookup_semesters(State(pool): State<PgPool>) -> Result<Response, AppError> {
    let items = queries::lookup::handle(pool, LookupSemestersQuery).await?;
    Ok(Json(items).into_response())
}

async fn list_semesters(State(pool): State<PgPool>) -> Result<Response, AppError> {
    let semesters = queries::list::handle(pool, ListSemestersQuery).await?;
    Ok(ApiResponse::success(semesters).into_response())
}

async fn get_semester(
    State(pool): State<PgPool>,
    Path(semester_id): Path<i32>,
) -> Result<Response, AppError> {
    let semester = queries::get::handle(pool, GetSemesterQuery { semester_id }).await?;
    Ok(Json(semester).into_response())
}

impl From<CreateSemesterError> for AppError {
    fn from(err: CreateSemesterError) -> Self {
        match err {
            CreateSemesterError::Validation(e) => AppError::Validation(e),
            CreateSemesterError::Database(e) => AppError::Database(e),
        }
    }
}

impl From<UpdateSemesterError> for AppError {
    fn from(err: UpdateSemesterError) -> Self {
        match err {
            UpdateSemesterError::Validation(e) => AppError::Validation(e),
            UpdateSemesterError::NotFound(_) => AppError::not_found(err.to_string()),
            UpdateSemesterError::Database(e) => AppError::Database(e),
        }
    }
}

impl From<DeleteSemesterError> for AppError {
    fn from(err: DeleteSemesterError) -> Self {
        match err {
            DeleteSemesterError::NotFound(_) => AppError::not_found(err.to_string()),
            DeleteSemesterError::InUse(_) => AppError::conflict(err.to_string()),
            DeleteSemesterError::Database(e) => AppError::Database(e),
        }
    }
}

impl From<GetSemesterError> for AppError {
    fn from(err: GetSemesterError) -> Self {
        match err {
            GetSemesterError::NotFound(_) => AppError::not_found(err.to_string()),
            GetSemesterError::Database(e) => AppError::Database(e),
        }
    }
}
