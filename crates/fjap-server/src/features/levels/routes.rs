//! Level API routes
//!
//! # Route Structure
//!
//! - `GET /api/manager/levels` - Levels as dropdown items
//! - `GET /api/manager/levels/:level_id` - One level
//! - `POST /api/manager/levels` - Create a level
//! - `PUT /api/manager/levels/:level_id` - Rename a level
//! - `DELETE /api/manager/levels/:level_id` - Delete a level

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use sqlx::PgPool;

use super::commands::{
    self, CreateLevelCommand, CreateLevelError, DeleteLevelCommand, DeleteLevelError,
    UpdateLevelCommand, UpdateLevelError,
};
use super::queries::{self, GetLevelError, GetLevelQuery, LookupLevelsQuery};
use crate::api::extract::ApiJson;
use crate::api::response::ApiResponse;
use crate::error::AppError;

pub const LEVELS_PATH: &str = "/api/manager/levels";

pub fn levels_routes() -> Router<PgPool> {
    Router::new()
        .route("/", get(lookup_levels).post(create_level))
        .route(
            "/:level_id",
            get(get_level).put(update_level).delete(delete_level),
        )
}

/// Create a level
///
/// # Response
///
/// - `201 Created`
/// - `400 Bad Request` - blank or overlong name
/// - `409 Conflict` - name already taken
async fn create_level(
    State(pool): State<PgPool>,
    ApiJson(command): ApiJson<CreateLevelCommand>,
) -> Result<Response, AppError> {
    let level = commands::create::handle(pool, command).await?;
    let location = format!("{}/{}", LEVELS_PATH, level.level_id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        ApiResponse::with_message("Level created successfully", level),
    )
        .into_response())
}

async fn update_level(
    State(pool): State<PgPool>,
    Path(level_id): Path<i32>,
    ApiJson(mut command): ApiJson<UpdateLevelCommand>,
) -> Result<Response, AppError> {
    command.level_id = level_id;
    let level = commands::update::handle(pool, command).await?;
    Ok(ApiResponse::with_message("Level updated successfully", level).into_response())
}

async fn delete_level(
    State(pool): State<PgPool>,
    Path(level_id): Path<i32>,
) -> Result<Response, AppError> {
    commands::delete::handle(pool, DeleteLevelCommand { level_id }).await?;
    Ok(ApiResponse::message("Level deleted successfully").into_response())
}

async fn lookup_levels(State(pool): State<PgPool>) -> Result<Response, AppError> {
    let items = queries::lookup::handle(pool, LookupLevelsQuery).await?;
    Ok(Json(items).into_response())
}

async fn get_level(
    State(pool): State<PgPool>,
    Path(level_id): Path<i32>,
) -> Result<Response, AppError> {
    let level = queries::get::handle(pool, GetLevelQuery { level_id }).await?;
    Ok(Json(level).into_response())
}

impl From<CreateLevelError> for AppError {
    fn from(err: CreateLevelError) -> Self {
        match err {
            CreateLevelError::Validation(e) => AppError::Validation(e),
            CreateLevelError::Duplicate(_) => AppError::conflict(err.to_string()),
            CreateLevelError::Database(e) => AppError::Database(e),
        }
    }
}

impl From<UpdateLevelError> for AppError {
    fn from(err: UpdateLevelError) -> Self {
        match err {
            UpdateLevelError::Validation(e) => AppError::Validation(e),
            UpdateLevelError::NotFound(_) => AppError::not_found(err.to_string()),
            UpdateLevelError::Duplicate(_) => AppError::conflict(err.to_string()),
            UpdateLevelError::Database(e) => AppError::Database(e),
        }
    }
}

impl From<DeleteLevelError> for AppError {
    fn from(err: DeleteLevelError) -> Self {
        match err {
            DeleteLevelError::NotFound(_) => AppError::not_found(err.to_string()),
            DeleteLevelError::InUse(_) => AppError::conflict(err.to_string()),
            DeleteLevelError::Database(e) => AppError::Database(e),
        }
    }
}

impl From<GetLevelError> for AppError {
    fn from(err: GetLevelError) -> Self {
        match err {
            GetLevelError::NotFound(_) => AppError::not_found(err.to_string()),
            GetLevelError::Database(e) => AppError::Database(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::shared::test_helpers::{json_body, offline_pool, send};
    use serde_json::json;

    #[tokio::test]
    async fn test_blank_name_rejected() {
        let app = levels_routes().with_state(offline_pool());
        let (status, response) = send(app, "POST", "/", Some(json!({ "level_name": "  " }))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["errors"]["level_name"][0], "Level name is required");
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_duplicate_is_conflict(pool: PgPool) {
        let app = levels_routes().with_state(pool);
        let (status, _) = send(app.clone(), "POST", "/", Some(json!({ "level_name": "Level 1" }))).await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, response) = send(app, "POST", "/", Some(json!({ "level_name": "Level 1" }))).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(json_body(response).await["code"], 409);
    }
}
