//! Grade entry API routes
//!
//! # Route Structure
//!
//! - `GET /api/manager/grades?subject_id=` - Grades of a subject with totals
//! - `GET /api/manager/grades/:grade_id` - One grade with its components
//! - `POST /api/manager/grades` - Open a grade for a student in a subject
//! - `DELETE /api/manager/grades/:grade_id` - Delete a grade and its components
//! - `POST /api/manager/grades/:grade_id/components` - Add a component
//! - `PUT /api/manager/grades/components/:grade_type_id` - Edit a component
//! - `PATCH /api/manager/grades/components/:grade_type_id/status` - Activate or deactivate

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, patch, post, put},
    Router,
};
use serde_json::json;
use sqlx::PgPool;

use super::commands::{
    self, AddComponentCommand, AddComponentError, CreateGradeCommand, CreateGradeError,
    DeleteGradeCommand, DeleteGradeError, UpdateComponentCommand, UpdateComponentError,
    UpdateComponentStatusCommand, UpdateComponentStatusError,
};
use super::queries::{self, GetGradeError, GetGradeQuery, ListGradesError, ListGradesQuery};
use crate::api::extract::ApiJson;
use crate::api::response::ApiResponse;
use crate::error::AppError;

pub const GRADES_PATH: &str = "/api/manager/grades";

pub fn grades_routes() -> Router<PgPool> {
    Router::new()
        .route("/", get(list_grades).post(create_grade))
        .route("/:grade_id", get(get_grade).delete(delete_grade))
        .route("/:grade_id/components", post(add_component))
        .route("/components/:grade_type_id", put(update_component))
        .route("/components/:grade_type_id/status", patch(update_component_status))
}

// ============================================================================
// Command Handlers (Write Operations)
// ============================================================================

/// Open a grade
///
/// # Response
///
/// - `201 Created` - `Location: /api/manager/grades/{grade_id}`
/// - `400 Bad Request` - missing or unknown student/subject
/// - `409 Conflict` - the student already has a grade for the subject
async fn create_grade(
    State(pool): State<PgPool>,
    ApiJson(command): ApiJson<CreateGradeCommand>,
) -> Result<Response, AppError> {
    let grade = commands::create::handle(pool, command).await?;
    let location = format!("{}/{}", GRADES_PATH, grade.grade_id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        ApiResponse::with_message("Grade created successfully", grade),
    )
        .into_response())
}

async fn delete_grade(
    State(pool): State<PgPool>,
    Path(grade_id): Path<i32>,
) -> Result<Response, AppError> {
    commands::delete::handle(pool, DeleteGradeCommand { grade_id }).await?;
    Ok(ApiResponse::message("Grade deleted successfully").into_response())
}

/// Add a component
///
/// ```json
/// { "grade_type_name": "Midterm", "weight": 30, "score": 7.5, "comment": null }
/// ```
async fn add_component(
    State(pool): State<PgPool>,
    Path(grade_id): Path<i32>,
    ApiJson(mut command): ApiJson<AddComponentCommand>,
) -> Result<Response, AppError> {
    command.grade_id = grade_id;
    let component = commands::add_component::handle(pool, command).await?;

    Ok((
        StatusCode::CREATED,
        ApiResponse::with_message("Grade component added", component),
    )
        .into_response())
}

async fn update_component(
    State(pool): State<PgPool>,
    Path(grade_type_id): Path<i32>,
    ApiJson(mut command): ApiJson<UpdateComponentCommand>,
) -> Result<Response, AppError> {
    command.grade_type_id = grade_type_id;
    let component = commands::update_component::handle(pool, command).await?;
    Ok(ApiResponse::with_message("Grade component updated", component).into_response())
}

async fn update_component_status(
    State(pool): State<PgPool>,
    Path(grade_type_id): Path<i32>,
    ApiJson(mut command): ApiJson<UpdateComponentStatusCommand>,
) -> Result<Response, AppError> {
    command.grade_type_id = grade_type_id;
    let status = commands::update_component_status::handle(pool, command).await?;

    Ok(ApiResponse::with_message("Grade component status updated", json!({ "status": status }))
        .into_response())
}

// ============================================================================
// Query Handlers (Read Operations)
// ============================================================================

async fn list_grades(
    State(pool): State<PgPool>,
    Query(query): Query<ListGradesQuery>,
) -> Result<Response, AppError> {
    let rows = queries::list::handle(pool, query).await?;
    Ok(ApiResponse::success(rows).into_response())
}

async fn get_grade(
    State(pool): State<PgPool>,
    Path(grade_id): Path<i32>,
) -> Result<Response, AppError> {
    let detail = queries::get::handle(pool, GetGradeQuery { grade_id }).await?;
    Ok(ApiResponse::success(detail).into_response())
}

// ============================================================================
// Error Handling
// ============================================================================

impl From<CreateGradeError> for AppError {
    fn from(err: CreateGradeError) -> Self {
        match err {
            CreateGradeError::Validation(e) => AppError::Validation(e),
            CreateGradeError::Duplicate { .. } => AppError::conflict(err.to_string()),
            CreateGradeError::UnknownReference { .. } => AppError::bad_request(err.to_string()),
            CreateGradeError::Database(e) => AppError::Database(e),
        }
    }
}

impl From<DeleteGradeError> for AppError {
    fn from(err: DeleteGradeError) -> Self {
        match err {
            DeleteGradeError::NotFound(_) => AppError::not_found(err.to_string()),
            DeleteGradeError::Database(e) => AppError::Database(e),
        }
    }
}

impl From<AddComponentError> for AppError {
    fn from(err: AddComponentError) -> Self {
        match err {
            AddComponentError::Validation(e) => AppError::Validation(e),
            AddComponentError::GradeNotFound(_) => AppError::not_found(err.to_string()),
            AddComponentError::Database(e) => AppError::Database(e),
        }
    }
}

impl From<UpdateComponentError> for AppError {
    fn from(err: UpdateComponentError) -> Self {
        match err {
            UpdateComponentError::Validation(e) => AppError::Validation(e),
            UpdateComponentError::NotFound(_) => AppError::not_found(err.to_string()),
            UpdateComponentError::Database(e) => AppError::Database(e),
        }
    }
}

impl From<UpdateComponentStatusError> for AppError {
    fn from(err: UpdateComponentStatusError) -> Self {
        match err {
            UpdateComponentStatusError::NotFound(_) => AppError::not_found(err.to_string()),
            UpdateComponentStatusError::Database(e) => AppError::Database(e),
        }
    }
}

impl From<ListGradesError> for AppError {
    fn from(err: ListGradesError) -> Self {
        match err {
            ListGradesError::Validation(e) => AppError::Validation(e),
            ListGradesError::Database(e) => AppError::Database(e),
        }
    }
}

impl From<GetGradeError> for AppError {
    fn from(err: GetGradeError) -> Self {
        match err {
            GetGradeError::NotFound(_) => AppError::not_found(err.to_string()),
            GetGradeError::Database(e) => AppError::Database(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::shared::test_helpers::{
        insert_student, insert_subject, json_body, offline_pool, send, TestSchool,
    };

    #[tokio::test]
    async fn test_list_requires_subject() {
        let app = grades_routes().with_state(offline_pool());
        let (status, response) = send(app, "GET", "/", None).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json_body(response).await["errors"]["subject_id"].is_array());
    }

    #[tokio::test]
    async fn test_component_score_out_of_range() {
        let app = grades_routes().with_state(offline_pool());
        let (status, _) = send(
            app,
            "PUT",
            "/components/5",
            Some(json!({ "grade_type_name": "Final", "weight": 40, "score": 12 })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_grade_lifecycle(pool: PgPool) -> sqlx::Result<()> {
        let school = TestSchool::create(&pool).await?;
        let subject_id = insert_subject(&pool, &school, "PRF192", 5.0).await?;
        let student_id = insert_student(&pool, "Nguyen", "An", "HE170001").await?;
        let app = grades_routes().with_state(pool);

        let create = json!({ "student_id": student_id, "subject_id": subject_id });
        let (status, response) = send(app.clone(), "POST", "/", Some(create.clone())).await;
        assert_eq!(status, StatusCode::CREATED);
        let grade_id = json_body(response).await["data"]["grade_id"].as_i64().unwrap();

        let (status, _) = send(app.clone(), "POST", "/", Some(create)).await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, response) = send(
            app.clone(),
            "POST",
            &format!("/{}/components", grade_id),
            Some(json!({ "grade_type_name": "Final", "weight": 100, "score": 6 })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let component_id = json_body(response).await["data"]["grade_type_id"].as_i64().unwrap();

        let (status, _) = send(
            app.clone(),
            "PATCH",
            &format!("/components/{}/status", component_id),
            Some(json!({ "status": false })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (_, response) = send(app.clone(), "GET", &format!("/{}", grade_id), None).await;
        let body = json_body(response).await;
        assert_eq!(body["data"]["total_score"], 0.0);
        assert_eq!(body["data"]["components"][0]["status"], "Inactive");

        let (status, _) = send(app, "DELETE", &format!("/{}", grade_id), None).await;
        assert_eq!(status, StatusCode::OK);
        Ok(())
    }
}
