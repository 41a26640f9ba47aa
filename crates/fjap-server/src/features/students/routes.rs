//! Student directory routes
//!
//! - `GET /api/manager/students?search=&page=&per_page=` - Paginated students
//! - `GET /api/manager/students/:student_id` - One student with enrolled class ids

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use sqlx::PgPool;

use super::queries::{self, GetStudentError, GetStudentQuery, ListStudentsQuery};
use crate::api::response::ApiResponse;
use crate::error::AppError;

pub fn students_routes() -> Router<PgPool> {
    Router::new()
        .route("/", get(list_students))
        .route("/:student_id", get(get_student))
}

async fn list_students(
    State(pool): State<PgPool>,
    Query(query): Query<ListStudentsQuery>,
) -> Result<Response, AppError> {
    let page = queries::list::handle(pool, query).await?;
    Ok(ApiResponse::success(page).into_response())
}

async fn get_student(
    State(pool): State<PgPool>,
    Path(student_id): Path<i32>,
) -> Result<Response, AppError> {
    let student = queries::get::handle(pool, GetStudentQuery { student_id }).await?;
    Ok(Json(student).into_response())
}

impl From<GetStudentError> for AppError {
    fn from(err: GetStudentError) -> Self {
        match err {
            GetStudentError::NotFound(_) => AppError::not_found(err.to_string()),
            GetStudentError::Database(e) => AppError::Database(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::shared::test_helpers::{insert_student, json_body, send};
    use axum::http::StatusCode;

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_list_and_get(pool: PgPool) -> sqlx::Result<()> {
        let student_id = insert_student(&pool, "Nguyen", "An", "HE170001").await?;
        let app = students_routes().with_state(pool);

        let (status, response) = send(app.clone(), "GET", "/?search=HE17", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json_body(response).await["data"]["items"][0]["first_name"], "Nguyen");

        let (status, response) = send(app.clone(), "GET", &format!("/{}", student_id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json_body(response).await["class_ids"], serde_json::json!([]));

        let (status, _) = send(app, "GET", "/999999", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        Ok(())
    }
}
