//! Student mark report routes
//!
//! # Route Structure
//!
//! - `GET /api/student/mark-report/:student_id` - Full report grouped by semester
//! - `GET /api/student/mark-report/:student_id/semester?semesterName=&year=` - One semester
//! - `GET /api/student/mark-report/:student_id/subject/:subject_id` - One subject

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use sqlx::PgPool;

use super::queries::{
    self, GetMarkReportQuery, GetMarksBySemesterQuery, GetSubjectMarkError, GetSubjectMarkQuery,
    MarksBySemesterError,
};
use crate::error::AppError;
use crate::features::shared::validation::{FieldError, ValidationErrors};

pub fn mark_report_routes() -> Router<PgPool> {
    Router::new()
        .route("/:student_id", get(get_mark_report))
        .route("/:student_id/semester", get(get_marks_by_semester))
        .route("/:student_id/subject/:subject_id", get(get_subject_detail))
}

#[derive(Debug, Deserialize)]
struct SemesterParams {
    #[serde(rename = "semesterName", default)]
    semester_name: String,
    year: Option<i32>,
}

/// Full mark report
///
/// # Response
///
/// - `200 OK` - `{ student_id, student_name, semesters: [...] }`
/// - `404 Not Found` - the student has no graded subjects (or does not exist)
async fn get_mark_report(
    State(pool): State<PgPool>,
    Path(student_id): Path<i32>,
) -> Result<Response, AppError> {
    let report = queries::report::handle(pool, GetMarkReportQuery { student_id }).await?;

    if report.semesters.is_empty() {
        return Err(AppError::not_found("No grades found for this student"));
    }
    Ok(Json(report).into_response())
}

/// Marks for one semester
///
/// `400 Bad Request` when `semesterName` is blank or `year` is missing;
/// an unknown semester yields an empty list.
async fn get_marks_by_semester(
    State(pool): State<PgPool>,
    Path(student_id): Path<i32>,
    Query(params): Query<SemesterParams>,
) -> Result<Response, AppError> {
    let query = GetMarksBySemesterQuery {
        student_id,
        semester_name: params.semester_name,
        year: params.year.unwrap_or_default(),
    };
    let mut errors = ValidationErrors::new();
    if let Err(MarksBySemesterError::Validation(found)) = query.validate() {
        errors.merge(found);
    }
    if params.year.is_none() {
        errors.push(FieldError::new("year", "Year is required"));
    }
    errors.into_result()?;

    let marks = queries::by_semester::handle(pool, query).await?;
    Ok(Json(marks).into_response())
}

async fn get_subject_detail(
    State(pool): State<PgPool>,
    Path((student_id, subject_id)): Path<(i32, i32)>,
) -> Result<Response, AppError> {
    let detail = queries::subject_detail::handle(
        pool,
        GetSubjectMarkQuery {
            student_id,
            subject_id,
        },
    )
    .await?;
    Ok(Json(detail).into_response())
}

impl From<MarksBySemesterError> for AppError {
    fn from(err: MarksBySemesterError) -> Self {
        match err {
            MarksBySemesterError::Validation(e) => AppError::Validation(e),
            MarksBySemesterError::Database(e) => AppError::Database(e),
        }
    }
}

impl From<GetSubjectMarkError> for AppError {
    fn from(err: GetSubjectMarkError) -> Self {
        match err {
            GetSubjectMarkError::NotFound => AppError::not_found(err.to_string()),
            GetSubjectMarkError::Database(e) => AppError::Database(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::shared::test_helpers::{
        insert_component, insert_grade, insert_student, insert_subject, json_body, offline_pool,
        send, TestSchool,
    };
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_blank_semester_name_is_bad_request() {
        let app = mark_report_routes().with_state(offline_pool());
        let (status, response) = send(app, "GET", "/1/semester?semesterName=%20&year=2025", None).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json_body(response).await["errors"]["semesterName"].is_array());
    }

    #[tokio::test]
    async fn test_missing_year_is_bad_request() {
        let app = mark_report_routes().with_state(offline_pool());
        let (status, _) = send(app, "GET", "/1/semester?semesterName=Fall", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_semester_query_reports_both_missing_params() {
        let app = mark_report_routes().with_state(offline_pool());
        let (status, response) = send(app, "GET", "/1/semester?semesterName=", None).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert!(body["errors"]["semesterName"].is_array());
        assert!(body["errors"]["year"].is_array());
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_no_grades_is_not_found(pool: PgPool) -> sqlx::Result<()> {
        let student_id = insert_student(&pool, "Nguyen", "An", "HE170001").await?;
        let app = mark_report_routes().with_state(pool);

        let (status, response) = send(app.clone(), "GET", &format!("/{}", student_id), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json_body(response).await["message"], "No grades found for this student");

        let (status, _) = send(app, "GET", "/999999", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        Ok(())
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_report_and_subject_detail(pool: PgPool) -> sqlx::Result<()> {
        let school = TestSchool::create(&pool).await?;
        let subject_id = insert_subject(&pool, &school, "PRF192", 5.0).await?;
        let student_id = insert_student(&pool, "Nguyen", "An", "HE170001").await?;
        let grade_id = insert_grade(&pool, student_id, subject_id).await?;
        insert_component(&pool, grade_id, "Final", 100.0, 7.0, "Active").await?;
        let app = mark_report_routes().with_state(pool);

        let (status, response) = send(app.clone(), "GET", &format!("/{}", student_id), None).await;
        assert_eq!(status, StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["semesters"][0]["semester_name"], "Fall");
        assert_eq!(body["semesters"][0]["year"], 2024);
        assert_eq!(body["semesters"][0]["subjects"][0]["is_passed"], true);

        let (status, response) = send(
            app.clone(),
            "GET",
            &format!("/{}/subject/{}", student_id, subject_id),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json_body(response).await["total_score"], 7.0);

        let (status, _) = send(app, "GET", &format!("/{}/subject/999999", student_id), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        Ok(())
    }
}
