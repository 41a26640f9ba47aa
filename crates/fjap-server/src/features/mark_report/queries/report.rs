use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use super::{assemble, MarkRow, MARK_ROW_SELECT};
use crate::features::mark_report::{group_by_semester, StudentMarkReportResponse};

/// Everything a student has been graded on, grouped by semester
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetMarkReportQuery {
    pub student_id: i32,
}

impl Request<Result<StudentMarkReportResponse, sqlx::Error>> for GetMarkReportQuery {}

impl crate::cqrs::middleware::Query for GetMarkReportQuery {}

#[tracing::instrument(skip(pool, query), fields(student_id = query.student_id))]
pub async fn handle(pool: PgPool, query: GetMarkReportQuery) -> Result<StudentMarkReportResponse, sqlx::Error> {
    let student_name: Option<String> = sqlx::query_scalar(
        r#"
        SELECT u.first_name || ' ' || u.last_name
        FROM student st
        JOIN "user" u ON u.user_id = st.user_id
        WHERE st.student_id = $1
        "#,
    )
    .bind(query.student_id)
    .fetch_optional(&pool)
    .await?;

    let Some(student_name) = student_name else {
        tracing::debug!("Unknown student, returning empty report");
        return Ok(StudentMarkReportResponse {
            student_id: query.student_id,
            ..Default::default()
        });
    };

    let rows = sqlx::query_as::<_, MarkRow>(&format!(
        "{} WHERE g.student_id = $1 ORDER BY sem.start_date DESC, s.subject_code",
        MARK_ROW_SELECT
    ))
    .bind(query.student_id)
    .fetch_all(&pool)
    .await?;

    let subjects = assemble(&pool, rows).await?;
    tracing::debug!(subjects = subjects.len(), "Mark report assembled");

    Ok(StudentMarkReportResponse {
        student_id: query.student_id,
        student_name,
        semesters: group_by_semester(subjects),
    })
}
