use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::features::shared::validation::{validate_positive_id, ValidationErrors};

/// Grades recorded for one subject
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListGradesQuery {
    pub subject_id: Option<i32>,
}

/// Student and running total for one grade
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct GradeSummary {
    pub grade_id: i32,
    pub student_id: i32,
    pub student_code: String,
    pub student_name: String,
    pub subject_id: i32,
    pub total_score: f64,
    pub component_count: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum ListGradesError {
    #[error("{0}")]
    Validation(#[from] ValidationErrors),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<Vec<GradeSummary>, ListGradesError>> for ListGradesQuery {}

impl crate::cqrs::middleware::Query for ListGradesQuery {}

#[tracing::instrument(skip(pool))]
pub async fn handle(pool: PgPool, query: ListGradesQuery) -> Result<Vec<GradeSummary>, ListGradesError> {
    let subject_id = query.subject_id.unwrap_or_default();
    validate_positive_id(subject_id, "subject_id", "Subject").map_err(ValidationErrors::from)?;

    let rows = sqlx::query_as::<_, GradeSummary>(
        r#"
        SELECT
            g.grade_id,
            g.student_id,
            st.student_code,
            u.first_name || ' ' || u.last_name AS student_name,
            g.subject_id,
            COALESCE(SUM(gt.score) FILTER (WHERE gt.status = 'Active'), 0)::float8 AS total_score,
            COUNT(gt.grade_type_id) AS component_count
        FROM grade g
        JOIN student st ON st.student_id = g.student_id
        JOIN "user" u ON u.user_id = st.user_id
        LEFT JOIN grade_type gt ON gt.grade_id = g.grade_id
        WHERE g.subject_id = $1
        GROUP BY g.grade_id, st.student_code, u.first_name, u.last_name
        ORDER BY st.student_code
        "#,
    )
    .bind(subject_id)
    .fetch_all(&pool)
    .await?;

    Ok(rows)
}
