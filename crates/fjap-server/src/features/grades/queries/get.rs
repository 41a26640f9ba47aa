use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::features::grades::{total_score, GradeComponent, COMPONENT_COLUMNS, COMPONENT_ORDER};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetGradeQuery {
    pub grade_id: i32,
}

/// A grade with every component, active or not
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeDetail {
    pub grade_id: i32,
    pub student_id: i32,
    pub student_code: String,
    pub student_name: String,
    pub subject_id: i32,
    pub subject_code: String,
    pub subject_name: String,
    pub pass_mark: f64,
    pub components: Vec<GradeComponent>,
    pub total_score: f64,
    pub is_passed: bool,
}

#[derive(Debug, sqlx::FromRow)]
struct GradeHeaderRow {
    grade_id: i32,
    student_id: i32,
    student_code: String,
    student_name: String,
    subject_id: i32,
    subject_code: String,
    subject_name: String,
    pass_mark: f64,
}

#[derive(Debug, thiserror::Error)]
pub enum GetGradeError {
    #[error("Grade {0} not found")]
    NotFound(i32),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<GradeDetail, GetGradeError>> for GetGradeQuery {}

impl crate::cqrs::middleware::Query for GetGradeQuery {}

#[tracing::instrument(skip(pool, query), fields(grade_id = query.grade_id))]
pub async fn handle(pool: PgPool, query: GetGradeQuery) -> Result<GradeDetail, GetGradeError> {
    let header = sqlx::query_as::<_, GradeHeaderRow>(
        r#"
        SELECT
            g.grade_id,
            g.student_id,
            st.student_code,
            u.first_name || ' ' || u.last_name AS student_name,
            s.subject_id,
            s.subject_code,
            s.subject_name,
            s.pass_mark::float8 AS pass_mark
        FROM grade g
        JOIN student st ON st.student_id = g.student_id
        JOIN "user" u ON u.user_id = st.user_id
        JOIN subject s ON s.subject_id = g.subject_id
        WHERE g.grade_id = $1
        "#,
    )
    .bind(query.grade_id)
    .fetch_optional(&pool)
    .await?
    .ok_or(GetGradeError::NotFound(query.grade_id))?;

    let components = sqlx::query_as::<_, GradeComponent>(&format!(
        "SELECT {} FROM grade_type WHERE grade_id = $1 ORDER BY {}, grade_type_id",
        COMPONENT_COLUMNS, COMPONENT_ORDER
    ))
    .bind(query.grade_id)
    .fetch_all(&pool)
    .await?;

    let total = total_score(&components);
    Ok(GradeDetail {
        grade_id: header.grade_id,
        student_id: header.student_id,
        student_code: header.student_code,
        student_name: header.student_name,
        subject_id: header.subject_id,
        subject_code: header.subject_code,
        subject_name: header.subject_name,
        pass_mark: header.pass_mark,
        components,
        total_score: total,
        is_passed: total >= header.pass_mark,
    })
}
