use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use super::{assemble, MarkRow, MARK_ROW_SELECT};
use crate::features::mark_report::StudentMarkReport;

/// One graded subject of a student
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetSubjectMarkQuery {
    pub student_id: i32,
    pub subject_id: i32,
}

#[derive(Debug, thiserror::Error)]
pub enum GetSubjectMarkError {
    #[error("Subject not found for this student")]
    NotFound,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<StudentMarkReport, GetSubjectMarkError>> for GetSubjectMarkQuery {}

impl crate::cqrs::middleware::Query for GetSubjectMarkQuery {}

#[tracing::instrument(skip(pool))]
pub async fn handle(pool: PgPool, query: GetSubjectMarkQuery) -> Result<StudentMarkReport, GetSubjectMarkError> {
    let row = sqlx::query_as::<_, MarkRow>(&format!(
        "{} WHERE g.student_id = $1 AND g.subject_id = $2",
        MARK_ROW_SELECT
    ))
    .bind(query.student_id)
    .bind(query.subject_id)
    .fetch_optional(&pool)
    .await?
    .ok_or(GetSubjectMarkError::NotFound)?;

    assemble(&pool, vec![row])
        .await?
        .pop()
        .ok_or(GetSubjectMarkError::NotFound)
}
