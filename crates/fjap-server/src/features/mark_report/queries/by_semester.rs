use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use super::{assemble, MarkRow, MARK_ROW_SELECT};
use crate::features::mark_report::StudentMarkReport;
use crate::features::shared::validation::{FieldError, ValidationErrors};

/// Graded subjects of one student in one semester, identified by
/// semester name and start year
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetMarksBySemesterQuery {
    pub student_id: i32,
    pub semester_name: String,
    pub year: i32,
}

#[derive(Debug, thiserror::Error)]
pub enum MarksBySemesterError {
    #[error("{0}")]
    Validation(#[from] ValidationErrors),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<Vec<StudentMarkReport>, MarksBySemesterError>> for GetMarksBySemesterQuery {}

impl crate::cqrs::middleware::Query for GetMarksBySemesterQuery {}

impl GetMarksBySemesterQuery {
    pub fn validate(&self) -> Result<(), MarksBySemesterError> {
        if self.semester_name.trim().is_empty() {
            let error = FieldError::new("semesterName", "Semester name is required");
            return Err(ValidationErrors::from(error).into());
        }
        Ok(())
    }
}

#[tracing::instrument(skip(pool))]
pub async fn handle(
    pool: PgPool,
    query: GetMarksBySemesterQuery,
) -> Result<Vec<StudentMarkReport>, MarksBySemesterError> {
    query.validate()?;

    let rows = sqlx::query_as::<_, MarkRow>(&format!(
        "{} WHERE g.student_id = $1 AND sem.name = $2 \
         AND EXTRACT(YEAR FROM sem.start_date)::int4 = $3 \
         ORDER BY s.subject_code",
        MARK_ROW_SELECT
    ))
    .bind(query.student_id)
    .bind(query.semester_name.trim())
    .bind(query.year)
    .fetch_all(&pool)
    .await?;

    Ok(assemble(&pool, rows).await?)
}
