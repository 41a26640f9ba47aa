use chrono::NaiveDate;
use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use super::validate_semester_fields;
use crate::features::semesters::Semester;
use crate::features::shared::validation::ValidationErrors;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateSemesterCommand {
    #[serde(skip)]
    pub semester_id: i32,
    pub name: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, thiserror::Error)]
pub enum UpdateSemesterError {
    #[error("{0}")]
    Validation(#[from] ValidationErrors),

    #[error("Semester {0} not found")]
    NotFound(i32),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<Semester, UpdateSemesterError>> for UpdateSemesterCommand {}

impl crate::cqrs::middleware::Command for UpdateSemesterCommand {}

#[tracing::instrument(skip(pool, command), fields(semester_id = command.semester_id))]
pub async fn handle(pool: PgPool, command: UpdateSemesterCommand) -> Result<Semester, UpdateSemesterError> {
    let (start, end) = validate_semester_fields(&command.name, command.start_date, command.end_date)?;

    sqlx::query_as::<_, Semester>(
        r#"
        UPDATE semester
        SET name = $2, start_date = $3, end_date = $4
        WHERE semester_id = $1
        RETURNING semester_id, name, start_date, end_date
        "#,
    )
    .bind(command.semester_id)
    .bind(command.name.trim())
    .bind(start)
    .bind(end)
    .fetch_optional(&pool)
    .await?
    .ok_or(UpdateSemesterError::NotFound(command.semester_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_update_missing_semester(pool: PgPool) {
        let result = handle(
            pool,
            UpdateSemesterCommand {
                semester_id: 77,
                name: "Fall".to_string(),
                start_date: NaiveDate::from_ymd_opt(2025, 9, 1),
                end_date: NaiveDate::from_ymd_opt(2025, 12, 1),
            },
        )
        .await;
        assert!(matches!(result, Err(UpdateSemesterError::NotFound(77))));
    }
}
