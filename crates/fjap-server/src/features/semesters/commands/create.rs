use chrono::NaiveDate;
use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use super::validate_semester_fields;
use crate::features::semesters::Semester;
use crate::features::shared::validation::ValidationErrors;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateSemesterCommand {
    pub name: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, thiserror::Error)]
pub enum CreateSemesterError {
    #[error("{0}")]
    Validation(#[from] ValidationErrors),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<Semester, CreateSemesterError>> for CreateSemesterCommand {}

impl crate::cqrs::middleware::Command for CreateSemesterCommand {}

#[tracing::instrument(skip(pool, command), fields(name = %command.name))]
pub async fn handle(pool: PgPool, command: CreateSemesterCommand) -> Result<Semester, CreateSemesterError> {
    let (start, end) = validate_semester_fields(&command.name, command.start_date, command.end_date)?;

    let semester = sqlx::query_as::<_, Semester>(
        r#"
        INSERT INTO semester (name, start_date, end_date)
        VALUES ($1, $2, $3)
        RETURNING semester_id, name, start_date, end_date
        "#,
    )
    .bind(command.name.trim())
    .bind(start)
    .bind(end)
    .fetch_one(&pool)
    .await?;

    tracing::info!(semester_id = semester.semester_id, "Semester created");
    Ok(semester)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_create_returns_row(pool: PgPool) {
        let semester = handle(
            pool,
            CreateSemesterCommand {
                name: "  Spring 2026 ".to_string(),
                start_date: NaiveDate::from_ymd_opt(2026, 1, 5),
                end_date: NaiveDate::from_ymd_opt(2026, 4, 30),
            },
        )
        .await
        .unwrap();

        assert_eq!(semester.name, "Spring 2026");
        assert!(semester.semester_id > 0);
    }
}
