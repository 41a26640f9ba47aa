use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::features::semesters::Semester;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetSemesterQuery {
    pub semester_id: i32,
}

#[derive(Debug, thiserror::Error)]
pub enum GetSemesterError {
    #[error("Semester {0} not found")]
    NotFound(i32),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<Semester, GetSemesterError>> for GetSemesterQuery {}

impl crate::cqrs::middleware::Query for GetSemesterQuery {}

pub async fn handle(pool: PgPool, query: GetSemesterQuery) -> Result<Semester, GetSemesterError> {
    sqlx::query_as::<_, Semester>(
        "SELECT semester_id, name, start_date, end_date FROM semester WHERE semester_id = $1",
    )
    .bind(query.semester_id)
    .fetch_optional(&pool)
    .await?
    .ok_or(GetSemesterError::NotFound(query.semester_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::shared::test_helpers::{date, insert_semester};

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_get_existing_and_missing(pool: PgPool) -> sqlx::Result<()> {
        let id = insert_semester(&pool, "Fall", date(2025, 9, 1), date(2025, 12, 20)).await?;

        let semester = handle(pool.clone(), GetSemesterQuery { semester_id: id }).await.unwrap();
        assert_eq!(semester.name, "Fall");
        assert_eq!(semester.end_date, date(2025, 12, 20));

        let missing = handle(pool, GetSemesterQuery { semester_id: id + 1 }).await;
        assert!(matches!(missing, Err(GetSemesterError::NotFound(_))));
        Ok(())
    }
}
