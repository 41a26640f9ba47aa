use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::features::shared::error_helpers::is_foreign_key_violation;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteSemesterCommand {
    pub semester_id: i32,
}

#[derive(Debug, thiserror::Error)]
pub enum DeleteSemesterError {
    #[error("Semester {0} not found")]
    NotFound(i32),

    #[error("Cannot delete semester {0}: classes or subjects still reference it")]
    InUse(i32),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<(), DeleteSemesterError>> for DeleteSemesterCommand {}

impl crate::cqrs::middleware::Command for DeleteSemesterCommand {}

#[tracing::instrument(skip(pool, command), fields(semester_id = command.semester_id))]
pub async fn handle(pool: PgPool, command: DeleteSemesterCommand) -> Result<(), DeleteSemesterError> {
    let result = sqlx::query("DELETE FROM semester WHERE semester_id = $1")
        .bind(command.semester_id)
        .execute(&pool)
        .await
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                DeleteSemesterError::InUse(command.semester_id)
            } else {
                DeleteSemesterError::Database(e)
            }
        })?;

    if result.rows_affected() == 0 {
        return Err(DeleteSemesterError::NotFound(command.semester_id));
    }

    tracing::info!("Semester deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::shared::test_helpers::TestSchool;

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_referenced_semester_is_in_use(pool: PgPool) -> sqlx::Result<()> {
        let school = TestSchool::create(&pool).await?;
        let result = handle(
            pool,
            DeleteSemesterCommand {
                semester_id: school.semester_id,
            },
        )
        .await;
        assert!(matches!(result, Err(DeleteSemesterError::InUse(_))));
        Ok(())
    }
}
