use fjap_common::RecordStatus;
use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateSubjectStatusCommand {
    #[serde(skip)]
    pub subject_id: i32,
    pub status: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum UpdateSubjectStatusError {
    #[error("Subject {0} not found")]
    NotFound(i32),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<RecordStatus, UpdateSubjectStatusError>> for UpdateSubjectStatusCommand {}

impl crate::cqrs::middleware::Command for UpdateSubjectStatusCommand {}

#[tracing::instrument(skip(pool, command), fields(subject_id = command.subject_id, status = command.status))]
pub async fn handle(
    pool: PgPool,
    command: UpdateSubjectStatusCommand,
) -> Result<RecordStatus, UpdateSubjectStatusError> {
    let status = RecordStatus::from(command.status);

    let result = sqlx::query("UPDATE subject SET status = $2 WHERE subject_id = $1")
        .bind(command.subject_id)
        .bind(status.as_str())
        .execute(&pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(UpdateSubjectStatusError::NotFound(command.subject_id));
    }
    Ok(status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::shared::test_helpers::{insert_subject, TestSchool};

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_toggle_is_idempotent(pool: PgPool) -> sqlx::Result<()> {
        let school = TestSchool::create(&pool).await?;
        let subject_id = insert_subject(&pool, &school, "PRF192", 5.0).await?;

        for _ in 0..2 {
            let status = handle(pool.clone(), UpdateSubjectStatusCommand { subject_id, status: false })
                .await
                .unwrap();
            assert_eq!(status, RecordStatus::Inactive);
        }

        let stored: String = sqlx::query_scalar("SELECT status FROM subject WHERE subject_id = $1")
            .bind(subject_id)
            .fetch_one(&pool)
            .await?;
        assert_eq!(stored, "Inactive");
        Ok(())
    }
}
