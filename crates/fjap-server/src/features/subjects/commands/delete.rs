use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::features::shared::error_helpers::is_foreign_key_violation;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteSubjectCommand {
    pub subject_id: i32,
}

#[derive(Debug, thiserror::Error)]
pub enum DeleteSubjectError {
    #[error("Subject {0} not found")]
    NotFound(i32),

    #[error("Cannot delete subject {0}: grades have been recorded for it")]
    InUse(i32),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<(), DeleteSubjectError>> for DeleteSubjectCommand {}

impl crate::cqrs::middleware::Command for DeleteSubjectCommand {}

#[tracing::instrument(skip(pool, command), fields(subject_id = command.subject_id))]
pub async fn handle(pool: PgPool, command: DeleteSubjectCommand) -> Result<(), DeleteSubjectError> {
    let result = sqlx::query("DELETE FROM subject WHERE subject_id = $1")
        .bind(command.subject_id)
        .execute(&pool)
        .await
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                DeleteSubjectError::InUse(command.subject_id)
            } else {
                DeleteSubjectError::Database(e)
            }
        })?;

    if result.rows_affected() == 0 {
        return Err(DeleteSubjectError::NotFound(command.subject_id));
    }

    tracing::info!("Subject deleted");
    Ok(())
}
