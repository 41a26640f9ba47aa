use fjap_common::RecordStatus;
use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Activate (`status: true`) or deactivate a class
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateClassStatusCommand {
    #[serde(skip)]
    pub class_id: String,
    pub status: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum UpdateClassStatusError {
    #[error("Class {0} not found")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<RecordStatus, UpdateClassStatusError>> for UpdateClassStatusCommand {}

impl crate::cqrs::middleware::Command for UpdateClassStatusCommand {}

/// Returns the status now stored for the class
#[tracing::instrument(skip(pool, command), fields(class_id = %command.class_id, status = command.status))]
pub async fn handle(
    pool: PgPool,
    command: UpdateClassStatusCommand,
) -> Result<RecordStatus, UpdateClassStatusError> {
    let status = RecordStatus::from(command.status);

    let result = sqlx::query("UPDATE class SET status = $2, updated_at = NOW() WHERE class_id = $1")
        .bind(&command.class_id)
        .bind(status.as_str())
        .execute(&pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(UpdateClassStatusError::NotFound(command.class_id));
    }

    tracing::info!(status = %status, "Class status updated");
    Ok(status)
}
