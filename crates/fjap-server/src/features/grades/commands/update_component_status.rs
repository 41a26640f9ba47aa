use fjap_common::RecordStatus;
use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Inactive components stay stored but no longer count towards the total
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateComponentStatusCommand {
    #[serde(skip)]
    pub grade_type_id: i32,
    pub status: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum UpdateComponentStatusError {
    #[error("Grade component {0} not found")]
    NotFound(i32),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<RecordStatus, UpdateComponentStatusError>> for UpdateComponentStatusCommand {}

impl crate::cqrs::middleware::Command for UpdateComponentStatusCommand {}

pub async fn handle(
    pool: PgPool,
    command: UpdateComponentStatusCommand,
) -> Result<RecordStatus, UpdateComponentStatusError> {
    let status = RecordStatus::from(command.status);

    let result = sqlx::query("UPDATE grade_type SET status = $2 WHERE grade_type_id = $1")
        .bind(command.grade_type_id)
        .bind(status.as_str())
        .execute(&pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(UpdateComponentStatusError::NotFound(command.grade_type_id));
    }
    Ok(status)
}
