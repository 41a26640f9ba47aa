use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::features::shared::error_helpers::is_foreign_key_violation;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteLevelCommand {
    pub level_id: i32,
}

#[derive(Debug, thiserror::Error)]
pub enum DeleteLevelError {
    #[error("Level {0} not found")]
    NotFound(i32),

    #[error("Cannot delete level {0}: classes or subjects still reference it")]
    InUse(i32),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<(), DeleteLevelError>> for DeleteLevelCommand {}

impl crate::cqrs::middleware::Command for DeleteLevelCommand {}

#[tracing::instrument(skip(pool, command), fields(level_id = command.level_id))]
pub async fn handle(pool: PgPool, command: DeleteLevelCommand) -> Result<(), DeleteLevelError> {
    let result = sqlx::query("DELETE FROM level WHERE level_id = $1")
        .bind(command.level_id)
        .execute(&pool)
        .await
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                DeleteLevelError::InUse(command.level_id)
            } else {
                DeleteLevelError::Database(e)
            }
        })?;

    if result.rows_affected() == 0 {
        return Err(DeleteLevelError::NotFound(command.level_id));
    }
    Ok(())
}
