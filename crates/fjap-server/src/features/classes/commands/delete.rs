use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::features::shared::error_helpers::is_foreign_key_violation;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteClassCommand {
    pub class_id: String,
}

#[derive(Debug, thiserror::Error)]
pub enum DeleteClassError {
    #[error("Class {0} not found")]
    NotFound(String),

    #[error("Cannot delete class {0}: it still has subjects or enrollments")]
    InUse(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<(), DeleteClassError>> for DeleteClassCommand {}

impl crate::cqrs::middleware::Command for DeleteClassCommand {}

#[tracing::instrument(skip(pool, command), fields(class_id = %command.class_id))]
pub async fn handle(pool: PgPool, command: DeleteClassCommand) -> Result<(), DeleteClassError> {
    let result = sqlx::query("DELETE FROM class WHERE class_id = $1")
        .bind(&command.class_id)
        .execute(&pool)
        .await
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                DeleteClassError::InUse(command.class_id.clone())
            } else {
                DeleteClassError::Database(e)
            }
        })?;

    if result.rows_affected() == 0 {
        return Err(DeleteClassError::NotFound(command.class_id));
    }

    tracing::info!("Class deleted");
    Ok(())
}
