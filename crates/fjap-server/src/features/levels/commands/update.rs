use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use super::LEVEL_NAME_MAX_LENGTH;
use crate::features::levels::Level;
use crate::features::shared::error_helpers::is_unique_violation;
use crate::features::shared::validation::{validate_required_text, ValidationErrors};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateLevelCommand {
    #[serde(skip)]
    pub level_id: i32,
    pub level_name: String,
}

#[derive(Debug, thiserror::Error)]
pub enum UpdateLevelError {
    #[error("{0}")]
    Validation(#[from] ValidationErrors),

    #[error("Level {0} not found")]
    NotFound(i32),

    #[error("Level '{0}' already exists")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<Level, UpdateLevelError>> for UpdateLevelCommand {}

impl crate::cqrs::middleware::Command for UpdateLevelCommand {}

#[tracing::instrument(skip(pool, command), fields(level_id = command.level_id))]
pub async fn handle(pool: PgPool, command: UpdateLevelCommand) -> Result<Level, UpdateLevelError> {
    validate_required_text(&command.level_name, "level_name", "Level name", LEVEL_NAME_MAX_LENGTH)
        .map_err(ValidationErrors::from)?;
    let name = command.level_name.trim().to_string();

    sqlx::query_as::<_, Level>(
        r#"
        UPDATE level SET level_name = $2
        WHERE level_id = $1
        RETURNING level_id, level_name
        "#,
    )
    .bind(command.level_id)
    .bind(&name)
    .fetch_optional(&pool)
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            UpdateLevelError::Duplicate(name.clone())
        } else {
            UpdateLevelError::Database(e)
        }
    })?
    .ok_or(UpdateLevelError::NotFound(command.level_id))
}
