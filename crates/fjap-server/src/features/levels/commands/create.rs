use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use super::LEVEL_NAME_MAX_LENGTH;
use crate::features::levels::Level;
use crate::features::shared::error_helpers::is_unique_violation;
use crate::features::shared::validation::{validate_required_text, ValidationErrors};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateLevelCommand {
    pub level_name: String,
}

#[derive(Debug, thiserror::Error)]
pub enum CreateLevelError {
    #[error("{0}")]
    Validation(#[from] ValidationErrors),

    #[error("Level '{0}' already exists")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<Level, CreateLevelError>> for CreateLevelCommand {}

impl crate::cqrs::middleware::Command for CreateLevelCommand {}

impl CreateLevelCommand {
    pub fn validate(&self) -> Result<(), CreateLevelError> {
        validate_required_text(&self.level_name, "level_name", "Level name", LEVEL_NAME_MAX_LENGTH)
            .map_err(ValidationErrors::from)?;
        Ok(())
    }
}

#[tracing::instrument(skip(pool, command), fields(level_name = %command.level_name))]
pub async fn handle(pool: PgPool, command: CreateLevelCommand) -> Result<Level, CreateLevelError> {
    command.validate()?;
    let name = command.level_name.trim().to_string();

    let level = sqlx::query_as::<_, Level>(
        "INSERT INTO level (level_name) VALUES ($1) RETURNING level_id, level_name",
    )
    .bind(&name)
    .fetch_one(&pool)
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            CreateLevelError::Duplicate(name.clone())
        } else {
            CreateLevelError::Database(e)
        }
    })?;

    tracing::info!(level_id = level.level_id, "Level created");
    Ok(level)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate() {
        let blank = CreateLevelCommand::default();
        assert!(matches!(blank.validate(), Err(CreateLevelError::Validation(_))));

        let ok = CreateLevelCommand {
            level_name: "Level 3".to_string(),
        };
        assert!(ok.validate().is_ok());
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_duplicate_name(pool: PgPool) {
        let command = CreateLevelCommand {
            level_name: "Level 1".to_string(),
        };
        handle(pool.clone(), command.clone()).await.unwrap();

        let second = handle(pool, command).await;
        assert!(matches!(second, Err(CreateLevelError::Duplicate(name)) if name == "Level 1"));
    }
}
