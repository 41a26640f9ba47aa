use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use super::create::CLASS_NAME_MAX_LENGTH;
use crate::features::shared::error_helpers::is_foreign_key_violation;
use crate::features::shared::validation::{
    validate_positive_id, validate_required_text, ValidationErrors,
};

/// Command to replace a class's name, semester and level
///
/// `class_id` comes from the request path.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateClassCommand {
    #[serde(skip)]
    pub class_id: String,
    pub class_name: String,
    pub semester_id: i32,
    pub level_id: i32,
}

#[derive(Debug, thiserror::Error)]
pub enum UpdateClassError {
    #[error("{0}")]
    Validation(#[from] ValidationErrors),

    #[error("Class {0} not found")]
    NotFound(String),

    #[error("Semester {semester_id} or level {level_id} does not exist")]
    UnknownReference { semester_id: i32, level_id: i32 },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<(), UpdateClassError>> for UpdateClassCommand {}

impl crate::cqrs::middleware::Command for UpdateClassCommand {}

impl UpdateClassCommand {
    pub fn validate(&self) -> Result<(), UpdateClassError> {
        let mut errors = ValidationErrors::new();
        errors.check(validate_required_text(
            &self.class_name,
            "class_name",
            "Class name",
            CLASS_NAME_MAX_LENGTH,
        ));
        errors.check(validate_positive_id(self.semester_id, "semester_id", "Semester"));
        errors.check(validate_positive_id(self.level_id, "level_id", "Level"));
        Ok(errors.into_result()?)
    }
}

#[tracing::instrument(skip(pool, command), fields(class_id = %command.class_id))]
pub async fn handle(pool: PgPool, command: UpdateClassCommand) -> Result<(), UpdateClassError> {
    command.validate()?;

    let result = sqlx::query(
        r#"
        UPDATE class
        SET class_name = $2,
            semester_id = $3,
            level_id = $4,
            updated_at = NOW()
        WHERE class_id = $1
        "#,
    )
    .bind(&command.class_id)
    .bind(command.class_name.trim())
    .bind(command.semester_id)
    .bind(command.level_id)
    .execute(&pool)
    .await
    .map_err(|e| {
        if is_foreign_key_violation(&e) {
            UpdateClassError::UnknownReference {
                semester_id: command.semester_id,
                level_id: command.level_id,
            }
        } else {
            UpdateClassError::Database(e)
        }
    })?;

    if result.rows_affected() == 0 {
        return Err(UpdateClassError::NotFound(command.class_id));
    }

    tracing::info!("Class updated");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::shared::test_helpers::TestSchool;

    #[test]
    fn test_validation() {
        let mut cmd = UpdateClassCommand {
            class_id: "CL1".to_string(),
            class_name: "SE1801".to_string(),
            semester_id: 1,
            level_id: 1,
        };
        assert!(cmd.validate().is_ok());

        cmd.class_name = String::new();
        assert!(matches!(cmd.validate(), Err(UpdateClassError::Validation(_))));
    }

    #[test]
    fn test_path_id_is_not_read_from_body() {
        let cmd: UpdateClassCommand = serde_json::from_str(
            r#"{"class_id":"CLHIJACK","class_name":"SE1801","semester_id":1,"level_id":1}"#,
        )
        .unwrap();
        assert!(cmd.class_id.is_empty());
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_update_missing_class_is_not_found(pool: PgPool) -> sqlx::Result<()> {
        let school = TestSchool::create(&pool).await?;

        let result = handle(
            pool.clone(),
            UpdateClassCommand {
                class_id: "CLDOESNOTEXIST".to_string(),
                class_name: "X".to_string(),
                semester_id: school.semester_id,
                level_id: school.level_id,
            },
        )
        .await;

        assert!(matches!(result, Err(UpdateClassError::NotFound(_))));

        let unchanged: String = sqlx::query_scalar("SELECT class_name FROM class WHERE class_id = $1")
            .bind(&school.class_id)
            .fetch_one(&pool)
            .await?;
        assert_eq!(unchanged, "SE1801");
        Ok(())
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_update_existing_class(pool: PgPool) -> sqlx::Result<()> {
        let school = TestSchool::create(&pool).await?;

        handle(
            pool.clone(),
            UpdateClassCommand {
                class_id: school.class_id.clone(),
                class_name: "SE1901".to_string(),
                semester_id: school.semester_id,
                level_id: school.level_id,
            },
        )
        .await
        .unwrap();

        let name: String = sqlx::query_scalar("SELECT class_name FROM class WHERE class_id = $1")
            .bind(&school.class_id)
            .fetch_one(&pool)
            .await?;
        assert_eq!(name, "SE1901");
        Ok(())
    }
}
