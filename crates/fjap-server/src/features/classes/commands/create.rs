//! Create class command
//!
//! The class identifier is generated here (`CL` + 32 uppercase hex digits)
//! and inserted with the row, so the id returned to the caller is the id
//! stored in the database.

use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::features::classes::generate_class_id;
use crate::features::shared::error_helpers::is_foreign_key_violation;
use crate::features::shared::validation::{
    validate_positive_id, validate_required_text, ValidationErrors,
};

/// Maximum length of a class name
pub const CLASS_NAME_MAX_LENGTH: usize = 200;

/// Command to create a new class
///
/// ```rust,ignore
/// let command = CreateClassCommand {
///     class_name: "SE1801".to_string(),
///     semester_id: 1,
///     level_id: 2,
/// };
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateClassCommand {
    pub class_name: String,
    pub semester_id: i32,
    pub level_id: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateClassResponse {
    pub class_id: String,
    pub message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum CreateClassError {
    #[error("{0}")]
    Validation(#[from] ValidationErrors),

    #[error("Semester {semester_id} or level {level_id} does not exist")]
    UnknownReference { semester_id: i32, level_id: i32 },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<CreateClassResponse, CreateClassError>> for CreateClassCommand {}

impl crate::cqrs::middleware::Command for CreateClassCommand {}

impl CreateClassCommand {
    #[tracing::instrument(skip(self), fields(class_name = %self.class_name))]
    pub fn validate(&self) -> Result<(), CreateClassError> {
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

#[tracing::instrument(
    skip(pool, command),
    fields(
        class_name = %command.class_name,
        semester_id = command.semester_id,
        level_id = command.level_id
    )
)]
pub async fn handle(
    pool: PgPool,
    command: CreateClassCommand,
) -> Result<CreateClassResponse, CreateClassError> {
    command.validate()?;

    let class_id = generate_class_id();

    sqlx::query(
        r#"
        INSERT INTO class (class_id, class_name, semester_id, level_id, status)
        VALUES ($1, $2, $3, $4, 'Active')
        "#,
    )
    .bind(&class_id)
    .bind(command.class_name.trim())
    .bind(command.semester_id)
    .bind(command.level_id)
    .execute(&pool)
    .await
    .map_err(|e| {
        if is_foreign_key_violation(&e) {
            CreateClassError::UnknownReference {
                semester_id: command.semester_id,
                level_id: command.level_id,
            }
        } else {
            CreateClassError::Database(e)
        }
    })?;

    tracing::info!(class_id = %class_id, "Class created");

    Ok(CreateClassResponse {
        class_id,
        message: "Class created successfully".to_string(),
    })
}
