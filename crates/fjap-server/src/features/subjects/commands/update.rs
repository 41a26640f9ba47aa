use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use super::SubjectFields;
use crate::features::shared::error_helpers::{check_constraint_violation, ConstraintViolation};
use crate::features::shared::validation::ValidationErrors;
use crate::features::subjects::{Subject, SUBJECT_COLUMNS};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateSubjectCommand {
    #[serde(skip)]
    pub subject_id: i32,
    pub subject_code: String,
    pub subject_name: String,
    pub description: Option<String>,
    pub pass_mark: f64,
    pub semester_id: i32,
    pub level_id: i32,
    pub class_id: String,
}

#[derive(Debug, thiserror::Error)]
pub enum UpdateSubjectError {
    #[error("{0}")]
    Validation(#[from] ValidationErrors),

    #[error("Subject {0} not found")]
    NotFound(i32),

    #[error("Subject code '{0}' already exists")]
    DuplicateCode(String),

    #[error("Semester, level or class does not exist")]
    UnknownReference,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<Subject, UpdateSubjectError>> for UpdateSubjectCommand {}

impl crate::cqrs::middleware::Command for UpdateSubjectCommand {}

#[tracing::instrument(skip(pool, command), fields(subject_id = command.subject_id))]
pub async fn handle(pool: PgPool, command: UpdateSubjectCommand) -> Result<Subject, UpdateSubjectError> {
    SubjectFields {
        subject_code: &command.subject_code,
        subject_name: &command.subject_name,
        description: command.description.as_deref(),
        pass_mark: command.pass_mark,
        semester_id: command.semester_id,
        level_id: command.level_id,
        class_id: &command.class_id,
    }
    .validate()?;
    let code = command.subject_code.trim().to_string();

    let sql = format!(
        r#"
        UPDATE subject
        SET subject_code = $2,
            subject_name = $3,
            description = $4,
            pass_mark = CAST($5 AS NUMERIC),
            semester_id = $6,
            level_id = $7,
            class_id = $8
        WHERE subject_id = $1
        RETURNING {}
        "#,
        SUBJECT_COLUMNS
    );

    sqlx::query_as::<_, Subject>(&sql)
        .bind(command.subject_id)
        .bind(&code)
        .bind(command.subject_name.trim())
        .bind(command.description.as_deref().map(str::trim))
        .bind(command.pass_mark)
        .bind(command.semester_id)
        .bind(command.level_id)
        .bind(&command.class_id)
        .fetch_optional(&pool)
        .await
        .map_err(|e| match check_constraint_violation(e) {
            ConstraintViolation::Unique => UpdateSubjectError::DuplicateCode(code.clone()),
            ConstraintViolation::ForeignKey => UpdateSubjectError::UnknownReference,
            ConstraintViolation::Other(e) => UpdateSubjectError::Database(e),
        })?
        .ok_or(UpdateSubjectError::NotFound(command.subject_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::shared::test_helpers::{insert_subject, TestSchool};

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_update_changes_fields(pool: PgPool) -> sqlx::Result<()> {
        let school = TestSchool::create(&pool).await?;
        let subject_id = insert_subject(&pool, &school, "PRF192", 5.0).await?;

        let updated = handle(
            pool,
            UpdateSubjectCommand {
                subject_id,
                subject_code: "PRF193".to_string(),
                subject_name: "Programming II".to_string(),
                description: None,
                pass_mark: 4.5,
                semester_id: school.semester_id,
                level_id: school.level_id,
                class_id: school.class_id.clone(),
            },
        )
        .await
        .unwrap();

        assert_eq!(updated.subject_code, "PRF193");
        assert_eq!(updated.pass_mark, 4.5);
        assert_eq!(updated.description, None);
        Ok(())
    }
}
