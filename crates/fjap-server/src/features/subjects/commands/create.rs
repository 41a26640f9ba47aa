use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use super::SubjectFields;
use crate::features::shared::error_helpers::{check_constraint_violation, ConstraintViolation};
use crate::features::shared::validation::ValidationErrors;
use crate::features::subjects::{Subject, SUBJECT_COLUMNS};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateSubjectCommand {
    pub subject_code: String,
    pub subject_name: String,
    pub description: Option<String>,
    pub pass_mark: f64,
    pub semester_id: i32,
    pub level_id: i32,
    pub class_id: String,
}

#[derive(Debug, thiserror::Error)]
pub enum CreateSubjectError {
    #[error("{0}")]
    Validation(#[from] ValidationErrors),

    #[error("Subject code '{0}' already exists")]
    DuplicateCode(String),

    #[error("Semester, level or class does not exist")]
    UnknownReference,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<Subject, CreateSubjectError>> for CreateSubjectCommand {}

impl crate::cqrs::middleware::Command for CreateSubjectCommand {}

impl CreateSubjectCommand {
    pub(crate) fn fields(&self) -> SubjectFields<'_> {
        SubjectFields {
            subject_code: &self.subject_code,
            subject_name: &self.subject_name,
            description: self.description.as_deref(),
            pass_mark: self.pass_mark,
            semester_id: self.semester_id,
            level_id: self.level_id,
            class_id: &self.class_id,
        }
    }
}

#[tracing::instrument(skip(pool, command), fields(subject_code = %command.subject_code))]
pub async fn handle(pool: PgPool, command: CreateSubjectCommand) -> Result<Subject, CreateSubjectError> {
    command.fields().validate()?;
    let code = command.subject_code.trim().to_string();

    let sql = format!(
        r#"
        INSERT INTO subject
            (subject_code, subject_name, description, pass_mark, semester_id, level_id, class_id)
        VALUES ($1, $2, $3, CAST($4 AS NUMERIC), $5, $6, $7)
        RETURNING {}
        "#,
        SUBJECT_COLUMNS
    );

    let subject = sqlx::query_as::<_, Subject>(&sql)
        .bind(&code)
        .bind(command.subject_name.trim())
        .bind(command.description.as_deref().map(str::trim))
        .bind(command.pass_mark)
        .bind(command.semester_id)
        .bind(command.level_id)
        .bind(&command.class_id)
        .fetch_one(&pool)
        .await
        .map_err(|e| match check_constraint_violation(e) {
            ConstraintViolation::Unique => CreateSubjectError::DuplicateCode(code.clone()),
            ConstraintViolation::ForeignKey => CreateSubjectError::UnknownReference,
            ConstraintViolation::Other(e) => CreateSubjectError::Database(e),
        })?;

    tracing::info!(subject_id = subject.subject_id, "Subject created");
    Ok(subject)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::shared::test_helpers::TestSchool;
    use fjap_common::RecordStatus;

    fn command(school: &TestSchool, code: &str) -> CreateSubjectCommand {
        CreateSubjectCommand {
            subject_code: code.to_string(),
            subject_name: "Programming Fundamentals".to_string(),
            description: Some("Intro course".to_string()),
            pass_mark: 5.0,
            semester_id: school.semester_id,
            level_id: school.level_id,
            class_id: school.class_id.clone(),
        }
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_create_defaults_active(pool: PgPool) -> sqlx::Result<()> {
        let school = TestSchool::create(&pool).await?;
        let subject = handle(pool, command(&school, "PRF192")).await.unwrap();

        assert_eq!(subject.subject_code, "PRF192");
        assert_eq!(subject.status, RecordStatus::Active);
        assert_eq!(subject.pass_mark, 5.0);
        Ok(())
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_duplicate_code(pool: PgPool) -> sqlx::Result<()> {
        let school = TestSchool::create(&pool).await?;
        handle(pool.clone(), command(&school, "PRF192")).await.unwrap();

        let second = handle(pool, command(&school, "PRF192")).await;
        assert!(matches!(second, Err(CreateSubjectError::DuplicateCode(code)) if code == "PRF192"));
        Ok(())
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_unknown_class(pool: PgPool) -> sqlx::Result<()> {
        let school = TestSchool::create(&pool).await?;
        let mut cmd = command(&school, "MAE101");
        cmd.class_id = "CLNOPE".to_string();

        let result = handle(pool, cmd).await;
        assert!(matches!(result, Err(CreateSubjectError::UnknownReference)));
        Ok(())
    }
}
