use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::features::grades::Grade;
use crate::features::shared::error_helpers::{check_constraint_violation, ConstraintViolation};
use crate::features::shared::validation::{validate_positive_id, ValidationErrors};

/// Open a grade record for a student in a subject
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateGradeCommand {
    pub student_id: i32,
    pub subject_id: i32,
}

#[derive(Debug, thiserror::Error)]
pub enum CreateGradeError {
    #[error("{0}")]
    Validation(#[from] ValidationErrors),

    #[error("Student {student_id} already has a grade for subject {subject_id}")]
    Duplicate { student_id: i32, subject_id: i32 },

    #[error("Student {student_id} or subject {subject_id} does not exist")]
    UnknownReference { student_id: i32, subject_id: i32 },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<Grade, CreateGradeError>> for CreateGradeCommand {}

impl crate::cqrs::middleware::Command for CreateGradeCommand {}

impl CreateGradeCommand {
    pub fn validate(&self) -> Result<(), CreateGradeError> {
        let mut errors = ValidationErrors::new();
        errors.check(validate_positive_id(self.student_id, "student_id", "Student"));
        errors.check(validate_positive_id(self.subject_id, "subject_id", "Subject"));
        Ok(errors.into_result()?)
    }
}

#[tracing::instrument(skip(pool), fields(student_id = command.student_id, subject_id = command.subject_id))]
pub async fn handle(pool: PgPool, command: CreateGradeCommand) -> Result<Grade, CreateGradeError> {
    command.validate()?;
    let CreateGradeCommand {
        student_id,
        subject_id,
    } = command;

    let grade = sqlx::query_as::<_, Grade>(
        r#"
        INSERT INTO grade (student_id, subject_id)
        VALUES ($1, $2)
        RETURNING grade_id, student_id, subject_id
        "#,
    )
    .bind(student_id)
    .bind(subject_id)
    .fetch_one(&pool)
    .await
    .map_err(|e| match check_constraint_violation(e) {
        ConstraintViolation::Unique => CreateGradeError::Duplicate {
            student_id,
            subject_id,
        },
        ConstraintViolation::ForeignKey => CreateGradeError::UnknownReference {
            student_id,
            subject_id,
        },
        ConstraintViolation::Other(e) => CreateGradeError::Database(e),
    })?;

    tracing::info!(grade_id = grade.grade_id, "Grade created");
    Ok(grade)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::shared::test_helpers::{insert_student, insert_subject, TestSchool};

    #[test]
    fn test_validate_requires_ids() {
        let err = CreateGradeCommand::default().validate().unwrap_err();
        assert!(matches!(
            err,
            CreateGradeError::Validation(e) if e.fields() == vec!["student_id", "subject_id"]
        ));
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_duplicate_pair(pool: PgPool) -> sqlx::Result<()> {
        let school = TestSchool::create(&pool).await?;
        let subject_id = insert_subject(&pool, &school, "PRF192", 5.0).await?;
        let student_id = insert_student(&pool, "Nguyen", "An", "HE170001").await?;
        let command = CreateGradeCommand {
            student_id,
            subject_id,
        };

        handle(pool.clone(), command.clone()).await.unwrap();
        let second = handle(pool, command).await;
        assert!(matches!(second, Err(CreateGradeError::Duplicate { .. })));
        Ok(())
    }
}
