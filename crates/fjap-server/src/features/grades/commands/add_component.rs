use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use super::validate_component;
use crate::features::grades::{GradeComponent, COMPONENT_COLUMNS};
use crate::features::shared::error_helpers::is_foreign_key_violation;
use crate::features::shared::validation::ValidationErrors;

/// Add a component such as `Midterm` to an existing grade
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AddComponentCommand {
    #[serde(skip)]
    pub grade_id: i32,
    pub grade_type_name: String,
    pub weight: f64,
    pub score: f64,
    pub comment: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum AddComponentError {
    #[error("{0}")]
    Validation(#[from] ValidationErrors),

    #[error("Grade {0} not found")]
    GradeNotFound(i32),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<GradeComponent, AddComponentError>> for AddComponentCommand {}

impl crate::cqrs::middleware::Command for AddComponentCommand {}

#[tracing::instrument(skip(pool, command), fields(grade_id = command.grade_id, grade_type_name = %command.grade_type_name))]
pub async fn handle(pool: PgPool, command: AddComponentCommand) -> Result<GradeComponent, AddComponentError> {
    validate_component(&command.grade_type_name, command.weight, command.score)?;

    let sql = format!(
        r#"
        INSERT INTO grade_type (grade_id, grade_type_name, weight, score, comment)
        VALUES ($1, $2, CAST($3 AS NUMERIC), CAST($4 AS NUMERIC), $5)
        RETURNING {}
        "#,
        COMPONENT_COLUMNS
    );

    sqlx::query_as::<_, GradeComponent>(&sql)
        .bind(command.grade_id)
        .bind(command.grade_type_name.trim())
        .bind(command.weight)
        .bind(command.score)
        .bind(command.comment.as_deref())
        .fetch_one(&pool)
        .await
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                AddComponentError::GradeNotFound(command.grade_id)
            } else {
                AddComponentError::Database(e)
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::shared::test_helpers::{insert_grade, insert_student, insert_subject, TestSchool};
    use fjap_common::RecordStatus;

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_add_component(pool: PgPool) -> sqlx::Result<()> {
        let school = TestSchool::create(&pool).await?;
        let subject_id = insert_subject(&pool, &school, "PRF192", 5.0).await?;
        let student_id = insert_student(&pool, "Nguyen", "An", "HE170001").await?;
        let grade_id = insert_grade(&pool, student_id, subject_id).await?;

        let component = handle(
            pool.clone(),
            AddComponentCommand {
                grade_id,
                grade_type_name: "Midterm".to_string(),
                weight: 30.0,
                score: 2.25,
                comment: Some("Good".to_string()),
            },
        )
        .await
        .unwrap();
        assert_eq!(component.score, 2.25);
        assert_eq!(component.status, RecordStatus::Active);

        let missing = handle(
            pool,
            AddComponentCommand {
                grade_id: grade_id + 100,
                grade_type_name: "Final".to_string(),
                weight: 70.0,
                score: 5.0,
                comment: None,
            },
        )
        .await;
        assert!(matches!(missing, Err(AddComponentError::GradeNotFound(_))));
        Ok(())
    }
}
