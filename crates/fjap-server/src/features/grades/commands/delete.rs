use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteGradeCommand {
    pub grade_id: i32,
}

#[derive(Debug, thiserror::Error)]
pub enum DeleteGradeError {
    #[error("Grade {0} not found")]
    NotFound(i32),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<(), DeleteGradeError>> for DeleteGradeCommand {}

impl crate::cqrs::middleware::Command for DeleteGradeCommand {}

/// Deletes the components and then the grade in one transaction
#[tracing::instrument(skip(pool, command), fields(grade_id = command.grade_id))]
pub async fn handle(pool: PgPool, command: DeleteGradeCommand) -> Result<(), DeleteGradeError> {
    let mut tx = pool.begin().await?;

    let components = sqlx::query("DELETE FROM grade_type WHERE grade_id = $1")
        .bind(command.grade_id)
        .execute(&mut *tx)
        .await?;

    let result = sqlx::query("DELETE FROM grade WHERE grade_id = $1")
        .bind(command.grade_id)
        .execute(&mut *tx)
        .await?;

    if result.rows_affected() == 0 {
        tx.rollback().await?;
        return Err(DeleteGradeError::NotFound(command.grade_id));
    }

    tx.commit().await?;
    tracing::info!(components = components.rows_affected(), "Grade deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::shared::test_helpers::{
        insert_component, insert_grade, insert_student, insert_subject, TestSchool,
    };

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_delete_removes_components(pool: PgPool) -> sqlx::Result<()> {
        let school = TestSchool::create(&pool).await?;
        let subject_id = insert_subject(&pool, &school, "PRF192", 5.0).await?;
        let student_id = insert_student(&pool, "Nguyen", "An", "HE170001").await?;
        let grade_id = insert_grade(&pool, student_id, subject_id).await?;
        insert_component(&pool, grade_id, "Midterm", 30.0, 2.0, "Active").await?;
        insert_component(&pool, grade_id, "Final", 70.0, 4.0, "Active").await?;

        handle(pool.clone(), DeleteGradeCommand { grade_id }).await.unwrap();

        let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM grade_type WHERE grade_id = $1")
            .bind(grade_id)
            .fetch_one(&pool)
            .await?;
        assert_eq!(remaining, 0);

        let again = handle(pool, DeleteGradeCommand { grade_id }).await;
        assert!(matches!(again, Err(DeleteGradeError::NotFound(_))));
        Ok(())
    }
}
