use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetStudentQuery {
    pub student_id: i32,
}

/// A student with the classes they are enrolled in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentDetail {
    pub student_id: i32,
    pub student_code: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub class_ids: Vec<String>,
}

#[derive(Debug, sqlx::FromRow)]
struct StudentRow {
    student_id: i32,
    student_code: String,
    first_name: String,
    last_name: String,
    email: String,
}

#[derive(Debug, thiserror::Error)]
pub enum GetStudentError {
    #[error("Student {0} not found")]
    NotFound(i32),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<StudentDetail, GetStudentError>> for GetStudentQuery {}

impl crate::cqrs::middleware::Query for GetStudentQuery {}

pub async fn handle(pool: PgPool, query: GetStudentQuery) -> Result<StudentDetail, GetStudentError> {
    let row = sqlx::query_as::<_, StudentRow>(
        r#"
        SELECT st.student_id, st.student_code, u.first_name, u.last_name, u.email
        FROM student st
        JOIN "user" u ON u.user_id = st.user_id
        WHERE st.student_id = $1
        "#,
    )
    .bind(query.student_id)
    .fetch_optional(&pool)
    .await?
    .ok_or(GetStudentError::NotFound(query.student_id))?;

    let class_ids: Vec<String> = sqlx::query_scalar(
        "SELECT class_id FROM enrollment WHERE student_id = $1 ORDER BY class_id",
    )
    .bind(query.student_id)
    .fetch_all(&pool)
    .await?;

    Ok(StudentDetail {
        student_id: row.student_id,
        student_code: row.student_code,
        first_name: row.first_name,
        last_name: row.last_name,
        email: row.email,
        class_ids,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::shared::test_helpers::{enroll, insert_student, TestSchool};

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_enrolled_classes(pool: PgPool) -> sqlx::Result<()> {
        let school = TestSchool::create(&pool).await?;
        let student_id = insert_student(&pool, "Nguyen", "An", "HE170001").await?;
        enroll(&pool, student_id, &school.class_id).await?;

        let detail = handle(pool.clone(), GetStudentQuery { student_id }).await.unwrap();
        assert_eq!(detail.email, "he170001@fjap.edu.vn");
        assert_eq!(detail.class_ids, vec![school.class_id]);

        let missing = handle(pool, GetStudentQuery { student_id: student_id + 1 }).await;
        assert!(matches!(missing, Err(GetStudentError::NotFound(_))));
        Ok(())
    }
}
