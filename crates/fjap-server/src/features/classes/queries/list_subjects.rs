use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Subjects taught in one class with their enrolment counts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListClassSubjectsQuery {
    pub class_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ClassSubjectDetail {
    pub class_id: String,
    pub class_name: String,
    pub subject_id: i32,
    pub subject_code: String,
    pub subject_name: String,
    /// Level name of the subject
    pub subject_level: String,
    /// Distinct students enrolled in the class
    pub total_students: i64,
}

impl Request<Result<Vec<ClassSubjectDetail>, sqlx::Error>> for ListClassSubjectsQuery {}

impl crate::cqrs::middleware::Query for ListClassSubjectsQuery {}

#[tracing::instrument(skip(pool, query), fields(class_id = %query.class_id))]
pub async fn handle(
    pool: PgPool,
    query: ListClassSubjectsQuery,
) -> Result<Vec<ClassSubjectDetail>, sqlx::Error> {
    sqlx::query_as::<_, ClassSubjectDetail>(
        r#"
        SELECT
            c.class_id,
            c.class_name,
            sub.subject_id,
            sub.subject_code,
            sub.subject_name,
            l.level_name AS subject_level,
            COUNT(DISTINCT e.student_id) AS total_students
        FROM class c
        JOIN subject sub ON sub.class_id = c.class_id
        JOIN level l ON l.level_id = sub.level_id
        LEFT JOIN enrollment e ON e.class_id = c.class_id
        WHERE c.class_id = $1
        GROUP BY c.class_id, c.class_name, sub.subject_id, sub.subject_code,
                 sub.subject_name, l.level_name
        ORDER BY sub.subject_code
        "#,
    )
    .bind(&query.class_id)
    .fetch_all(&pool)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::shared::test_helpers::{enroll, insert_student, insert_subject, TestSchool};

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_counts_distinct_students(pool: PgPool) -> sqlx::Result<()> {
        let school = TestSchool::create(&pool).await?;
        insert_subject(&pool, &school, "PRF192", 5.0).await?;
        insert_subject(&pool, &school, "CSI104", 5.0).await?;
        for (i, code) in ["HE170001", "HE170002", "HE170003"].iter().enumerate() {
            let student = insert_student(&pool, "Student", &i.to_string(), code).await?;
            enroll(&pool, student, &school.class_id).await?;
        }

        let rows = handle(
            pool,
            ListClassSubjectsQuery {
                class_id: school.class_id.clone(),
            },
        )
        .await?;

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].subject_code, "CSI104");
        assert!(rows.iter().all(|r| r.total_students == 3));
        Ok(())
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_unknown_class_is_empty(pool: PgPool) -> sqlx::Result<()> {
        let rows = handle(
            pool,
            ListClassSubjectsQuery {
                class_id: "CLNONE".to_string(),
            },
        )
        .await?;
        assert!(rows.is_empty());
        Ok(())
    }
}
