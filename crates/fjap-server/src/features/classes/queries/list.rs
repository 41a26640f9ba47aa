use chrono::NaiveDate;
use fjap_common::RecordStatus;
use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// List every class with its semester name and dates
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListClassesQuery;

/// One row of the class table
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ClassListItem {
    pub class_id: String,
    pub class_name: String,
    /// Semester name
    pub semester: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[sqlx(try_from = "String")]
    pub status: RecordStatus,
    pub semester_id: i32,
    pub level_id: i32,
}

impl Request<Result<Vec<ClassListItem>, sqlx::Error>> for ListClassesQuery {}

impl crate::cqrs::middleware::Query for ListClassesQuery {}

/// Newest semester first, then class name
#[tracing::instrument(skip(pool, _query))]
pub async fn handle(pool: PgPool, _query: ListClassesQuery) -> Result<Vec<ClassListItem>, sqlx::Error> {
    sqlx::query_as::<_, ClassListItem>(
        r#"
        SELECT
            c.class_id,
            c.class_name,
            s.name AS semester,
            s.start_date,
            s.end_date,
            c.status,
            c.semester_id,
            c.level_id
        FROM class c
        JOIN semester s ON s.semester_id = c.semester_id
        ORDER BY s.start_date DESC, c.class_name
        "#,
    )
    .fetch_all(&pool)
    .await
}
