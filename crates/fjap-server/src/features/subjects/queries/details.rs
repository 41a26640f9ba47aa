use chrono::{DateTime, Utc};
use fjap_common::RecordStatus;
use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Subjects with the names of their class, level and semester
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListSubjectDetailsQuery;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct SubjectDetail {
    pub subject_id: i32,
    pub subject_code: String,
    pub subject_name: String,
    #[sqlx(try_from = "String")]
    pub status: RecordStatus,
    pub description: Option<String>,
    pub pass_mark: f64,
    pub created_at: DateTime<Utc>,
    pub class_id: String,
    pub class_name: String,
    pub level_id: i32,
    pub level_name: String,
    pub semester_id: i32,
    pub semester_name: String,
}

impl Request<Result<Vec<SubjectDetail>, sqlx::Error>> for ListSubjectDetailsQuery {}

impl crate::cqrs::middleware::Query for ListSubjectDetailsQuery {}

pub async fn handle(pool: PgPool, _query: ListSubjectDetailsQuery) -> Result<Vec<SubjectDetail>, sqlx::Error> {
    sqlx::query_as::<_, SubjectDetail>(
        r#"
        SELECT
            s.subject_id,
            s.subject_code,
            s.subject_name,
            s.status,
            s.description,
            s.pass_mark::float8 AS pass_mark,
            s.created_at,
            c.class_id,
            c.class_name,
            l.level_id,
            l.level_name,
            sem.semester_id,
            sem.name AS semester_name
        FROM subject s
        JOIN class c ON c.class_id = s.class_id
        JOIN level l ON l.level_id = s.level_id
        JOIN semester sem ON sem.semester_id = s.semester_id
        ORDER BY s.created_at DESC, s.subject_id DESC
        "#,
    )
    .fetch_all(&pool)
    .await
}
