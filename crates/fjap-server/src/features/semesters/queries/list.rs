use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::features::semesters::Semester;

/// Full semester records ordered by start date, newest first
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListSemestersQuery;

impl Request<Result<Vec<Semester>, sqlx::Error>> for ListSemestersQuery {}

impl crate::cqrs::middleware::Query for ListSemestersQuery {}

pub async fn handle(pool: PgPool, _query: ListSemestersQuery) -> Result<Vec<Semester>, sqlx::Error> {
    sqlx::query_as::<_, Semester>(
        r#"
        SELECT semester_id, name, start_date, end_date
        FROM semester
        ORDER BY start_date DESC, semester_id DESC
        "#,
    )
    .fetch_all(&pool)
    .await
}
