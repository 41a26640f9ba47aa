use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::features::shared::pagination::{Paginated, PaginationParams};

/// Students matching an optional name, code or email search
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListStudentsQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct StudentListItem {
    pub student_id: i32,
    pub student_code: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl Request<Result<Paginated<StudentListItem>, sqlx::Error>> for ListStudentsQuery {}

impl crate::cqrs::middleware::Query for ListStudentsQuery {}

#[tracing::instrument(skip(pool))]
pub async fn handle(
    pool: PgPool,
    query: ListStudentsQuery,
) -> Result<Paginated<StudentListItem>, sqlx::Error> {
    let params = PaginationParams::new(query.page, query.per_page);
    let pattern = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .map(|term| format!("%{}%", term));

    let total: i64 = sqlx::query_scalar(
        r#"
        SELECT COUNT(*)
        FROM student st
        JOIN "user" u ON u.user_id = st.user_id
        WHERE ($1::TEXT IS NULL
               OR st.student_code ILIKE $1
               OR u.email ILIKE $1
               OR (u.first_name || ' ' || u.last_name) ILIKE $1)
        "#,
    )
    .bind(pattern.as_deref())
    .fetch_one(&pool)
    .await?;

    let items = sqlx::query_as::<_, StudentListItem>(
        r#"
        SELECT st.student_id, st.student_code, u.first_name, u.last_name, u.email
        FROM student st
        JOIN "user" u ON u.user_id = st.user_id
        WHERE ($1::TEXT IS NULL
               OR st.student_code ILIKE $1
               OR u.email ILIKE $1
               OR (u.first_name || ' ' || u.last_name) ILIKE $1)
        ORDER BY st.student_code
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(pattern.as_deref())
    .bind(params.per_page())
    .bind(params.offset())
    .fetch_all(&pool)
    .await?;

    Ok(Paginated::from_items(items, &params, total))
}
