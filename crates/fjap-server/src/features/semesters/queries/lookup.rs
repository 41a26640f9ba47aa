use fjap_common::LookupItem;
use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::features::shared::lookup::IntLookupRow;

/// Semesters as dropdown options, newest first
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LookupSemestersQuery;

impl Request<Result<Vec<LookupItem>, sqlx::Error>> for LookupSemestersQuery {}

impl crate::cqrs::middleware::Query for LookupSemestersQuery {}

pub async fn handle(pool: PgPool, _query: LookupSemestersQuery) -> Result<Vec<LookupItem>, sqlx::Error> {
    let rows = sqlx::query_as::<_, IntLookupRow>(
        r#"
        SELECT semester_id AS id, name
        FROM semester
        ORDER BY semester_id DESC
        "#,
    )
    .fetch_all(&pool)
    .await?;

    Ok(rows.into_iter().map(LookupItem::from).collect())
}
