use fjap_common::LookupItem;
use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::features::shared::lookup::IntLookupRow;

/// Levels as dropdown options, alphabetical
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LookupLevelsQuery;

impl Request<Result<Vec<LookupItem>, sqlx::Error>> for LookupLevelsQuery {}

impl crate::cqrs::middleware::Query for LookupLevelsQuery {}

pub async fn handle(pool: PgPool, _query: LookupLevelsQuery) -> Result<Vec<LookupItem>, sqlx::Error> {
    let rows = sqlx::query_as::<_, IntLookupRow>(
        "SELECT level_id AS id, level_name AS name FROM level ORDER BY level_name",
    )
    .fetch_all(&pool)
    .await?;

    Ok(rows.into_iter().map(LookupItem::from).collect())
}
