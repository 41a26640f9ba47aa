use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::features::levels::Level;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetLevelQuery {
    pub level_id: i32,
}

#[derive(Debug, thiserror::Error)]
pub enum GetLevelError {
    #[error("Level {0} not found")]
    NotFound(i32),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<Level, GetLevelError>> for GetLevelQuery {}

impl crate::cqrs::middleware::Query for GetLevelQuery {}

pub async fn handle(pool: PgPool, query: GetLevelQuery) -> Result<Level, GetLevelError> {
    sqlx::query_as::<_, Level>("SELECT level_id, level_name FROM level WHERE level_id = $1")
        .bind(query.level_id)
        .fetch_optional(&pool)
        .await?
        .ok_or(GetLevelError::NotFound(query.level_id))
}
