use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::features::subjects::{Subject, SUBJECT_COLUMNS};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetSubjectQuery {
    pub subject_id: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetSubjectByCodeQuery {
    pub subject_code: String,
}

#[derive(Debug, thiserror::Error)]
pub enum GetSubjectError {
    #[error("Subject {0} not found")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<Subject, GetSubjectError>> for GetSubjectQuery {}

impl crate::cqrs::middleware::Query for GetSubjectQuery {}

impl Request<Result<Subject, GetSubjectError>> for GetSubjectByCodeQuery {}

impl crate::cqrs::middleware::Query for GetSubjectByCodeQuery {}

pub async fn handle(pool: PgPool, query: GetSubjectQuery) -> Result<Subject, GetSubjectError> {
    sqlx::query_as::<_, Subject>(&format!(
        "SELECT {} FROM subject WHERE subject_id = $1",
        SUBJECT_COLUMNS
    ))
    .bind(query.subject_id)
    .fetch_optional(&pool)
    .await?
    .ok_or_else(|| GetSubjectError::NotFound(query.subject_id.to_string()))
}

/// Codes are matched exactly, as stored
pub async fn handle_by_code(pool: PgPool, query: GetSubjectByCodeQuery) -> Result<Subject, GetSubjectError> {
    sqlx::query_as::<_, Subject>(&format!(
        "SELECT {} FROM subject WHERE subject_code = $1",
        SUBJECT_COLUMNS
    ))
    .bind(&query.subject_code)
    .fetch_optional(&pool)
    .await?
    .ok_or(GetSubjectError::NotFound(query.subject_code))
}
