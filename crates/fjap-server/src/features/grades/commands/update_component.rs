use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use super::validate_component;
use crate::features::grades::{GradeComponent, COMPONENT_COLUMNS};
use crate::features::shared::validation::ValidationErrors;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateComponentCommand {
    #[serde(skip)]
    pub grade_type_id: i32,
    pub grade_type_name: String,
    pub weight: f64,
    pub score: f64,
    pub comment: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum UpdateComponentError {
    #[error("{0}")]
    Validation(#[from] ValidationErrors),

    #[error("Grade component {0} not found")]
    NotFound(i32),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<GradeComponent, UpdateComponentError>> for UpdateComponentCommand {}

impl crate::cqrs::middleware::Command for UpdateComponentCommand {}

#[tracing::instrument(skip(pool, command), fields(grade_type_id = command.grade_type_id))]
pub async fn handle(
    pool: PgPool,
    command: UpdateComponentCommand,
) -> Result<GradeComponent, UpdateComponentError> {
    validate_component(&command.grade_type_name, command.weight, command.score)?;

    let sql = format!(
        r#"
        UPDATE grade_type
        SET grade_type_name = $2,
            weight = CAST($3 AS NUMERIC),
            score = CAST($4 AS NUMERIC),
            comment = $5
        WHERE grade_type_id = $1
        RETURNING {}
        "#,
        COMPONENT_COLUMNS
    );

    sqlx::query_as::<_, GradeComponent>(&sql)
        .bind(command.grade_type_id)
        .bind(command.grade_type_name.trim())
        .bind(command.weight)
        .bind(command.score)
        .bind(command.comment.as_deref())
        .fetch_optional(&pool)
        .await?
        .ok_or(UpdateComponentError::NotFound(command.grade_type_id))
}
