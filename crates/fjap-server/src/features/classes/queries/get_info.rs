use fjap_common::RecordStatus;
use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Fetch the editable fields of one class
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetClassInfoQuery {
    pub class_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ClassEditInfo {
    pub class_id: String,
    pub class_name: String,
    pub semester_id: i32,
    pub level_id: i32,
    #[sqlx(try_from = "String")]
    pub status: RecordStatus,
}

#[derive(Debug, thiserror::Error)]
pub enum GetClassInfoError {
    #[error("Class {0} not found")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<ClassEditInfo, GetClassInfoError>> for GetClassInfoQuery {}

impl crate::cqrs::middleware::Query for GetClassInfoQuery {}

#[tracing::instrument(skip(pool, query), fields(class_id = %query.class_id))]
pub async fn handle(pool: PgPool, query: GetClassInfoQuery) -> Result<ClassEditInfo, GetClassInfoError> {
    sqlx::query_as::<_, ClassEditInfo>(
        r#"
        SELECT class_id, class_name, semester_id, level_id, status
        FROM class
        WHERE class_id = $1
        "#,
    )
    .bind(&query.class_id)
    .fetch_optional(&pool)
    .await?
    .ok_or(GetClassInfoError::NotFound(query.class_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::classes::commands::{create, CreateClassCommand};
    use crate::features::shared::test_helpers::{insert_level, insert_semester, date};

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_create_then_get_info(pool: PgPool) -> sqlx::Result<()> {
        let semester_id = insert_semester(&pool, "Fall", date(2025, 9, 1), date(2025, 12, 20)).await?;
        insert_level(&pool, "Level 1").await?;
        let level_id = insert_level(&pool, "Level 2").await?;
        assert_eq!((semester_id, level_id), (1, 2));

        let created = create::handle(
            pool.clone(),
            CreateClassCommand {
                class_name: "SE1801".to_string(),
                semester_id: 1,
                level_id: 2,
            },
        )
        .await
        .unwrap();

        let info = handle(
            pool,
            GetClassInfoQuery {
                class_id: created.class_id.clone(),
            },
        )
        .await
        .unwrap();

        assert_eq!(info.class_id, created.class_id);
        assert_eq!(info.class_name, "SE1801");
        assert_eq!(info.semester_id, 1);
        assert_eq!(info.level_id, 2);
        assert_eq!(info.status, RecordStatus::Active);
        Ok(())
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_missing_class(pool: PgPool) {
        let result = handle(
            pool,
            GetClassInfoQuery {
                class_id: "CL404".to_string(),
            },
        )
        .await;
        assert!(matches!(result, Err(GetClassInfoError::NotFound(id)) if id == "CL404"));
    }
}
