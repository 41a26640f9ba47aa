use fjap_common::LookupItem;
use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::features::shared::lookup::TextLookupRow;

/// Active classes as dropdown options
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListActiveClassesQuery;

impl Request<Result<Vec<LookupItem>, sqlx::Error>> for ListActiveClassesQuery {}

impl crate::cqrs::middleware::Query for ListActiveClassesQuery {}

pub async fn handle(pool: PgPool, _query: ListActiveClassesQuery) -> Result<Vec<LookupItem>, sqlx::Error> {
    let rows = sqlx::query_as::<_, TextLookupRow>(
        r#"
        SELECT class_id AS id, class_name AS name
        FROM class
        WHERE status = 'Active'
        ORDER BY class_name
        "#,
    )
    .fetch_all(&pool)
    .await?;

    Ok(rows.into_iter().map(LookupItem::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::shared::test_helpers::{insert_class, TestSchool};
    use fjap_common::types::LookupId;

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_only_active_classes(pool: PgPool) -> sqlx::Result<()> {
        let school = TestSchool::create(&pool).await?;
        let hidden = insert_class(&pool, "AA0001", school.semester_id, school.level_id).await?;
        sqlx::query("UPDATE class SET status = 'Inactive' WHERE class_id = $1")
            .bind(&hidden)
            .execute(&pool)
            .await?;

        let items = handle(pool, ListActiveClassesQuery).await?;
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, LookupId::Text(school.class_id));
        assert_eq!(items[0].name, "SE1801");
        Ok(())
    }
}
