//! Filtered, paginated subject listing
//!
//! Every filter is optional; absent filters bind `NULL` and drop out of the
//! `WHERE` clause.

use fjap_common::RecordStatus;
use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::features::shared::pagination::{Paginated, PaginationParams};
use crate::features::shared::validation::{FieldError, ValidationErrors};
use crate::features::subjects::{Subject, SUBJECT_COLUMNS};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListSubjectsQuery {
    /// Case-insensitive match on subject code or name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// `Active` or `Inactive`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub semester_id: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level_id: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<i64>,
}

#[derive(Debug, thiserror::Error)]
pub enum ListSubjectsError {
    #[error("{0}")]
    Validation(#[from] ValidationErrors),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<Paginated<Subject>, ListSubjectsError>> for ListSubjectsQuery {}

impl crate::cqrs::middleware::Query for ListSubjectsQuery {}

impl ListSubjectsQuery {
    pub fn pagination(&self) -> PaginationParams {
        PaginationParams::new(self.page, self.per_page)
    }

    /// Parsed status filter; blank means no filter
    pub fn status_filter(&self) -> Result<Option<RecordStatus>, FieldError> {
        match self.status.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => raw
                .parse::<RecordStatus>()
                .map(Some)
                .map_err(|_| FieldError::new("status", "Status must be Active or Inactive")),
        }
    }

    /// `%term%` pattern for `ILIKE`, or `None` when the term is blank
    pub fn search_pattern(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
            .map(|term| format!("%{}%", term))
    }
}

const FILTER_CLAUSE: &str = r#"
    WHERE ($1::TEXT IS NULL OR subject_code ILIKE $1 OR subject_name ILIKE $1)
      AND ($2::TEXT IS NULL OR status = $2)
      AND ($3::TEXT IS NULL OR class_id = $3)
      AND ($4::INTEGER IS NULL OR semester_id = $4)
      AND ($5::INTEGER IS NULL OR level_id = $5)
"#;

#[tracing::instrument(skip(pool))]
pub async fn handle(pool: PgPool, query: ListSubjectsQuery) -> Result<Paginated<Subject>, ListSubjectsError> {
    let status = query.status_filter().map_err(ValidationErrors::from)?;
    let pattern = query.search_pattern();
    let params = query.pagination();
    let class_id = query.class_id.as_deref().filter(|id| !id.is_empty());

    let total = sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM subject {}", FILTER_CLAUSE))
        .bind(pattern.as_deref())
        .bind(status.map(|s| s.as_str()))
        .bind(class_id)
        .bind(query.semester_id)
        .bind(query.level_id)
        .fetch_one(&pool)
        .await?;

    let sql = format!(
        "SELECT {} FROM subject {} ORDER BY created_at DESC, subject_id DESC LIMIT $6 OFFSET $7",
        SUBJECT_COLUMNS, FILTER_CLAUSE
    );
    let items = sqlx::query_as::<_, Subject>(&sql)
        .bind(pattern.as_deref())
        .bind(status.map(|s| s.as_str()))
        .bind(class_id)
        .bind(query.semester_id)
        .bind(query.level_id)
        .bind(params.per_page())
        .bind(params.offset())
        .fetch_all(&pool)
        .await?;

    Ok(Paginated::from_items(items, &params, total))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::shared::test_helpers::{insert_subject, TestSchool};

    #[test]
    fn test_status_filter() {
        let mut query = ListSubjectsQuery::default();
        assert_eq!(query.status_filter().unwrap(), None);

        query.status = Some("Inactive".to_string());
        assert_eq!(query.status_filter().unwrap(), Some(RecordStatus::Inactive));

        query.status = Some("archived".to_string());
        assert_eq!(query.status_filter().unwrap_err().field, "status");
    }

    #[test]
    fn test_search_pattern() {
        let mut query = ListSubjectsQuery::default();
        assert_eq!(query.search_pattern(), None);

        query.search = Some("  ".to_string());
        assert_eq!(query.search_pattern(), None);

        query.search = Some(" prf ".to_string());
        assert_eq!(query.search_pattern().as_deref(), Some("%prf%"));
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_search_and_paginate(pool: PgPool) -> sqlx::Result<()> {
        let school = TestSchool::create(&pool).await?;
        for code in ["PRF192", "PRO192", "MAE101"] {
            insert_subject(&pool, &school, code, 5.0).await?;
        }

        let page = handle(
            pool.clone(),
            ListSubjectsQuery {
                search: Some("pr".to_string()),
                per_page: Some(1),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.pagination.total, 2);
        assert_eq!(page.pagination.pages, 2);
        assert!(page.pagination.has_next);

        let by_class = handle(
            pool,
            ListSubjectsQuery {
                class_id: Some(school.class_id.clone()),
                status: Some("Active".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(by_class.pagination.total, 3);
        Ok(())
    }
}
