use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::features::subjects::{Subject, SUBJECT_COLUMNS};

/// Which parent a subject listing is restricted to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "scope", content = "id", rename_all = "snake_case")]
pub enum SubjectScope {
    Class(String),
    Semester(i32),
    Level(i32),
}

/// Subjects of one class, semester or level ordered by code
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListSubjectsByQuery {
    pub scope: SubjectScope,
}

impl Request<Result<Vec<Subject>, sqlx::Error>> for ListSubjectsByQuery {}

impl crate::cqrs::middleware::Query for ListSubjectsByQuery {}

#[tracing::instrument(skip(pool))]
pub async fn handle(pool: PgPool, query: ListSubjectsByQuery) -> Result<Vec<Subject>, sqlx::Error> {
    let column = match query.scope {
        SubjectScope::Class(_) => "class_id",
        SubjectScope::Semester(_) => "semester_id",
        SubjectScope::Level(_) => "level_id",
    };
    let sql = format!(
        "SELECT {} FROM subject WHERE {} = $1 ORDER BY subject_code",
        SUBJECT_COLUMNS, column
    );

    let rows = sqlx::query_as::<_, Subject>(&sql);
    let rows = match query.scope {
        SubjectScope::Class(class_id) => rows.bind(class_id),
        SubjectScope::Semester(id) | SubjectScope::Level(id) => rows.bind(id),
    };
    rows.fetch_all(&pool).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::shared::test_helpers::{date, insert_subject, TestSchool};

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_each_scope(pool: PgPool) -> sqlx::Result<()> {
        let fall = TestSchool::create(&pool).await?;
        let spring = TestSchool::with_semester(&pool, "Spring", date(2025, 1, 5), date(2025, 4, 30)).await?;
        insert_subject(&pool, &fall, "PRF192", 5.0).await?;
        insert_subject(&pool, &fall, "MAE101", 5.0).await?;
        insert_subject(&pool, &spring, "PRO192", 5.0).await?;

        let scoped = |scope| handle(pool.clone(), ListSubjectsByQuery { scope });

        let codes: Vec<String> = scoped(SubjectScope::Class(fall.class_id.clone()))
            .await?
            .into_iter()
            .map(|s| s.subject_code)
            .collect();
        assert_eq!(codes, vec!["MAE101", "PRF192"]);

        assert_eq!(scoped(SubjectScope::Semester(spring.semester_id)).await?.len(), 1);
        assert_eq!(scoped(SubjectScope::Level(fall.level_id)).await?.len(), 2);
        Ok(())
    }
}
