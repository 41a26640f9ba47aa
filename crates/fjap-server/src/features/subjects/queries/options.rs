use fjap_common::LookupItem;
use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::features::{classes, levels, semesters};

/// Dropdown data for the subject create/edit form
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GetSubjectOptionsQuery;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectFormOptions {
    pub semesters: Vec<LookupItem>,
    pub levels: Vec<LookupItem>,
    pub classes: Vec<LookupItem>,
}

impl Request<Result<SubjectFormOptions, sqlx::Error>> for GetSubjectOptionsQuery {}

impl crate::cqrs::middleware::Query for GetSubjectOptionsQuery {}

pub async fn handle(pool: PgPool, _query: GetSubjectOptionsQuery) -> Result<SubjectFormOptions, sqlx::Error> {
    let (semesters, levels, classes) = tokio::try_join!(
        semesters::queries::lookup::handle(pool.clone(), semesters::LookupSemestersQuery),
        levels::queries::lookup::handle(pool.clone(), levels::LookupLevelsQuery),
        classes::queries::list_active::handle(pool.clone(), classes::ListActiveClassesQuery),
    )?;

    Ok(SubjectFormOptions {
        semesters,
        levels,
        classes,
    })
}
