use fjap_common::LookupItem;
use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::features::{levels, semesters};

/// Dropdown data for the class create/edit form
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GetClassOptionsQuery;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassFormOptions {
    pub semesters: Vec<LookupItem>,
    pub levels: Vec<LookupItem>,
}

impl Request<Result<ClassFormOptions, sqlx::Error>> for GetClassOptionsQuery {}

impl crate::cqrs::middleware::Query for GetClassOptionsQuery {}

pub async fn handle(pool: PgPool, _query: GetClassOptionsQuery) -> Result<ClassFormOptions, sqlx::Error> {
    let (semesters, levels) = tokio::try_join!(
        semesters::queries::lookup::handle(pool.clone(), semesters::LookupSemestersQuery),
        levels::queries::lookup::handle(pool.clone(), levels::LookupLevelsQuery),
    )?;

    Ok(ClassFormOptions { semesters, levels })
}
