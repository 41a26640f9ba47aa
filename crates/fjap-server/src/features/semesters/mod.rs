pub mod commands;
pub mod queries;
pub mod routes;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub use commands::{
    CreateSemesterCommand, CreateSemesterError, DeleteSemesterCommand, DeleteSemesterError,
    UpdateSemesterCommand, UpdateSemesterError,
};
pub use queries::{GetSemesterError, GetSemesterQuery, ListSemestersQuery, LookupSemestersQuery};
pub use routes::semesters_routes;

/// Semester record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Semester {
    pub semester_id: i32,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}
