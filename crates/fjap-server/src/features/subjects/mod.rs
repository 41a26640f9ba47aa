//! Subject catalogue
//!
//! Subjects belong to exactly one class, semester and level. The `pass_mark`
//! stored here is what the mark report compares component totals against.

pub mod commands;
pub mod queries;
pub mod routes;

use chrono::{DateTime, Utc};
use fjap_common::RecordStatus;
use serde::{Deserialize, Serialize};

pub use commands::{
    CreateSubjectCommand, CreateSubjectError, DeleteSubjectCommand, DeleteSubjectError,
    UpdateSubjectCommand, UpdateSubjectError, UpdateSubjectStatusCommand, UpdateSubjectStatusError,
};
pub use queries::{
    GetSubjectByCodeQuery, GetSubjectError, GetSubjectQuery, GetSubjectOptionsQuery,
    ListSubjectDetailsQuery, ListSubjectsByQuery, ListSubjectsError, ListSubjectsQuery,
    SubjectDetail, SubjectFormOptions, SubjectScope,
};
pub use routes::subjects_routes;

/// Column list shared by every query returning [`Subject`]
pub(crate) const SUBJECT_COLUMNS: &str = "subject_id, subject_code, subject_name, status, \
    description, pass_mark::float8 AS pass_mark, created_at, semester_id, level_id, class_id";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Subject {
    pub subject_id: i32,
    pub subject_code: String,
    pub subject_name: String,
    #[sqlx(try_from = "String")]
    pub status: RecordStatus,
    pub description: Option<String>,
    pub pass_mark: f64,
    pub created_at: DateTime<Utc>,
    pub semester_id: i32,
    pub level_id: i32,
    pub class_id: String,
}
