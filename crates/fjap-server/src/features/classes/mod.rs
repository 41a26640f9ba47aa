pub mod commands;
pub mod queries;
pub mod routes;

pub use commands::{
    CreateClassCommand, CreateClassError, CreateClassResponse, DeleteClassCommand,
    DeleteClassError, UpdateClassCommand, UpdateClassError, UpdateClassStatusCommand,
    UpdateClassStatusError,
};

pub use queries::{
    ClassEditInfo, ClassFormOptions, ClassListItem, ClassSubjectDetail, GetClassInfoError,
    GetClassInfoQuery, GetClassOptionsQuery, ListActiveClassesQuery, ListClassSubjectsQuery,
    ListClassesQuery,
};

pub use routes::classes_routes;

/// Prefix of generated class identifiers
pub const CLASS_ID_PREFIX: &str = "CL";

/// `CL` followed by 32 uppercase hex digits
pub fn generate_class_id() -> String {
    format!(
        "{}{}",
        CLASS_ID_PREFIX,
        uuid::Uuid::new_v4().simple().to_string().to_uppercase()
    )
}
