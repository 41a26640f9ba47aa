pub mod get_info;
pub mod list;
pub mod list_active;
pub mod list_subjects;
pub mod options;

pub use get_info::{ClassEditInfo, GetClassInfoError, GetClassInfoQuery};
pub use list::{ClassListItem, ListClassesQuery};
pub use list_active::ListActiveClassesQuery;
pub use list_subjects::{ClassSubjectDetail, ListClassSubjectsQuery};
pub use options::{ClassFormOptions, GetClassOptionsQuery};
