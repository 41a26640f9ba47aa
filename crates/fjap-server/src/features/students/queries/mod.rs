pub mod get;
pub mod list;

pub use get::{GetStudentError, GetStudentQuery, StudentDetail};
pub use list::{ListStudentsQuery, StudentListItem};
