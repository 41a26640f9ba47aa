pub mod queries;
pub mod routes;

pub use queries::{GetStudentError, GetStudentQuery, ListStudentsQuery, StudentDetail, StudentListItem};
pub use routes::students_routes;
