pub mod details;
pub mod get;
pub mod list;
pub mod list_by;
pub mod options;

pub use details::{ListSubjectDetailsQuery, SubjectDetail};
pub use get::{GetSubjectByCodeQuery, GetSubjectError, GetSubjectQuery};
pub use list::{ListSubjectsError, ListSubjectsQuery};
pub use list_by::{ListSubjectsByQuery, SubjectScope};
pub use options::{GetSubjectOptionsQuery, SubjectFormOptions};
