pub mod get;
pub mod list;

pub use get::{GetGradeError, GetGradeQuery, GradeDetail};
pub use list::{GradeSummary, ListGradesError, ListGradesQuery};
