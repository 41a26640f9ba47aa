pub mod get;
pub mod list;
pub mod lookup;

pub use get::{GetSemesterError, GetSemesterQuery};
pub use list::ListSemestersQuery;
pub use lookup::LookupSemestersQuery;
