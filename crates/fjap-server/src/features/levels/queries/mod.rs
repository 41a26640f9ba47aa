pub mod get;
pub mod lookup;

pub use get::{GetLevelError, GetLevelQuery};
pub use lookup::LookupLevelsQuery;
