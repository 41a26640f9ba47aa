pub mod commands;
pub mod queries;
pub mod routes;

use serde::{Deserialize, Serialize};

pub use commands::{
    CreateLevelCommand, CreateLevelError, DeleteLevelCommand, DeleteLevelError,
    UpdateLevelCommand, UpdateLevelError,
};
pub use queries::{GetLevelError, GetLevelQuery, LookupLevelsQuery};
pub use routes::levels_routes;

/// Level record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Level {
    pub level_id: i32,
    pub level_name: String,
}
