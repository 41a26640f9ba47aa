pub mod create;
pub mod delete;
pub mod update;

pub use create::{CreateLevelCommand, CreateLevelError};
pub use delete::{DeleteLevelCommand, DeleteLevelError};
pub use update::{UpdateLevelCommand, UpdateLevelError};

pub const LEVEL_NAME_MAX_LENGTH: usize = 100;
