pub mod create;
pub mod delete;
pub mod update;
pub mod update_status;

pub use create::{CreateClassCommand, CreateClassError, CreateClassResponse};
pub use delete::{DeleteClassCommand, DeleteClassError};
pub use update::{UpdateClassCommand, UpdateClassError};
pub use update_status::{UpdateClassStatusCommand, UpdateClassStatusError};
