//! Shared utilities and types for feature modules
//!
//! - **pagination**: page/per_page parameters and metadata
//! - **validation**: field-level request validation
//! - **error_helpers**: unique / foreign-key violation detection
//! - **lookup**: `(id, name)` rows for dropdown options
//! - **test_helpers**: database fixtures (test-only)

pub mod error_helpers;
pub mod lookup;
pub mod pagination;
pub mod validation;

#[cfg(test)]
pub mod test_helpers;

pub use pagination::{Paginated, PaginationMetadata, PaginationParams};
pub use validation::{FieldError, ValidationErrors};
