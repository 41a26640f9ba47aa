//! FJAP Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared types, utilities, and error handling for the FJAP workspace.
//!
//! # Overview
//!
//! This crate provides functionality used by both the API server and the CLI:
//!
//! - **Error Handling**: Common error type and result alias
//! - **Logging**: `tracing` subscriber setup driven by environment variables
//! - **Types**: Record status and lookup items shared over the wire
//!
//! # Example
//!
//! ```
//! use fjap_common::types::RecordStatus;
//!
//! let status: RecordStatus = "Inactive".parse().unwrap();
//! assert!(!status.is_active());
//! assert_eq!(RecordStatus::from(true).as_str(), "Active");
//! ```

pub mod error;
pub mod logging;
pub mod types;

// Re-export commonly used types
pub use error::{FjapError, Result};
pub use types::{LookupItem, RecordStatus};
