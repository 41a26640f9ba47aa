//! Error types for FJAP

use thiserror::Error;

/// Result type alias for FJAP operations
pub type Result<T> = std::result::Result<T, FjapError>;

/// Main error type shared by the FJAP crates
#[derive(Error, Debug)]
pub enum FjapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid status '{0}': expected 'Active' or 'Inactive'")]
    InvalidStatus(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Parse error: {0}")]
    Parse(String),
}
