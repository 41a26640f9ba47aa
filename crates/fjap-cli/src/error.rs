//! Error types for the FJAP CLI
//!
//! Messages are user-facing and say what to check next.

use std::collections::BTreeMap;
use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Error, Debug)]
pub enum CliError {
    /// The server rejected the request body or parameters
    #[error("{message}{}", format_field_errors(.errors))]
    Validation {
        message: String,
        errors: BTreeMap<String, Vec<String>>,
    },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// Missing or rejected bearer token
    #[error("{0}. Set FJAP_API_TOKEN or pass --token.")]
    Unauthorized(String),

    #[error("Forbidden: {0}. The token's role cannot use this resource.")]
    Forbidden(String),

    /// Any other non-success response
    #[error("Server error ({status}): {message}")]
    Api { status: u16, message: String },

    /// HTTP request failed
    #[error("Network request failed: {0}. Check that the FJAP server is running and --server-url is correct.")]
    Http(#[from] reqwest::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Invalid command-line input caught before any request
    #[error("Invalid input: {0}")]
    Input(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CliError {
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    pub fn input(message: impl Into<String>) -> Self {
        Self::Input(message.into())
    }
}

fn format_field_errors(errors: &BTreeMap<String, Vec<String>>) -> String {
    errors
        .iter()
        .map(|(field, messages)| format!("\n  {}: {}", field, messages.join("; ")))
        .collect()
}
