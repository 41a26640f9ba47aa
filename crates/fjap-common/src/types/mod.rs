//! Common types used across FJAP

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::FjapError;

/// Lifecycle status of classes, subjects and grade components.
///
/// The database stores the literal strings `"Active"` and `"Inactive"`; the
/// status-toggle endpoints accept a boolean where `true` means active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum RecordStatus {
    #[default]
    Active,
    Inactive,
}

impl RecordStatus {
    /// The exact string persisted in `status` columns
    pub fn as_str(self) -> &'static str {
        match self {
            RecordStatus::Active => "Active",
            RecordStatus::Inactive => "Inactive",
        }
    }

    pub fn is_active(self) -> bool {
        matches!(self, RecordStatus::Active)
    }
}

impl From<bool> for RecordStatus {
    fn from(active: bool) -> Self {
        if active {
            RecordStatus::Active
        } else {
            RecordStatus::Inactive
        }
    }
}

impl From<RecordStatus> for bool {
    fn from(status: RecordStatus) -> Self {
        status.is_active()
    }
}

impl FromStr for RecordStatus {
    type Err = FjapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Active" => Ok(RecordStatus::Active),
            "Inactive" => Ok(RecordStatus::Inactive),
            other => Err(FjapError::InvalidStatus(other.to_string())),
        }
    }
}

impl TryFrom<String> for RecordStatus {
    type Error = FjapError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl std::fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Generic `(id, name)` projection used to populate selection dropdowns
///
/// Identifiers are integers for semesters and levels and opaque strings for
/// classes, so the id is carried as a JSON value-agnostic [`LookupId`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupItem {
    pub id: LookupId,
    pub name: String,
}

impl LookupItem {
    pub fn new(id: impl Into<LookupId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Identifier of a [`LookupItem`]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LookupId {
    Int(i32),
    Text(String),
}

impl From<i32> for LookupId {
    fn from(id: i32) -> Self {
        LookupId::Int(id)
    }
}

impl From<String> for LookupId {
    fn from(id: String) -> Self {
        LookupId::Text(id)
    }
}

impl From<&str> for LookupId {
    fn from(id: &str) -> Self {
        LookupId::Text(id.to_string())
    }
}

impl std::fmt::Display for LookupId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LookupId::Int(id) => write!(f, "{}", id),
            LookupId::Text(id) => f.write_str(id),
        }
    }
}
