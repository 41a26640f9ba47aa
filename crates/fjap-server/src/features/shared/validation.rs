//! Shared validation utilities
//!
//! Each check returns a [`FieldError`] naming the offending request field.
//! A command's `validate()` runs every check and gathers the failures in
//! [`ValidationErrors`], which the API turns into a `400` body of the form
//! `{"errors": {"<field>": ["<message>", ...]}}`.
//!
//! ```rust,ignore
//! let mut errors = ValidationErrors::new();
//! errors.check(validate_required_text(&self.class_name, "class_name", "Class name", 200));
//! errors.check(validate_positive_id(self.semester_id, "semester_id", "Semester"));
//! errors.check(validate_range(self.pass_mark, "pass_mark", "Pass mark", 0.0, 10.0));
//! errors.into_result()
//! ```

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

/// A single invalid request field
#[derive(Debug, Error, Clone, PartialEq)]
#[error("{field}: {message}")]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Every invalid field of one request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationErrors {
    fields: BTreeMap<String, Vec<String>>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the failure of `result`, if any
    pub fn check(&mut self, result: Result<(), FieldError>) {
        if let Err(error) = result {
            self.push(error);
        }
    }

    pub fn push(&mut self, error: FieldError) {
        self.add(error.field, error.message);
    }

    /// Add a message for a field name only known at runtime
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.fields.entry(field.into()).or_default().push(message.into());
    }

    /// Fold in the failures of another check
    pub fn merge(&mut self, other: ValidationErrors) {
        for (field, messages) in other.fields {
            self.fields.entry(field).or_default().extend(messages);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Invalid field names in alphabetical order
    pub fn fields(&self) -> Vec<&str> {
        self.fields.keys().map(String::as_str).collect()
    }

    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }

    pub fn into_map(self) -> BTreeMap<String, Vec<String>> {
        self.fields
    }
}

impl From<FieldError> for ValidationErrors {
    fn from(error: FieldError) -> Self {
        let mut errors = Self::new();
        errors.push(error);
        errors
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.fields {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{}: {}", field, message)?;
                first = false;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Required text: non-blank and at most `max_length` characters
pub fn validate_required_text(
    value: &str,
    field: &'static str,
    label: &str,
    max_length: usize,
) -> Result<(), FieldError> {
    if value.trim().is_empty() {
        return Err(FieldError::new(field, format!("{} is required", label)));
    }
    validate_max_length(value, field, label, max_length)
}

pub fn validate_max_length(
    value: &str,
    field: &'static str,
    label: &str,
    max_length: usize,
) -> Result<(), FieldError> {
    if value.chars().count() > max_length {
        return Err(FieldError::new(
            field,
            format!("{} must be at most {} characters", label, max_length),
        ));
    }
    Ok(())
}

/// Optional text, checked only when present
pub fn validate_optional_text(
    value: Option<&str>,
    field: &'static str,
    label: &str,
    max_length: usize,
) -> Result<(), FieldError> {
    match value {
        Some(value) => validate_max_length(value, field, label, max_length),
        None => Ok(()),
    }
}

/// Database identifiers start at 1
pub fn validate_positive_id(value: i32, field: &'static str, label: &str) -> Result<(), FieldError> {
    if value <= 0 {
        return Err(FieldError::new(field, format!("{} is required", label)));
    }
    Ok(())
}

/// Inclusive numeric range; NaN is rejected
pub fn validate_range(
    value: f64,
    field: &'static str,
    label: &str,
    min: f64,
    max: f64,
) -> Result<(), FieldError> {
    if !(min..=max).contains(&value) {
        return Err(FieldError::new(
            field,
            format!("{} must be between {} and {}", label, min, max),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text() {
        assert!(validate_required_text("SE1801", "class_name", "Class name", 200).is_ok());
        assert_eq!(
            validate_required_text("   ", "class_name", "Class name", 200),
            Err(FieldError::new("class_name", "Class name is required"))
        );
        assert_eq!(
            validate_required_text(&"a".repeat(201), "class_name", "Class name", 200)
                .unwrap_err()
                .message,
            "Class name must be at most 200 characters"
        );
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        let accented = "\u{1ead}".repeat(10);
        assert_eq!(accented.len(), 30);
        assert!(validate_max_length(&accented, "subject_name", "Subject name", 10).is_ok());
        assert!(validate_max_length(&accented, "subject_name", "Subject name", 9).is_err());
    }

    #[test]
    fn test_optional_text() {
        assert!(validate_optional_text(None, "description", "Description", 5).is_ok());
        assert!(validate_optional_text(Some("abcdef"), "description", "Description", 5).is_err());
    }

    #[test]
    fn test_positive_id() {
        assert!(validate_positive_id(1, "level_id", "Level").is_ok());
        assert_eq!(validate_positive_id(0, "level_id", "Level").unwrap_err().field, "level_id");
        assert!(validate_positive_id(-3, "level_id", "Level").is_err());
    }

    #[test]
    fn test_errors_collect_every_failed_field() {
        let mut errors = ValidationErrors::new();
        errors.check(validate_required_text("", "class_name", "Class name", 200));
        errors.check(validate_positive_id(0, "semester_id", "Semester"));
        errors.check(validate_positive_id(2, "level_id", "Level"));
        errors.add("semester_id", "Semester must exist");

        assert_eq!(errors.fields(), vec!["class_name", "semester_id"]);
        assert!(!errors.contains("level_id"));
        assert_eq!(
            errors.to_string(),
            "class_name: Class name is required; semester_id: Semester is required; \
             semester_id: Semester must exist"
        );
        assert_eq!(errors.into_map()["semester_id"].len(), 2);
    }

    #[test]
    fn test_errors_into_result() {
        assert!(ValidationErrors::new().into_result().is_ok());

        let errors = ValidationErrors::from(FieldError::new("score", "Score is required"));
        assert_eq!(errors.into_result().unwrap_err().fields(), vec!["score"]);
    }

    #[test]
    fn test_errors_merge_keeps_all_messages() {
        let mut errors = ValidationErrors::from(FieldError::new("year", "Year is required"));
        let mut other = ValidationErrors::new();
        other.add("year", "Year must be positive");
        other.add("semesterName", "Semester name is required");
        errors.merge(other);

        assert_eq!(errors.fields(), vec!["semesterName", "year"]);
        assert_eq!(errors.into_map()["year"].len(), 2);
    }

    #[test]
    fn test_range_bounds_are_inclusive() {
        assert!(validate_range(0.0, "score", "Score", 0.0, 10.0).is_ok());
        assert!(validate_range(10.0, "score", "Score", 0.0, 10.0).is_ok());
        assert!(validate_range(10.01, "score", "Score", 0.0, 10.0).is_err());
        assert!(validate_range(-0.5, "score", "Score", 0.0, 10.0).is_err());
        assert!(validate_range(f64::NAN, "score", "Score", 0.0, 10.0).is_err());
    }
}
