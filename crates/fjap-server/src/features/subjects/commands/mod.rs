pub mod create;
pub mod delete;
pub mod update;
pub mod update_status;

pub use create::{CreateSubjectCommand, CreateSubjectError};
pub use delete::{DeleteSubjectCommand, DeleteSubjectError};
pub use update::{UpdateSubjectCommand, UpdateSubjectError};
pub use update_status::{UpdateSubjectStatusCommand, UpdateSubjectStatusError};

use crate::features::shared::validation::{
    validate_optional_text, validate_positive_id, validate_range, validate_required_text,
    FieldError, ValidationErrors,
};

pub const SUBJECT_CODE_MAX_LENGTH: usize = 20;
pub const SUBJECT_NAME_MAX_LENGTH: usize = 200;
pub const DESCRIPTION_MAX_LENGTH: usize = 1000;
pub const MAX_PASS_MARK: f64 = 10.0;

/// Writable subject fields, shared by create and update
#[derive(Debug, Clone, Copy)]
pub(crate) struct SubjectFields<'a> {
    pub subject_code: &'a str,
    pub subject_name: &'a str,
    pub description: Option<&'a str>,
    pub pass_mark: f64,
    pub semester_id: i32,
    pub level_id: i32,
    pub class_id: &'a str,
}

impl SubjectFields<'_> {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check(validate_required_text(
            self.subject_code,
            "subject_code",
            "Subject code",
            SUBJECT_CODE_MAX_LENGTH,
        ));
        errors.check(validate_required_text(
            self.subject_name,
            "subject_name",
            "Subject name",
            SUBJECT_NAME_MAX_LENGTH,
        ));
        errors.check(validate_optional_text(
            self.description,
            "description",
            "Description",
            DESCRIPTION_MAX_LENGTH,
        ));
        errors.check(validate_range(self.pass_mark, "pass_mark", "Pass mark", 0.0, MAX_PASS_MARK));
        errors.check(validate_positive_id(self.semester_id, "semester_id", "Semester"));
        errors.check(validate_positive_id(self.level_id, "level_id", "Level"));
        if self.class_id.trim().is_empty() {
            errors.push(FieldError::new("class_id", "Class is required"));
        }
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields() -> SubjectFields<'static> {
        SubjectFields {
            subject_code: "PRF192",
            subject_name: "Programming Fundamentals",
            description: None,
            pass_mark: 5.0,
            semester_id: 1,
            level_id: 1,
            class_id: "CL01",
        }
    }

    #[test]
    fn test_valid() {
        assert!(fields().validate().is_ok());
    }

    #[test]
    fn test_pass_mark_bounds() {
        for (mark, ok) in [(0.0, true), (10.0, true), (-0.5, false), (10.01, false), (f64::NAN, false)] {
            let result = SubjectFields { pass_mark: mark, ..fields() }.validate();
            assert_eq!(result.is_ok(), ok, "pass_mark {}", mark);
        }
    }

    #[test]
    fn test_field_names() {
        let long_code = "X".repeat(21);
        let cases = [
            (SubjectFields { subject_code: &long_code, ..fields() }, "subject_code"),
            (SubjectFields { subject_name: " ", ..fields() }, "subject_name"),
            (SubjectFields { semester_id: 0, ..fields() }, "semester_id"),
            (SubjectFields { class_id: "", ..fields() }, "class_id"),
        ];
        for (subject, field) in cases {
            assert_eq!(subject.validate().unwrap_err().fields(), vec![field]);
        }
    }

    #[test]
    fn test_description_limit() {
        let long = "d".repeat(1001);
        let result = SubjectFields { description: Some(&long), ..fields() }.validate();
        assert_eq!(result.unwrap_err().fields(), vec!["description"]);
    }

    #[test]
    fn test_reports_all_invalid_fields() {
        let subject = SubjectFields {
            subject_code: "",
            pass_mark: 11.0,
            class_id: " ",
            ..fields()
        };
        assert_eq!(
            subject.validate().unwrap_err().fields(),
            vec!["class_id", "pass_mark", "subject_code"]
        );
    }
}
