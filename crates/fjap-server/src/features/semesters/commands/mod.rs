pub mod create;
pub mod delete;
pub mod update;

pub use create::{CreateSemesterCommand, CreateSemesterError};
pub use delete::{DeleteSemesterCommand, DeleteSemesterError};
pub use update::{UpdateSemesterCommand, UpdateSemesterError};

use chrono::NaiveDate;

use crate::features::shared::validation::{validate_required_text, FieldError, ValidationErrors};

pub const SEMESTER_NAME_MAX_LENGTH: usize = 100;

/// Shared by create and update: name present, both dates present and ordered
pub(crate) fn validate_semester_fields(
    name: &str,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
) -> Result<(NaiveDate, NaiveDate), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    errors.check(validate_required_text(name, "name", "Semester name", SEMESTER_NAME_MAX_LENGTH));
    if start_date.is_none() {
        errors.push(FieldError::new("start_date", "Start date is required"));
    }
    if end_date.is_none() {
        errors.push(FieldError::new("end_date", "End date is required"));
    }

    match (start_date, end_date) {
        (Some(start), Some(end)) if start > end => {
            errors.push(FieldError::new("end_date", "End date must be on or after the start date"));
            Err(errors)
        },
        (Some(start), Some(end)) => errors.into_result().map(|()| (start, end)),
        _ => Err(errors),
    }
}
