pub mod add_component;
pub mod create;
pub mod delete;
pub mod update_component;
pub mod update_component_status;

pub use add_component::{AddComponentCommand, AddComponentError};
pub use create::{CreateGradeCommand, CreateGradeError};
pub use delete::{DeleteGradeCommand, DeleteGradeError};
pub use update_component::{UpdateComponentCommand, UpdateComponentError};
pub use update_component_status::{UpdateComponentStatusCommand, UpdateComponentStatusError};

use crate::features::shared::validation::{validate_range, validate_required_text, ValidationErrors};

pub const GRADE_TYPE_NAME_MAX_LENGTH: usize = 50;
pub const MAX_WEIGHT: f64 = 100.0;
pub const MAX_SCORE: f64 = 10.0;

pub(crate) fn validate_component(name: &str, weight: f64, score: f64) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    errors.check(validate_required_text(
        name,
        "grade_type_name",
        "Grade type name",
        GRADE_TYPE_NAME_MAX_LENGTH,
    ));
    errors.check(validate_range(weight, "weight", "Weight", 0.0, MAX_WEIGHT));
    errors.check(validate_range(score, "score", "Score", 0.0, MAX_SCORE));
    errors.into_result()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_bounds() {
        assert!(validate_component("Final", 40.0, 7.5).is_ok());
        assert!(validate_component("Final", 0.0, 0.0).is_ok());
        assert!(validate_component("Final", 100.0, 10.0).is_ok());

        assert_eq!(validate_component("", 40.0, 7.5).unwrap_err().fields(), vec!["grade_type_name"]);
        assert_eq!(validate_component("Final", 100.5, 7.5).unwrap_err().fields(), vec!["weight"]);
        assert_eq!(validate_component("Final", 40.0, -1.0).unwrap_err().fields(), vec!["score"]);
        assert_eq!(
            validate_component(&"n".repeat(51), 40.0, 7.5).unwrap_err().fields(),
            vec!["grade_type_name"]
        );
    }

    #[test]
    fn test_component_reports_each_field() {
        let err = validate_component(" ", -1.0, 11.0).unwrap_err();
        assert_eq!(err.fields(), vec!["grade_type_name", "score", "weight"]);
    }
}
