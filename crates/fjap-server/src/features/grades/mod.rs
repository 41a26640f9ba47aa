//! Grade entry
//!
//! A grade ties one student to one subject. Its score is made of weighted
//! components (`grade_type` rows) such as Attendance, Midterm and Final; only
//! active components count towards the total.

pub mod commands;
pub mod queries;
pub mod routes;

use fjap_common::RecordStatus;
use serde::{Deserialize, Serialize};

pub use commands::{
    AddComponentCommand, AddComponentError, CreateGradeCommand, CreateGradeError,
    DeleteGradeCommand, DeleteGradeError, UpdateComponentCommand, UpdateComponentError,
    UpdateComponentStatusCommand, UpdateComponentStatusError,
};
pub use queries::{
    GetGradeError, GetGradeQuery, GradeDetail, GradeSummary, ListGradesError, ListGradesQuery,
};
pub use routes::grades_routes;

/// Column list for [`GradeComponent`] rows
pub(crate) const COMPONENT_COLUMNS: &str = "grade_type_id, grade_id, grade_type_name, \
    weight::float8 AS weight, score::float8 AS score, comment, status";

/// Attendance, Assignment, Midterm, Final, then everything else
pub(crate) const COMPONENT_ORDER: &str = "CASE grade_type_name \
    WHEN 'Attendance' THEN 1 \
    WHEN 'Assignment' THEN 2 \
    WHEN 'Midterm' THEN 3 \
    WHEN 'Final' THEN 4 \
    ELSE 5 END";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Grade {
    pub grade_id: i32,
    pub student_id: i32,
    pub subject_id: i32,
}

/// One weighted part of a grade
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct GradeComponent {
    pub grade_type_id: i32,
    pub grade_id: i32,
    pub grade_type_name: String,
    pub weight: f64,
    pub score: f64,
    pub comment: Option<String>,
    #[sqlx(try_from = "String")]
    pub status: RecordStatus,
}

/// Sum of the scores of active components
pub fn total_score(components: &[GradeComponent]) -> f64 {
    components
        .iter()
        .filter(|c| c.status.is_active())
        .map(|c| c.score)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn component(name: &str, score: f64, status: RecordStatus) -> GradeComponent {
        GradeComponent {
            grade_type_id: 1,
            grade_id: 1,
            grade_type_name: name.to_string(),
            weight: 25.0,
            score,
            comment: None,
            status,
        }
    }

    #[test]
    fn test_total_ignores_inactive_components() {
        let components = vec![
            component("Attendance", 1.0, RecordStatus::Active),
            component("Midterm", 2.5, RecordStatus::Active),
            component("Bonus", 9.0, RecordStatus::Inactive),
        ];
        assert_eq!(total_score(&components), 3.5);
        assert_eq!(total_score(&[]), 0.0);
    }
}
