//! Student mark report
//!
//! Builds the semester → subject → component tree a student sees. Rows are
//! fetched flat, components for every grade come back from a single
//! `grade_id = ANY($1)` query, and the tree is assembled in memory.

pub mod models;
pub mod queries;
pub mod routes;

pub use models::{GradeTypeDetail, SemesterGroup, StudentMarkReport, StudentMarkReportResponse};
pub use queries::{
    GetMarkReportQuery, GetMarksBySemesterQuery, GetSubjectMarkError, GetSubjectMarkQuery,
    MarksBySemesterError,
};
pub use routes::mark_report_routes;

/// Groups subjects by `(semester_name, year)`.
///
/// Groups appear in the order their first subject appears, and subjects keep
/// their relative order inside each group.
pub fn group_by_semester(subjects: Vec<StudentMarkReport>) -> Vec<SemesterGroup> {
    let mut groups: Vec<SemesterGroup> = Vec::new();

    for subject in subjects {
        let existing = groups
            .iter_mut()
            .find(|g| g.semester_name == subject.semester_name && g.year == subject.year);

        match existing {
            Some(group) => group.subjects.push(subject),
            None => groups.push(SemesterGroup {
                semester_name: subject.semester_name.clone(),
                year: subject.year,
                subjects: vec![subject],
            }),
        }
    }

    groups
}
