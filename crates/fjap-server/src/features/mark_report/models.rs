use chrono::NaiveDate;
use fjap_common::RecordStatus;
use serde::{Deserialize, Serialize};

/// One graded component (Attendance, Midterm, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct GradeTypeDetail {
    pub grade_type_id: i32,
    #[serde(skip)]
    pub grade_id: i32,
    pub grade_type_name: String,
    pub weight: f64,
    pub score: f64,
    pub comment: Option<String>,
    #[sqlx(try_from = "String")]
    pub status: RecordStatus,
}

/// One graded subject of a student
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentMarkReport {
    pub grade_id: i32,
    pub student_id: i32,
    pub subject_id: i32,
    pub subject_code: String,
    pub subject_name: String,
    pub class_name: String,
    pub semester_name: String,
    pub year: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub grade_types: Vec<GradeTypeDetail>,
    pub total_score: f64,
    pub pass_mark: f64,
    pub is_passed: bool,
}

impl StudentMarkReport {
    /// Attaches components and derives the total and pass flag
    pub fn with_components(mut self, grade_types: Vec<GradeTypeDetail>) -> Self {
        self.total_score = grade_types.iter().map(|gt| gt.score).sum();
        self.is_passed = self.total_score >= self.pass_mark;
        self.grade_types = grade_types;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemesterGroup {
    pub semester_name: String,
    pub year: i32,
    pub subjects: Vec<StudentMarkReport>,
}

/// Full report; `student_name` is empty and `semesters` is empty for an
/// unknown student
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct StudentMarkReportResponse {
    pub student_id: i32,
    pub student_name: String,
    pub semesters: Vec<SemesterGroup>,
}
