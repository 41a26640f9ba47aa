//! API request and response types
//!
//! Mirrors the JSON produced and accepted by the FJAP server.

use chrono::{DateTime, NaiveDate, Utc};
use fjap_common::{LookupItem, RecordStatus};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// Envelopes
// ============================================================================

/// `{ "code": 200, "message": "...", "data": ... }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub code: u16,
    pub message: String,
    #[serde(default = "Option::default")]
    pub data: Option<T>,
}

/// Body of every non-success response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: u16,
    pub message: String,
    #[serde(default)]
    pub errors: Option<BTreeMap<String, Vec<String>>>,
    #[serde(default)]
    pub detail: Option<String>,
}

/// Bare `{ "message": "..." }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Payload of the status-toggle endpoints
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StatusChange {
    pub status: RecordStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusRequest {
    pub status: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationMetadata {
    pub page: i64,
    pub per_page: i64,
    pub total: i64,
    pub pages: i64,
    pub has_next: bool,
    pub has_prev: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pagination: PaginationMetadata,
}

// ============================================================================
// Classes
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassListItem {
    pub class_id: String,
    pub class_name: String,
    pub semester: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: RecordStatus,
    pub semester_id: i32,
    pub level_id: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassInfo {
    pub class_id: String,
    pub class_name: String,
    pub semester_id: i32,
    pub level_id: i32,
    pub status: RecordStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassSubject {
    pub class_id: String,
    pub class_name: String,
    pub subject_id: i32,
    pub subject_code: String,
    pub subject_name: String,
    pub subject_level: String,
    pub total_students: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassOptions {
    pub semesters: Vec<LookupItem>,
    pub levels: Vec<LookupItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassForm {
    pub class_name: String,
    pub semester_id: i32,
    pub level_id: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedClass {
    pub class_id: String,
    pub message: String,
}

// ============================================================================
// Subjects
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subject {
    pub subject_id: i32,
    pub subject_code: String,
    pub subject_name: String,
    pub status: RecordStatus,
    pub description: Option<String>,
    pub pass_mark: f64,
    pub created_at: DateTime<Utc>,
    pub semester_id: i32,
    pub level_id: i32,
    pub class_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectDetail {
    pub subject_id: i32,
    pub subject_code: String,
    pub subject_name: String,
    pub status: RecordStatus,
    pub description: Option<String>,
    pub pass_mark: f64,
    pub created_at: DateTime<Utc>,
    pub class_id: String,
    pub class_name: String,
    pub level_id: i32,
    pub level_name: String,
    pub semester_id: i32,
    pub semester_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectOptions {
    pub semesters: Vec<LookupItem>,
    pub levels: Vec<LookupItem>,
    pub classes: Vec<LookupItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectForm {
    pub subject_code: String,
    pub subject_name: String,
    pub description: Option<String>,
    pub pass_mark: f64,
    pub semester_id: i32,
    pub level_id: i32,
    pub class_id: String,
}

impl From<Subject> for SubjectForm {
    fn from(subject: Subject) -> Self {
        Self {
            subject_code: subject.subject_code,
            subject_name: subject.subject_name,
            description: subject.description,
            pass_mark: subject.pass_mark,
            semester_id: subject.semester_id,
            level_id: subject.level_id,
            class_id: subject.class_id,
        }
    }
}

/// Query string of `GET /api/manager/subjects`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubjectFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<RecordStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub semester_id: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level_id: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<i64>,
}

// ============================================================================
// Semesters and levels
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Semester {
    pub semester_id: i32,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SemesterForm {
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    pub level_id: i32,
    pub level_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelForm {
    pub level_name: String,
}

// ============================================================================
// Grades
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grade {
    pub grade_id: i32,
    pub student_id: i32,
    pub subject_id: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradeForm {
    pub student_id: i32,
    pub subject_id: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradeSummary {
    pub grade_id: i32,
    pub student_id: i32,
    pub student_code: String,
    pub student_name: String,
    pub subject_id: i32,
    pub total_score: f64,
    pub component_count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradeComponent {
    pub grade_type_id: i32,
    pub grade_id: i32,
    pub grade_type_name: String,
    pub weight: f64,
    pub score: f64,
    pub comment: Option<String>,
    pub status: RecordStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradeDetail {
    pub grade_id: i32,
    pub student_id: i32,
    pub student_code: String,
    pub student_name: String,
    pub subject_id: i32,
    pub subject_code: String,
    pub subject_name: String,
    pub pass_mark: f64,
    pub components: Vec<GradeComponent>,
    pub total_score: f64,
    pub is_passed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentForm {
    pub grade_type_name: String,
    pub weight: f64,
    pub score: f64,
    pub comment: Option<String>,
}

// ============================================================================
// Students
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentListItem {
    pub student_id: i32,
    pub student_code: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentDetail {
    pub student_id: i32,
    pub student_code: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub class_ids: Vec<String>,
}

// ============================================================================
// Mark report
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradeTypeDetail {
    pub grade_type_id: i32,
    pub grade_type_name: String,
    pub weight: f64,
    pub score: f64,
    pub comment: Option<String>,
    pub status: RecordStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectMark {
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

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SemesterMarks {
    pub semester_name: String,
    pub year: i32,
    pub subjects: Vec<SubjectMark>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkReport {
    pub student_id: i32,
    pub student_name: String,
    pub semesters: Vec<SemesterMarks>,
}

/// Identity returned by `GET /api/auth/me`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identity {
    pub sub: String,
    pub email: String,
    pub name: String,
    pub role: String,
    pub role_id: i32,
}
