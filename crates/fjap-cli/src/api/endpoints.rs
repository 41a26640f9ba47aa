//! API endpoint URL builders
//!
//! Helper functions to construct API endpoint URLs.

const MANAGER: &str = "api/manager";

fn base(base_url: &str) -> &str {
    base_url.trim_end_matches('/')
}

/// Build health check URL
pub fn health_url(base_url: &str) -> String {
    format!("{}/health", base(base_url))
}

/// Build caller identity URL
pub fn me_url(base_url: &str) -> String {
    format!("{}/api/auth/me", base(base_url))
}

/// Build URL of a manager resource collection, e.g. `classes`
pub fn manager_url(base_url: &str, resource: &str) -> String {
    format!("{}/{}/{}", base(base_url), MANAGER, resource)
}

/// Build URL below a manager resource, e.g. `classes` + `CL01/info`
pub fn manager_item_url(base_url: &str, resource: &str, path: &str) -> String {
    format!("{}/{}", manager_url(base_url, resource), path)
}

/// Build URL of one class; the id is percent-encoded
pub fn class_url(base_url: &str, class_id: &str) -> String {
    manager_item_url(base_url, "classes", &urlencoding::encode(class_id))
}

/// Build URL of a class sub-resource such as `info` or `status`
pub fn class_action_url(base_url: &str, class_id: &str, action: &str) -> String {
    format!("{}/{}", class_url(base_url, class_id), action)
}

/// Build URL listing the subjects taught in a class
pub fn subjects_by_class_url(base_url: &str, class_id: &str) -> String {
    manager_item_url(
        base_url,
        "subjects",
        &format!("class/{}", urlencoding::encode(class_id)),
    )
}

/// Build subject-by-code URL; the code is percent-encoded
pub fn subject_by_code_url(base_url: &str, subject_code: &str) -> String {
    manager_item_url(
        base_url,
        "subjects",
        &format!("code/{}", urlencoding::encode(subject_code)),
    )
}

/// Build full mark report URL
pub fn mark_report_url(base_url: &str, student_id: i32) -> String {
    format!("{}/api/student/mark-report/{}", base(base_url), student_id)
}

/// Build per-semester mark report URL (query string added by the caller)
pub fn mark_report_semester_url(base_url: &str, student_id: i32) -> String {
    format!("{}/semester", mark_report_url(base_url, student_id))
}

/// Build per-subject mark report URL
pub fn mark_report_subject_url(base_url: &str, student_id: i32, subject_id: i32) -> String {
    format!("{}/subject/{}", mark_report_url(base_url, student_id), subject_id)
}
