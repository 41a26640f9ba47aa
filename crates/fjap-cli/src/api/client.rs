//! HTTP API client for the FJAP server
//!
//! One method group per resource. Envelope responses are unwrapped so callers
//! receive the `data` payload; non-success responses become typed
//! [`CliError`]s.

use crate::api::{endpoints, types::*};
use crate::error::{CliError, Result};
use fjap_common::{LookupItem, RecordStatus};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;

// ============================================================================
// API Client Constants
// ============================================================================

/// Default timeout for API requests in seconds.
/// Can be overridden via FJAP_API_TIMEOUT_SECS environment variable.
pub const DEFAULT_API_TIMEOUT_SECS: u64 = 30;

/// Default FJAP server URL when not specified via environment variable.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8000";

/// API client for the FJAP server
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Create a new API client; `token` is sent as a bearer token when set
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Result<Self> {
        let timeout_secs = std::env::var("FJAP_API_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_API_TIMEOUT_SECS);

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            token: token.filter(|t| !t.trim().is_empty()),
        })
    }

    /// Create from `FJAP_SERVER_URL` and `FJAP_API_TOKEN`
    pub fn from_env() -> Result<Self> {
        let base_url =
            std::env::var("FJAP_SERVER_URL").unwrap_or_else(|_| DEFAULT_SERVER_URL.to_string());
        let token = std::env::var("FJAP_API_TOKEN").ok();

        Self::new(base_url, token)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ------------------------------------------------------------------------
    // Transport
    // ------------------------------------------------------------------------

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let builder = self.client.request(method, url);
        match self.token {
            Some(ref token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        let response = builder.send().await?;
        if response.status().is_success() {
            Ok(response)
        } else {
            Err(error_from_response(response).await)
        }
    }

    /// GET returning a bare JSON body
    async fn get_bare<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self.send(self.request(Method::GET, url)).await?;
        Ok(response.json().await?)
    }

    /// GET returning an envelope
    async fn get_data<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self.send(self.request(Method::GET, url)).await?;
        unwrap_data(response.json().await?)
    }

    /// Write with a JSON body, returning the envelope's `data`
    async fn write_data<B, T>(&self, method: Method, url: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.send(self.request(method, url).json(body)).await?;
        unwrap_data(response.json().await?)
    }

    /// Request whose only interesting output is the envelope's `message`
    async fn write_message(&self, method: Method, url: &str) -> Result<String> {
        let response = self.send(self.request(method, url)).await?;
        let envelope: ApiResponse<serde_json::Value> = response.json().await?;
        Ok(envelope.message)
    }

    // ------------------------------------------------------------------------
    // Service
    // ------------------------------------------------------------------------

    /// Check server health; an unreachable server is reported as unhealthy
    pub async fn health_check(&self) -> Result<bool> {
        let url = endpoints::health_url(&self.base_url);

        match self.client.get(&url).send().await {
            Ok(response) => Ok(response.status().is_success()),
            Err(e) => {
                tracing::debug!(error = %e, "Health check request failed");
                Ok(false)
            },
        }
    }

    pub async fn me(&self) -> Result<Identity> {
        self.get_bare(&endpoints::me_url(&self.base_url)).await
    }

    // ------------------------------------------------------------------------
    // Classes
    // ------------------------------------------------------------------------

    pub async fn list_classes(&self) -> Result<Vec<ClassListItem>> {
        self.get_data(&endpoints::manager_url(&self.base_url, "classes")).await
    }

    pub async fn lookup_classes(&self) -> Result<Vec<LookupItem>> {
        self.get_bare(&endpoints::manager_item_url(&self.base_url, "classes", "lookup"))
            .await
    }

    pub async fn class_options(&self) -> Result<ClassOptions> {
        self.get_bare(&endpoints::manager_item_url(&self.base_url, "classes", "options"))
            .await
    }

    pub async fn get_class_info(&self, class_id: &str) -> Result<ClassInfo> {
        self.get_bare(&endpoints::class_action_url(&self.base_url, class_id, "info"))
            .await
    }

    pub async fn list_class_subjects(&self, class_id: &str) -> Result<Vec<ClassSubject>> {
        self.get_data(&endpoints::class_url(&self.base_url, class_id)).await
    }

    /// Returns the generated class id
    pub async fn create_class(&self, form: &ClassForm) -> Result<CreatedClass> {
        let url = endpoints::manager_url(&self.base_url, "classes");
        let response = self.send(self.request(Method::POST, &url).json(form)).await?;
        Ok(response.json().await?)
    }

    pub async fn update_class(&self, class_id: &str, form: &ClassForm) -> Result<String> {
        let url = endpoints::class_url(&self.base_url, class_id);
        let response = self.send(self.request(Method::PUT, &url).json(form)).await?;
        let body: MessageResponse = response.json().await?;
        Ok(body.message)
    }

    pub async fn set_class_status(&self, class_id: &str, active: bool) -> Result<RecordStatus> {
        let url = endpoints::class_action_url(&self.base_url, class_id, "status");
        let change: StatusChange = self
            .write_data(Method::PATCH, &url, &StatusRequest { status: active })
            .await?;
        Ok(change.status)
    }

    pub async fn delete_class(&self, class_id: &str) -> Result<String> {
        let url = endpoints::class_url(&self.base_url, class_id);
        self.write_message(Method::DELETE, &url).await
    }

    // ------------------------------------------------------------------------
    // Subjects
    // ------------------------------------------------------------------------

    pub async fn list_subjects(&self, filter: &SubjectFilter) -> Result<Paginated<Subject>> {
        let url = endpoints::manager_url(&self.base_url, "subjects");
        let response = self
            .send(self.request(Method::GET, &url).query(filter))
            .await?;
        unwrap_data(response.json().await?)
    }

    pub async fn list_subject_details(&self) -> Result<Vec<SubjectDetail>> {
        self.get_data(&endpoints::manager_item_url(&self.base_url, "subjects", "details"))
            .await
    }

    pub async fn subject_options(&self) -> Result<SubjectOptions> {
        self.get_bare(&endpoints::manager_item_url(&self.base_url, "subjects", "options"))
            .await
    }

    pub async fn get_subject(&self, subject_id: i32) -> Result<Subject> {
        self.get_bare(&endpoints::manager_item_url(
            &self.base_url,
            "subjects",
            &subject_id.to_string(),
        ))
        .await
    }

    pub async fn get_subject_by_code(&self, subject_code: &str) -> Result<Subject> {
        self.get_bare(&endpoints::subject_by_code_url(&self.base_url, subject_code))
            .await
    }

    pub async fn list_subjects_by_class(&self, class_id: &str) -> Result<Vec<Subject>> {
        self.get_data(&endpoints::subjects_by_class_url(&self.base_url, class_id))
            .await
    }

    pub async fn list_subjects_by_semester(&self, semester_id: i32) -> Result<Vec<Subject>> {
        let path = format!("semester/{}", semester_id);
        self.get_data(&endpoints::manager_item_url(&self.base_url, "subjects", &path))
            .await
    }

    pub async fn list_subjects_by_level(&self, level_id: i32) -> Result<Vec<Subject>> {
        let path = format!("level/{}", level_id);
        self.get_data(&endpoints::manager_item_url(&self.base_url, "subjects", &path))
            .await
    }

    pub async fn create_subject(&self, form: &SubjectForm) -> Result<Subject> {
        let url = endpoints::manager_url(&self.base_url, "subjects");
        self.write_data(Method::POST, &url, form).await
    }

    pub async fn update_subject(&self, subject_id: i32, form: &SubjectForm) -> Result<Subject> {
        let url = endpoints::manager_item_url(&self.base_url, "subjects", &subject_id.to_string());
        self.write_data(Method::PUT, &url, form).await
    }

    pub async fn set_subject_status(&self, subject_id: i32, active: bool) -> Result<RecordStatus> {
        let path = format!("{}/status", subject_id);
        let url = endpoints::manager_item_url(&self.base_url, "subjects", &path);
        let change: StatusChange = self
            .write_data(Method::PATCH, &url, &StatusRequest { status: active })
            .await?;
        Ok(change.status)
    }

    pub async fn delete_subject(&self, subject_id: i32) -> Result<String> {
        let url = endpoints::manager_item_url(&self.base_url, "subjects", &subject_id.to_string());
        self.write_message(Method::DELETE, &url).await
    }

    // ------------------------------------------------------------------------
    // Semesters
    // ------------------------------------------------------------------------

    /// `(id, name)` pairs, newest first
    pub async fn lookup_semesters(&self) -> Result<Vec<LookupItem>> {
        self.get_bare(&endpoints::manager_url(&self.base_url, "semesters")).await
    }

    pub async fn list_semesters(&self) -> Result<Vec<Semester>> {
        self.get_data(&endpoints::manager_item_url(&self.base_url, "semesters", "all"))
            .await
    }

    pub async fn get_semester(&self, semester_id: i32) -> Result<Semester> {
        self.get_bare(&endpoints::manager_item_url(
            &self.base_url,
            "semesters",
            &semester_id.to_string(),
        ))
        .await
    }

    pub async fn create_semester(&self, form: &SemesterForm) -> Result<Semester> {
        let url = endpoints::manager_url(&self.base_url, "semesters");
        self.write_data(Method::POST, &url, form).await
    }

    pub async fn update_semester(&self, semester_id: i32, form: &SemesterForm) -> Result<Semester> {
        let url = endpoints::manager_item_url(&self.base_url, "semesters", &semester_id.to_string());
        self.write_data(Method::PUT, &url, form).await
    }

    pub async fn delete_semester(&self, semester_id: i32) -> Result<String> {
        let url = endpoints::manager_item_url(&self.base_url, "semesters", &semester_id.to_string());
        self.write_message(Method::DELETE, &url).await
    }

    // ------------------------------------------------------------------------
    // Levels
    // ------------------------------------------------------------------------

    pub async fn lookup_levels(&self) -> Result<Vec<LookupItem>> {
        self.get_bare(&endpoints::manager_url(&self.base_url, "levels")).await
    }

    pub async fn get_level(&self, level_id: i32) -> Result<Level> {
        self.get_bare(&endpoints::manager_item_url(
            &self.base_url,
            "levels",
            &level_id.to_string(),
        ))
        .await
    }

    pub async fn create_level(&self, form: &LevelForm) -> Result<Level> {
        let url = endpoints::manager_url(&self.base_url, "levels");
        self.write_data(Method::POST, &url, form).await
    }

    pub async fn update_level(&self, level_id: i32, form: &LevelForm) -> Result<Level> {
        let url = endpoints::manager_item_url(&self.base_url, "levels", &level_id.to_string());
        self.write_data(Method::PUT, &url, form).await
    }

    pub async fn delete_level(&self, level_id: i32) -> Result<String> {
        let url = endpoints::manager_item_url(&self.base_url, "levels", &level_id.to_string());
        self.write_message(Method::DELETE, &url).await
    }

    // ------------------------------------------------------------------------
    // Grades
    // ------------------------------------------------------------------------

    pub async fn list_grades(&self, subject_id: i32) -> Result<Vec<GradeSummary>> {
        let url = endpoints::manager_url(&self.base_url, "grades");
        let response = self
            .send(self.request(Method::GET, &url).query(&[("subject_id", subject_id)]))
            .await?;
        unwrap_data(response.json().await?)
    }

    pub async fn get_grade(&self, grade_id: i32) -> Result<GradeDetail> {
        self.get_data(&endpoints::manager_item_url(
            &self.base_url,
            "grades",
            &grade_id.to_string(),
        ))
        .await
    }

    pub async fn create_grade(&self, form: &GradeForm) -> Result<Grade> {
        let url = endpoints::manager_url(&self.base_url, "grades");
        self.write_data(Method::POST, &url, form).await
    }

    pub async fn delete_grade(&self, grade_id: i32) -> Result<String> {
        let url = endpoints::manager_item_url(&self.base_url, "grades", &grade_id.to_string());
        self.write_message(Method::DELETE, &url).await
    }

    pub async fn add_component(&self, grade_id: i32, form: &ComponentForm) -> Result<GradeComponent> {
        let path = format!("{}/components", grade_id);
        let url = endpoints::manager_item_url(&self.base_url, "grades", &path);
        self.write_data(Method::POST, &url, form).await
    }

    pub async fn update_component(
        &self,
        grade_type_id: i32,
        form: &ComponentForm,
    ) -> Result<GradeComponent> {
        let path = format!("components/{}", grade_type_id);
        let url = endpoints::manager_item_url(&self.base_url, "grades", &path);
        self.write_data(Method::PUT, &url, form).await
    }

    pub async fn set_component_status(&self, grade_type_id: i32, active: bool) -> Result<RecordStatus> {
        let path = format!("components/{}/status", grade_type_id);
        let url = endpoints::manager_item_url(&self.base_url, "grades", &path);
        let change: StatusChange = self
            .write_data(Method::PATCH, &url, &StatusRequest { status: active })
            .await?;
        Ok(change.status)
    }

    // ------------------------------------------------------------------------
    // Students
    // ------------------------------------------------------------------------

    pub async fn list_students(
        &self,
        search: Option<&str>,
        page: Option<i64>,
        per_page: Option<i64>,
    ) -> Result<Paginated<StudentListItem>> {
        let url = endpoints::manager_url(&self.base_url, "students");
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(search) = search {
            query.push(("search", search.to_string()));
        }
        if let Some(page) = page {
            query.push(("page", page.to_string()));
        }
        if let Some(per_page) = per_page {
            query.push(("per_page", per_page.to_string()));
        }

        let response = self.send(self.request(Method::GET, &url).query(&query)).await?;
        unwrap_data(response.json().await?)
    }

    pub async fn get_student(&self, student_id: i32) -> Result<StudentDetail> {
        self.get_bare(&endpoints::manager_item_url(
            &self.base_url,
            "students",
            &student_id.to_string(),
        ))
        .await
    }

    // ------------------------------------------------------------------------
    // Mark report
    // ------------------------------------------------------------------------

    pub async fn mark_report(&self, student_id: i32) -> Result<MarkReport> {
        self.get_bare(&endpoints::mark_report_url(&self.base_url, student_id))
            .await
    }

    pub async fn marks_by_semester(
        &self,
        student_id: i32,
        semester_name: &str,
        year: i32,
    ) -> Result<Vec<SubjectMark>> {
        let url = endpoints::mark_report_semester_url(&self.base_url, student_id);
        let query = [("semesterName", semester_name.to_string()), ("year", year.to_string())];
        let response = self.send(self.request(Method::GET, &url).query(&query)).await?;
        Ok(response.json().await?)
    }

    pub async fn subject_mark(&self, student_id: i32, subject_id: i32) -> Result<SubjectMark> {
        self.get_bare(&endpoints::mark_report_subject_url(
            &self.base_url,
            student_id,
            subject_id,
        ))
        .await
    }
}

fn unwrap_data<T>(envelope: ApiResponse<T>) -> Result<T> {
    envelope.data.ok_or_else(|| {
        CliError::api(
            envelope.code,
            format!("Response carried no data ({})", envelope.message),
        )
    })
}

/// Map a non-success response onto the error taxonomy of the server
async fn error_from_response(response: Response) -> CliError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let parsed = serde_json::from_str::<ErrorResponse>(&body).ok();

    let fallback = || {
        status
            .canonical_reason()
            .unwrap_or("Unexpected response")
            .to_string()
    };
    let message = parsed.as_ref().map(|e| e.message.clone()).unwrap_or_else(fallback);

    tracing::debug!(status = status.as_u16(), body = %body, "Request failed");

    match status {
        StatusCode::BAD_REQUEST => CliError::Validation {
            message,
            errors: parsed.and_then(|e| e.errors).unwrap_or_default(),
        },
        StatusCode::NOT_FOUND => CliError::NotFound(message),
        StatusCode::CONFLICT => CliError::Conflict(message),
        StatusCode::UNAUTHORIZED => CliError::Unauthorized(message),
        StatusCode::FORBIDDEN => CliError::Forbidden(message),
        _ => {
            let message = match parsed.and_then(|e| e.detail) {
                Some(detail) => format!("{}: {}", message, detail),
                None => message,
            };
            CliError::api(status.as_u16(), message)
        },
    }
}
