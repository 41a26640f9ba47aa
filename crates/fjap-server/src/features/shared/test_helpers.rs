//! Test fixtures for database tests
//!
//! ```rust,ignore
//! #[sqlx::test(migrations = "../../migrations")]
//! async fn test_something(pool: PgPool) -> sqlx::Result<()> {
//!     let school = TestSchool::create(&pool).await?;
//!     let subject_id = insert_subject(&pool, &school, "PRF192", 5.0).await?;
//!     // ... test logic ...
//!     Ok(())
//! }
//! ```

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use chrono::NaiveDate;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tower::ServiceExt;

use crate::features::classes::generate_class_id;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

pub async fn insert_semester(
    pool: &PgPool,
    name: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> sqlx::Result<i32> {
    sqlx::query_scalar(
        "INSERT INTO semester (name, start_date, end_date) VALUES ($1, $2, $3) RETURNING semester_id",
    )
    .bind(name)
    .bind(start)
    .bind(end)
    .fetch_one(pool)
    .await
}

pub async fn insert_level(pool: &PgPool, name: &str) -> sqlx::Result<i32> {
    sqlx::query_scalar("INSERT INTO level (level_name) VALUES ($1) RETURNING level_id")
        .bind(name)
        .fetch_one(pool)
        .await
}

pub async fn insert_class(
    pool: &PgPool,
    name: &str,
    semester_id: i32,
    level_id: i32,
) -> sqlx::Result<String> {
    let class_id = generate_class_id();
    sqlx::query(
        "INSERT INTO class (class_id, class_name, semester_id, level_id) VALUES ($1, $2, $3, $4)",
    )
    .bind(&class_id)
    .bind(name)
    .bind(semester_id)
    .bind(level_id)
    .execute(pool)
    .await?;
    Ok(class_id)
}

/// One semester, one level and one class
#[derive(Debug, Clone)]
pub struct TestSchool {
    pub semester_id: i32,
    pub level_id: i32,
    pub class_id: String,
}

impl TestSchool {
    pub async fn create(pool: &PgPool) -> sqlx::Result<Self> {
        Self::with_semester(pool, "Fall", date(2024, 9, 5), date(2024, 12, 20)).await
    }

    pub async fn with_semester(
        pool: &PgPool,
        semester_name: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> sqlx::Result<Self> {
        let semester_id = insert_semester(pool, semester_name, start, end).await?;
        let level_id = insert_level(pool, &format!("Level {}", semester_id)).await?;
        let class_id = insert_class(pool, "SE1801", semester_id, level_id).await?;
        Ok(Self {
            semester_id,
            level_id,
            class_id,
        })
    }
}

pub async fn insert_subject(
    pool: &PgPool,
    school: &TestSchool,
    code: &str,
    pass_mark: f64,
) -> sqlx::Result<i32> {
    sqlx::query_scalar(
        r#"
        INSERT INTO subject (subject_code, subject_name, pass_mark, semester_id, level_id, class_id)
        VALUES ($1, $2, CAST($3 AS NUMERIC), $4, $5, $6)
        RETURNING subject_id
        "#,
    )
    .bind(code)
    .bind(format!("Subject {}", code))
    .bind(pass_mark)
    .bind(school.semester_id)
    .bind(school.level_id)
    .bind(&school.class_id)
    .fetch_one(pool)
    .await
}

/// Inserts a student-role user and the matching student row
pub async fn insert_student(
    pool: &PgPool,
    first_name: &str,
    last_name: &str,
    student_code: &str,
) -> sqlx::Result<i32> {
    let user_id: i32 = sqlx::query_scalar(
        r#"
        INSERT INTO "user" (first_name, last_name, email, role_id)
        VALUES ($1, $2, $3, 4)
        RETURNING user_id
        "#,
    )
    .bind(first_name)
    .bind(last_name)
    .bind(format!("{}@fjap.edu.vn", student_code.to_lowercase()))
    .fetch_one(pool)
    .await?;

    sqlx::query_scalar(
        "INSERT INTO student (user_id, student_code) VALUES ($1, $2) RETURNING student_id",
    )
    .bind(user_id)
    .bind(student_code)
    .fetch_one(pool)
    .await
}

pub async fn enroll(pool: &PgPool, student_id: i32, class_id: &str) -> sqlx::Result<()> {
    sqlx::query("INSERT INTO enrollment (student_id, class_id) VALUES ($1, $2)")
        .bind(student_id)
        .bind(class_id)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn insert_grade(pool: &PgPool, student_id: i32, subject_id: i32) -> sqlx::Result<i32> {
    sqlx::query_scalar(
        "INSERT INTO grade (student_id, subject_id) VALUES ($1, $2) RETURNING grade_id",
    )
    .bind(student_id)
    .bind(subject_id)
    .fetch_one(pool)
    .await
}

pub async fn insert_component(
    pool: &PgPool,
    grade_id: i32,
    type_name: &str,
    weight: f64,
    score: f64,
    status: &str,
) -> sqlx::Result<i32> {
    sqlx::query_scalar(
        r#"
        INSERT INTO grade_type (grade_id, grade_type_name, weight, score, status)
        VALUES ($1, $2, CAST($3 AS NUMERIC), CAST($4 AS NUMERIC), $5)
        RETURNING grade_type_id
        "#,
    )
    .bind(grade_id)
    .bind(type_name)
    .bind(weight)
    .bind(score)
    .bind(status)
    .fetch_one(pool)
    .await
}

// ============================================================================
// Router helpers
// ============================================================================

/// Pool that never connects; only requests rejected before any query runs
/// may be routed through it.
pub fn offline_pool() -> PgPool {
    PgPoolOptions::new()
        .connect_lazy("postgresql://localhost:1/unused")
        .unwrap()
}

pub async fn send(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Response) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        },
        None => Body::empty(),
    };
    let response = app.oneshot(builder.body(body).unwrap()).await.unwrap();
    (response.status(), response)
}

pub async fn json_body(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
