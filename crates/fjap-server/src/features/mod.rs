//! Feature modules implementing the FJAP API
//!
//! Each feature is a vertical slice with its own commands, queries and
//! routes. Commands and queries are plain structs implementing
//! `mediator::Request`, handled by a standalone `handle(pool, request)`
//! function next to their SQL.
//!
//! # Features
//!
//! - **classes**: class CRUD, status toggle and per-class subject listing
//! - **subjects**: subject catalogue with filtering and pagination
//! - **semesters** / **levels**: reference data used by classes and subjects
//! - **grades**: grade records and their weighted components
//! - **students**: student directory
//! - **mark_report**: a student's grades grouped by semester
//! - **auth**: identity of the calling user
//!
//! # Architecture
//!
//! - `commands/` - Write operations (create, update, delete)
//! - `queries/` - Read operations (get, list, lookup)
//! - `routes.rs` - HTTP route definitions and error mapping

pub mod auth;
pub mod classes;
pub mod grades;
pub mod levels;
pub mod mark_report;
pub mod semesters;
pub mod shared;
pub mod students;
pub mod subjects;

use axum::Router;
use sqlx::PgPool;

/// Routes mounted under `/api/manager`
pub fn manager_router() -> Router<PgPool> {
    Router::new()
        .nest("/classes", classes::classes_routes())
        .nest("/subjects", subjects::subjects_routes())
        .nest("/semesters", semesters::semesters_routes())
        .nest("/levels", levels::levels_routes())
        .nest("/grades", grades::grades_routes())
        .nest("/students", students::students_routes())
}

/// Routes mounted under `/api/student`
pub fn student_router() -> Router<PgPool> {
    Router::new().nest("/mark-report", mark_report::mark_report_routes())
}

/// Routes mounted under `/api/auth`
pub fn auth_router() -> Router<PgPool> {
    auth::auth_routes()
}
