//! FJAP Server Library
//!
//! HTTP API for academic management: classes, subjects, semesters, levels,
//! grades and student mark reports.
//!
//! # Architecture
//!
//! The server follows a **CQRS (Command Query Responsibility Segregation)** layout:
//!
//! - **Commands** (write operations) create, update or delete rows and are
//!   exposed through POST, PUT, PATCH and DELETE.
//! - **Queries** (read operations) are exposed through GET.
//!
//! Each entity is a vertical slice under [`features`] with its own
//! `commands/`, `queries/` and `routes.rs`. Handlers are plain async functions
//! taking a `PgPool` and a request struct, with hand-written SQL.
//!
//! ## Framework Stack
//!
//! - **Axum**: routing and extraction
//! - **SQLx**: PostgreSQL access and migrations
//! - **Tower HTTP**: CORS, compression and request tracing
//!
//! # Example
//!
//! ```no_run
//! use fjap_server::{api, config::Config, db};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load()?;
//!     let pool = db::create_pool(&config.database).await?;
//!     let app = api::create_router(pool, &config);
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:8000").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod cqrs;
pub mod db;
pub mod error;
pub mod features;
pub mod middleware;

// Re-export commonly used types
pub use error::AppError;
