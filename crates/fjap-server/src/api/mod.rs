//! Top-level router assembly
//!
//! # Route Structure
//!
//! - `GET /` - Service name and version
//! - `GET /health` - Database connectivity
//! - `/api/manager/*` - Management features, manager role required
//! - `/api/student/*` - Student features, any authenticated caller
//! - `/api/auth/*` - Caller identity

pub mod extract;
pub mod response;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use sqlx::PgPool;
use tower_http::compression::CompressionLayer;

use crate::auth::AccessPolicy;
use crate::config::Config;
use crate::db;
use crate::features;
use crate::middleware::{
    self,
    auth::{require_auth, AuthGuard},
};

/// Build the application router with all routes and middleware
pub fn create_router(pool: PgPool, config: &Config) -> Router {
    let guard = |policy| {
        axum::middleware::from_fn_with_state(AuthGuard::new(config.auth.clone(), policy), require_auth)
    };

    let manager = features::manager_router().layer(guard(AccessPolicy::Manager));
    let student = features::student_router().layer(guard(AccessPolicy::Authenticated));
    let auth = features::auth_router().layer(guard(AccessPolicy::Authenticated));

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .nest("/api/manager", manager)
        .nest("/api/student", student)
        .nest("/api/auth", auth)
        .with_state(pool)
        // Layers apply from innermost to outermost
        .layer(CompressionLayer::new())
        .layer(middleware::tracing_layer())
        .layer(middleware::cors_layer(&config.cors))
}

async fn root() -> impl IntoResponse {
    Json(json!({
        "name": "FJAP Server",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running"
    }))
}

async fn health(State(pool): State<PgPool>) -> Response {
    match db::health_check(&pool).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "healthy",
                "database": "connected"
            })),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Database health check failed: {:?}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "unhealthy",
                    "database": "unreachable"
                })),
            )
                .into_response()
        },
    }
}
