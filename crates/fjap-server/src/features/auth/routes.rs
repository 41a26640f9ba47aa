//! Caller identity
//!
//! - `GET /api/auth/me` - Claims of the bearer token on the request

use axum::{
    response::{IntoResponse, Response},
    routing::get,
    Extension, Json, Router,
};
use sqlx::PgPool;

use crate::auth::Claims;
use crate::error::AppError;

pub fn auth_routes() -> Router<PgPool> {
    Router::new().route("/me", get(me))
}

/// `401` when the request carries no verified claims, which is always the
/// case while authentication is disabled
async fn me(claims: Option<Extension<Claims>>) -> Result<Response, AppError> {
    let Some(Extension(claims)) = claims else {
        return Err(AppError::Unauthorized("Not authenticated".to_string()));
    };
    Ok(Json(claims).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::tests::{claims_with_role, test_config};
    use crate::auth::{issue_token, AccessPolicy};
    use crate::features::shared::test_helpers::{json_body, offline_pool};
    use crate::middleware::auth::{require_auth, AuthGuard};
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;

    fn app() -> Router {
        auth_routes()
            .layer(axum::middleware::from_fn_with_state(
                AuthGuard::new(test_config(), AccessPolicy::Authenticated),
                require_auth,
            ))
            .with_state(offline_pool())
    }

    #[tokio::test]
    async fn test_me_returns_claims() {
        let token = issue_token(&test_config(), &claims_with_role(4)).unwrap();
        let request = Request::builder()
            .uri("/me")
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .body(Body::empty())
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["role_id"], 4);
    }

    #[tokio::test]
    async fn test_me_without_claims() {
        let router = auth_routes().with_state(offline_pool());
        let request = Request::builder().uri("/me").body(Body::empty()).unwrap();

        let response = router.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
