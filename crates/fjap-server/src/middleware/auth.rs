//! Role guard for route groups
//!
//! ```rust,ignore
//! let manager = features::manager_router()
//!     .layer(axum::middleware::from_fn_with_state(
//!         AuthGuard::new(config.auth.clone(), AccessPolicy::Manager),
//!         require_auth,
//!     ));
//! ```

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::auth::{bearer_token, decode_token, AccessPolicy, AuthError};
use crate::config::AuthConfig;
use crate::error::AppError;

/// State handed to [`require_auth`]
#[derive(Debug, Clone)]
pub struct AuthGuard {
    config: Arc<AuthConfig>,
    policy: AccessPolicy,
}

impl AuthGuard {
    pub fn new(config: AuthConfig, policy: AccessPolicy) -> Self {
        Self {
            config: Arc::new(config),
            policy,
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Forbidden => AppError::Forbidden(err.to_string()),
            AuthError::NotConfigured => AppError::Unauthorized(err.to_string()),
            AuthError::MissingToken => AppError::Unauthorized(err.to_string()),
            AuthError::InvalidToken(ref e) => {
                tracing::debug!(error = %e, "Rejected bearer token");
                AppError::Unauthorized("Invalid or expired token".to_string())
            },
        }
    }
}

/// Decode the bearer token, enforce the policy and expose the claims to
/// handlers as an `Extension<Claims>`
///
/// Requests pass through untouched when no JWT secret is configured.
pub async fn require_auth(
    State(guard): State<AuthGuard>,
    mut request: Request,
    next: Next,
) -> Response {
    if !guard.config.is_enabled() {
        return next.run(request).await;
    }

    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(bearer_token);

    let Some(token) = token else {
        return AppError::from(AuthError::MissingToken).into_response();
    };

    let claims = match decode_token(&guard.config, token) {
        Ok(claims) => claims,
        Err(err) => return AppError::from(err).into_response(),
    };

    if !guard.policy.allows(&claims, &guard.config) {
        tracing::warn!(
            user = %claims.sub,
            role_id = claims.role_id,
            policy = ?guard.policy,
            "Access denied"
        );
        return AppError::from(AuthError::Forbidden).into_response();
    }

    request.extensions_mut().insert(claims);
    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::tests::{claims_with_role, test_config};
    use crate::auth::{issue_token, Claims};
    use axum::{
        body::Body,
        http::{Request as HttpRequest, StatusCode},
        routing::get,
        Extension, Router,
    };
    use tower::ServiceExt;

    fn app(config: AuthConfig, policy: AccessPolicy) -> Router {
        Router::new()
            .route(
                "/whoami",
                get(|claims: Option<Extension<Claims>>| async move {
                    claims.map(|Extension(c)| c.sub).unwrap_or_default()
                }),
            )
            .layer(axum::middleware::from_fn_with_state(
                AuthGuard::new(config, policy),
                require_auth,
            ))
    }

    async fn call(app: Router, token: Option<String>) -> StatusCode {
        let mut builder = HttpRequest::builder().uri("/whoami");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        app.oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn test_open_when_disabled() {
        let status = call(app(AuthConfig::default(), AccessPolicy::Manager), None).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_missing_token_is_unauthorized() {
        let status = call(app(test_config(), AccessPolicy::Authenticated), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_garbage_token_is_unauthorized() {
        let status = call(
            app(test_config(), AccessPolicy::Authenticated),
            Some("not-a-jwt".to_string()),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_student_token_forbidden_on_manager_routes() {
        let token = issue_token(&test_config(), &claims_with_role(4)).unwrap();
        let status = call(app(test_config(), AccessPolicy::Manager), Some(token)).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_manager_token_allowed() {
        let token = issue_token(&test_config(), &claims_with_role(2)).unwrap();
        let status = call(app(test_config(), AccessPolicy::Manager), Some(token)).await;
        assert_eq!(status, StatusCode::OK);
    }
}
