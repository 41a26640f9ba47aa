//! JWT bearer token handling
//!
//! Tokens are HS256-signed and carry the caller's identity and role. The
//! guard in [`crate::middleware::auth`] decodes them and stores the
//! [`Claims`] in the request extensions.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::AuthConfig;

/// Identity carried by an access token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: String,
    pub email: String,
    pub name: String,
    pub role: String,
    pub role_id: i32,
    /// Expiry as seconds since the Unix epoch
    pub exp: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
}

/// Who may call a group of routes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessPolicy {
    /// Any caller with a valid token
    Authenticated,
    /// Callers whose `role_id` is in the configured manager set
    Manager,
}

impl AccessPolicy {
    pub fn allows(self, claims: &Claims, config: &AuthConfig) -> bool {
        match self {
            AccessPolicy::Authenticated => true,
            AccessPolicy::Manager => config.manager_role_ids.contains(&claims.role_id),
        }
    }
}

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Missing bearer token")]
    MissingToken,

    #[error("Invalid token: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),

    #[error("Authentication is not configured")]
    NotConfigured,

    #[error("Insufficient role for this resource")]
    Forbidden,
}

/// Sign `claims` with the configured secret
pub fn issue_token(config: &AuthConfig, claims: &Claims) -> Result<String, AuthError> {
    let secret = config.jwt_secret.as_deref().ok_or(AuthError::NotConfigured)?;
    let token = encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;
    Ok(token)
}

/// Verify signature, expiry and (when configured) issuer
pub fn decode_token(config: &AuthConfig, token: &str) -> Result<Claims, AuthError> {
    let secret = config.jwt_secret.as_deref().ok_or(AuthError::NotConfigured)?;

    let mut validation = Validation::new(Algorithm::HS256);
    if let Some(ref issuer) = config.issuer {
        validation.set_issuer(&[issuer]);
    }

    let data = decode::<Claims>(token, &DecodingKey::from_secret(secret.as_bytes()), &validation)?;
    Ok(data.claims)
}

/// Extract the token from an `Authorization: Bearer <token>` header value
pub fn bearer_token(header_value: &str) -> Option<&str> {
    let (scheme, token) = header_value.split_once(' ')?;
    if scheme.eq_ignore_ascii_case("bearer") && !token.trim().is_empty() {
        Some(token.trim())
    } else {
        None
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) const TEST_SECRET: &str = "fjap-test-secret-0123456789";

    pub(crate) fn test_config() -> AuthConfig {
        AuthConfig {
            jwt_secret: Some(TEST_SECRET.to_string()),
            issuer: None,
            manager_role_ids: vec![2],
        }
    }

    pub(crate) fn claims_with_role(role_id: i32) -> Claims {
        Claims {
            sub: "42".to_string(),
            email: "manager@fjap.edu.vn".to_string(),
            name: "Nguyen Van A".to_string(),
            role: if role_id == 2 { "Manager" } else { "Student" }.to_string(),
            role_id,
            exp: (chrono::Utc::now().timestamp() + 3600) as usize,
            iss: None,
        }
    }

    #[test]
    fn test_issue_and_decode() {
        let config = test_config();
        let claims = claims_with_role(2);
        let token = issue_token(&config, &claims).unwrap();
        assert_eq!(decode_token(&config, &token).unwrap(), claims);
    }

    #[test]
    fn test_decode_rejects_wrong_secret() {
        let token = issue_token(&test_config(), &claims_with_role(2)).unwrap();
        let other = AuthConfig {
            jwt_secret: Some("another-secret-value-000".to_string()),
            ..test_config()
        };
        assert!(matches!(decode_token(&other, &token), Err(AuthError::InvalidToken(_))));
    }

    #[test]
    fn test_decode_rejects_expired_token() {
        let mut claims = claims_with_role(2);
        claims.exp = 1_000;
        let token = issue_token(&test_config(), &claims).unwrap();
        assert!(decode_token(&test_config(), &token).is_err());
    }

    #[test]
    fn test_issuer_is_checked_when_configured() {
        let config = AuthConfig {
            issuer: Some("fjap".to_string()),
            ..test_config()
        };
        let mut claims = claims_with_role(2);
        claims.iss = Some("someone-else".to_string());
        let token = issue_token(&config, &claims).unwrap();
        assert!(decode_token(&config, &token).is_err());

        claims.iss = Some("fjap".to_string());
        let token = issue_token(&config, &claims).unwrap();
        assert!(decode_token(&config, &token).is_ok());
    }

    #[test]
    fn test_manager_policy() {
        let config = test_config();
        assert!(AccessPolicy::Manager.allows(&claims_with_role(2), &config));
        assert!(!AccessPolicy::Manager.allows(&claims_with_role(4), &config));
        assert!(AccessPolicy::Authenticated.allows(&claims_with_role(4), &config));
    }

    #[test]
    fn test_bearer_token_parsing() {
        assert_eq!(bearer_token("Bearer abc.def"), Some("abc.def"));
        assert_eq!(bearer_token("bearer abc"), Some("abc"));
        assert_eq!(bearer_token("Basic abc"), None);
        assert_eq!(bearer_token("Bearer "), None);
        assert_eq!(bearer_token("Bearer"), None);
    }
}
