//! Configuration management

use serde::{Deserialize, Serialize};

// ============================================================================
// Server Configuration Constants
// ============================================================================

/// Default server host binding.
pub const DEFAULT_SERVER_HOST: &str = "127.0.0.1";

/// Default server port.
pub const DEFAULT_SERVER_PORT: u16 = 8000;

/// Default shutdown timeout in seconds.
pub const DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64 = 30;

/// Default database URL for local development.
pub const DEFAULT_DATABASE_URL: &str = "postgresql://localhost/fjap";

/// Default maximum database connections in the pool.
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 10;

/// Default minimum database connections in the pool.
pub const DEFAULT_DATABASE_MIN_CONNECTIONS: u32 = 2;

/// Default database connection timeout in seconds.
pub const DEFAULT_DATABASE_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Default database idle timeout in seconds (10 minutes).
pub const DEFAULT_DATABASE_IDLE_TIMEOUT_SECS: u64 = 600;

/// Default CORS allowed origin (the local front end).
pub const DEFAULT_CORS_ALLOWED_ORIGIN: &str = "http://localhost:3000";

/// Role id granted access to `/api/manager/*`.
pub const DEFAULT_MANAGER_ROLE_ID: i32 = 2;

/// Fallback connection string variable name used by older deployments.
pub const LEGACY_DATABASE_URL_VAR: &str = "ConnectionStrings__Postgres";

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub cors: CorsConfig,
    pub auth: AuthConfig,
}

/// Server-specific configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub shutdown_timeout_secs: u64,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout_secs: u64,
    pub idle_timeout_secs: u64,
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    pub allow_credentials: bool,
}

/// JWT bearer authentication
///
/// When `jwt_secret` is `None` every route is open.
#[derive(Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(skip_serializing)]
    pub jwt_secret: Option<String>,
    pub issuer: Option<String>,
    pub manager_role_ids: Vec<i32>,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &self.jwt_secret.as_ref().map(|_| "<redacted>"))
            .field("issuer", &self.issuer)
            .field("manager_role_ids", &self.manager_role_ids)
            .finish()
    }
}

impl AuthConfig {
    pub fn is_enabled(&self) -> bool {
        self.jwt_secret.is_some()
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: None,
            issuer: None,
            manager_role_ids: vec![DEFAULT_MANAGER_ROLE_ID],
        }
    }
}

fn parse_var<T: std::str::FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T {
    lookup(key).and_then(|s| s.parse().ok()).unwrap_or(default)
}

impl Config {
    /// Load configuration from environment and defaults
    ///
    /// A `.env` file is searched for in the current directory and its parents;
    /// variables already set in the process environment win.
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let database_url = lookup("DATABASE_URL")
            .or_else(|| lookup(LEGACY_DATABASE_URL_VAR))
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let manager_role_ids = match lookup("AUTH_MANAGER_ROLE_IDS") {
            Some(raw) => raw
                .split(',')
                .map(|s| s.trim().parse::<i32>())
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| anyhow::anyhow!("Invalid AUTH_MANAGER_ROLE_IDS: {}", e))?,
            None => vec![DEFAULT_MANAGER_ROLE_ID],
        };

        let config = Config {
            server: ServerConfig {
                host: lookup("FJAP_HOST").unwrap_or_else(|| DEFAULT_SERVER_HOST.to_string()),
                port: parse_var(&lookup, "FJAP_PORT", DEFAULT_SERVER_PORT),
                shutdown_timeout_secs: parse_var(
                    &lookup,
                    "FJAP_SHUTDOWN_TIMEOUT",
                    DEFAULT_SHUTDOWN_TIMEOUT_SECS,
                ),
            },
            database: DatabaseConfig {
                url: database_url,
                max_connections: parse_var(
                    &lookup,
                    "DATABASE_MAX_CONNECTIONS",
                    DEFAULT_DATABASE_MAX_CONNECTIONS,
                ),
                min_connections: parse_var(
                    &lookup,
                    "DATABASE_MIN_CONNECTIONS",
                    DEFAULT_DATABASE_MIN_CONNECTIONS,
                ),
                connect_timeout_secs: parse_var(
                    &lookup,
                    "DATABASE_CONNECT_TIMEOUT",
                    DEFAULT_DATABASE_CONNECT_TIMEOUT_SECS,
                ),
                idle_timeout_secs: parse_var(
                    &lookup,
                    "DATABASE_IDLE_TIMEOUT",
                    DEFAULT_DATABASE_IDLE_TIMEOUT_SECS,
                ),
            },
            cors: CorsConfig {
                allowed_origins: lookup("CORS_ALLOWED_ORIGINS")
                    .unwrap_or_else(|| DEFAULT_CORS_ALLOWED_ORIGIN.to_string())
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect(),
                allow_credentials: parse_var(&lookup, "CORS_ALLOW_CREDENTIALS", true),
            },
            auth: AuthConfig {
                jwt_secret: lookup("JWT_SECRET").filter(|s| !s.is_empty()),
                issuer: lookup("JWT_ISSUER").filter(|s| !s.is_empty()),
                manager_role_ids,
            },
        };

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.server.port == 0 {
            anyhow::bail!("Server port must be greater than 0");
        }

        if self.database.url.is_empty() {
            anyhow::bail!("Database URL cannot be empty");
        }

        if self.database.max_connections == 0 {
            anyhow::bail!("Database max_connections must be greater than 0");
        }

        if self.database.min_connections > self.database.max_connections {
            anyhow::bail!(
                "Database min_connections ({}) cannot be greater than max_connections ({})",
                self.database.min_connections,
                self.database.max_connections
            );
        }

        if let Some(ref secret) = self.auth.jwt_secret {
            if secret.len() < 16 {
                anyhow::bail!("JWT_SECRET must be at least 16 characters");
            }
        }

        if self.auth.manager_role_ids.is_empty() {
            anyhow::bail!("At least one manager role id is required");
        }

        if self.cors.allowed_origins.is_empty() {
            tracing::warn!("No CORS origins configured - all origins will be allowed");
        }

        if !self.auth.is_enabled() {
            tracing::warn!("JWT_SECRET not set - API authentication is disabled");
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: DEFAULT_SERVER_HOST.to_string(),
                port: DEFAULT_SERVER_PORT,
                shutdown_timeout_secs: DEFAULT_SHUTDOWN_TIMEOUT_SECS,
            },
            database: DatabaseConfig {
                url: DEFAULT_DATABASE_URL.to_string(),
                max_connections: DEFAULT_DATABASE_MAX_CONNECTIONS,
                min_connections: DEFAULT_DATABASE_MIN_CONNECTIONS,
                connect_timeout_secs: DEFAULT_DATABASE_CONNECT_TIMEOUT_SECS,
                idle_timeout_secs: DEFAULT_DATABASE_IDLE_TIMEOUT_SECS,
            },
            cors: CorsConfig {
                allowed_origins: vec![DEFAULT_CORS_ALLOWED_ORIGIN.to_string()],
                allow_credentials: true,
            },
            auth: AuthConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.server.port, DEFAULT_SERVER_PORT);
        assert_eq!(config.database.url, DEFAULT_DATABASE_URL);
        assert_eq!(config.cors.allowed_origins, vec!["http://localhost:3000"]);
        assert!(!config.auth.is_enabled());
        assert_eq!(config.auth.manager_role_ids, vec![2]);
    }

    #[test]
    fn test_database_url_prefers_database_url() {
        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgresql://db/primary"),
            (LEGACY_DATABASE_URL_VAR, "postgresql://db/legacy"),
        ]))
        .unwrap();
        assert_eq!(config.database.url, "postgresql://db/primary");
    }

    #[test]
    fn test_database_url_falls_back_to_connection_string() {
        let config =
            Config::from_lookup(lookup_from(&[(LEGACY_DATABASE_URL_VAR, "postgresql://db/legacy")]))
                .unwrap();
        assert_eq!(config.database.url, "postgresql://db/legacy");
    }

    #[test]
    fn test_auth_settings() {
        let config = Config::from_lookup(lookup_from(&[
            ("JWT_SECRET", "a-very-long-test-secret"),
            ("AUTH_MANAGER_ROLE_IDS", "1, 2"),
        ]))
        .unwrap();
        assert!(config.auth.is_enabled());
        assert_eq!(config.auth.manager_role_ids, vec![1, 2]);
        assert!(!format!("{:?}", config.auth).contains("a-very-long-test-secret"));
    }

    #[test]
    fn test_rejects_short_secret_and_bad_roles() {
        assert!(Config::from_lookup(lookup_from(&[("JWT_SECRET", "short")])).is_err());
        assert!(Config::from_lookup(lookup_from(&[("AUTH_MANAGER_ROLE_IDS", "two")])).is_err());
    }

    #[test]
    fn test_validate_pool_bounds() {
        let mut config = Config::default();
        config.database.min_connections = 20;
        assert!(config.validate().is_err());

        config.database.min_connections = 1;
        config.server.port = 0;
        assert!(config.validate().is_err());
    }
}
