use std::env;

/// Immutable service configuration, built once at startup and passed into
/// every component by the caller. There is no global config singleton.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub security: SecurityConfig,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Raw connection string; provider selection happens in
    /// `database::provider::classify`.
    pub connection_string: String,
}

#[derive(Debug, Clone)]
pub struct SecurityConfig {
    pub jwt_secret: String,
    pub jwt_expiry_secs: i64,
    /// Clock-skew tolerance applied when validating token expiry.
    pub jwt_leeway_secs: u64,
    pub cors_origins: Vec<String>,
}

/// Fallback signing key so `cargo run` works out of the box. Known weakness:
/// any deployment beyond a local demo must override it via JWT_SECRET.
pub const DEV_JWT_SECRET: &str = "insecure-dev-secret-change-me";

/// Embedded database at a fixed relative path, used when DATABASE_URL is unset.
pub const DEFAULT_CONNECTION_STRING: &str = "Data Source=todos.db";

const TOKEN_LIFETIME_SECS: i64 = 3600;
const CLOCK_SKEW_LEEWAY_SECS: u64 = 120;
const DEFAULT_PORT: u16 = 3000;

/// Local development frontends allowed by the CORS layer.
const CORS_ORIGINS: &[&str] = &[
    "http://localhost:3000",
    "http://127.0.0.1:3000",
    "http://localhost:5173",
    "http://127.0.0.1:5173",
];

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup so tests can stub the environment.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let connection_string =
            lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_CONNECTION_STRING.to_string());
        let jwt_secret = lookup("JWT_SECRET").unwrap_or_else(|| DEV_JWT_SECRET.to_string());

        // Allow tests or deployments to override the port
        let port = lookup("TODO_API_PORT")
            .or_else(|| lookup("PORT"))
            .and_then(|s| s.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        Self {
            database: DatabaseConfig { connection_string },
            security: SecurityConfig {
                jwt_secret,
                jwt_expiry_secs: TOKEN_LIFETIME_SECS,
                jwt_leeway_secs: CLOCK_SKEW_LEEWAY_SECS,
                cors_origins: CORS_ORIGINS.iter().map(|s| s.to_string()).collect(),
            },
            port,
        }
    }

    /// True when the service is running on the built-in development key.
    pub fn uses_default_secret(&self) -> bool {
        self.security.jwt_secret == DEV_JWT_SECRET
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_when_env_empty() {
        let config = AppConfig::from_lookup(|_| None);
        assert_eq!(config.database.connection_string, DEFAULT_CONNECTION_STRING);
        assert_eq!(config.security.jwt_secret, DEV_JWT_SECRET);
        assert_eq!(config.security.jwt_expiry_secs, 3600);
        assert_eq!(config.security.jwt_leeway_secs, 120);
        assert_eq!(config.port, 3000);
        assert!(config.uses_default_secret());
    }

    #[test]
    fn test_env_overrides() {
        let mut vars = HashMap::new();
        vars.insert("DATABASE_URL", "Server=db.internal;Database=todos");
        vars.insert("JWT_SECRET", "a-real-secret");
        vars.insert("PORT", "8080");

        let config = AppConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string()));
        assert_eq!(
            config.database.connection_string,
            "Server=db.internal;Database=todos"
        );
        assert_eq!(config.security.jwt_secret, "a-real-secret");
        assert_eq!(config.port, 8080);
        assert!(!config.uses_default_secret());
    }

    #[test]
    fn test_dedicated_port_var_wins_over_port() {
        let mut vars = HashMap::new();
        vars.insert("TODO_API_PORT", "4000");
        vars.insert("PORT", "8080");

        let config = AppConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string()));
        assert_eq!(config.port, 4000);
    }

    #[test]
    fn test_cors_allow_list_is_fixed() {
        let config = AppConfig::from_lookup(|_| None);
        assert_eq!(config.security.cors_origins.len(), 4);
        assert!(config
            .security
            .cors_origins
            .contains(&"http://localhost:5173".to_string()));
    }
}
