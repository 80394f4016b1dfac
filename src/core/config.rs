//! Server configuration.

use crate::auth::JwtConfig;

/// Server configuration, loaded from the environment.
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | HTTP_PORT | 3000 | HTTP listen port |
/// | DATABASE_URL | postgres://localhost/kakilima | Postgres connection string |
/// | DB_MAX_CONNECTIONS | 10 | connection pool size |
/// | JWT_SECRET | (dev key) | HS256 secret shared with the identity provider |
/// | ENVIRONMENT | development | development \| staging \| production |
/// | LOG_DIR | (stdout) | directory for daily rolling log files |
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API listen port
    pub http_port: u16,
    /// Postgres connection string
    pub database_url: String,
    /// Connection pool size
    pub db_max_connections: u32,
    /// JWT validation configuration
    pub jwt: JwtConfig,
    /// Runtime environment: development | staging | production
    pub environment: String,
    /// Optional directory for rolling file logs
    pub log_dir: Option<String>,
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// defaults where unset.
    pub fn from_env() -> Self {
        Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "postgres://localhost/kakilima".into()),
            db_max_connections: std::env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(10),
            jwt: JwtConfig::from_env(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_dir: std::env::var("LOG_DIR").ok(),
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}
