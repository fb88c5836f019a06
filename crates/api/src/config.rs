use std::str::FromStr;

use parkval_core::error::CoreError;
use parkval_core::status::StatusVocabulary;

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Status labels used to classify records.
    pub vocabulary: StatusVocabulary,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `VALID_STATUSES`       | `유효`                     |
    /// | `PERMANENT_STATUSES`   | `직원차량,영구`            |
    pub fn from_env() -> Result<Self, CoreError> {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port = parse_env("PORT", 3000)?;

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs = parse_env("REQUEST_TIMEOUT_SECS", 30)?;

        let vocabulary = StatusVocabulary::from_lists(
            std::env::var("VALID_STATUSES").ok().as_deref(),
            std::env::var("PERMANENT_STATUSES").ok().as_deref(),
        )?;

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            vocabulary,
        })
    }
}

fn parse_env<T: FromStr>(key: &str, default: T) -> Result<T, CoreError> {
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| CoreError::Validation(format!("{key} must be a valid number, got '{raw}'"))),
        Err(_) => Ok(default),
    }
}
