//! Application configuration structs
//!
//! Loads configuration from environment variables (and `.env` when present).

use serde::Deserialize;
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub api: ServerConfig,
    pub database: DatabaseConfig,
    pub redis: RedisConfig,
    pub session: SessionConfig,
    pub access: AccessConfig,
    pub rate_limit: RateLimitConfig,
    pub cors: CorsConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    fn parse(raw: &str) -> Option<Self> {
        match raw.to_lowercase().as_str() {
            "production" | "prod" => Some(Self::Production),
            "staging" => Some(Self::Staging),
            "development" | "dev" => Some(Self::Development),
            _ => None,
        }
    }
}

/// HTTP listener configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    /// Apply pending migrations at startup
    #[serde(default)]
    pub run_migrations: bool,
}

/// Redis configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RedisConfig {
    pub url: String,
    #[serde(default = "default_redis_max_connections")]
    pub max_connections: u32,
}

/// Cookie session configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    /// Lifetime of a session, in seconds
    #[serde(default = "default_session_ttl")]
    pub ttl_seconds: u64,
    /// Send the cookie with the `Secure` attribute
    #[serde(default)]
    pub cookie_secure: bool,
}

/// Tuning for the per-request access check
#[derive(Debug, Clone, Deserialize)]
pub struct AccessConfig {
    /// Minimum gap between two `last_seen` writes for one user
    #[serde(default = "default_presence_interval")]
    pub presence_touch_interval_seconds: u64,
    /// Upper bound on the background ban reconciliation write
    #[serde(default = "default_reconcile_timeout")]
    pub ban_reconcile_timeout_ms: u64,
}

impl AccessConfig {
    #[must_use]
    pub fn presence_touch_interval(&self) -> Duration {
        Duration::from_secs(self.presence_touch_interval_seconds)
    }

    #[must_use]
    pub fn ban_reconcile_timeout(&self) -> Duration {
        Duration::from_millis(self.ban_reconcile_timeout_ms)
    }
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            presence_touch_interval_seconds: default_presence_interval(),
            ban_reconcile_timeout_ms: default_reconcile_timeout(),
        }
    }
}

/// Rate limiting configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,
    #[serde(default = "default_burst")]
    pub burst: u32,
}

/// CORS configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

// Default value functions
fn default_app_name() -> String {
    "nutribite".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    5
}

fn default_redis_max_connections() -> u32 {
    10
}

fn default_cookie_name() -> String {
    "nutribite.sid".to_string()
}

fn default_session_ttl() -> u64 {
    86_400 // 1 day
}

fn default_presence_interval() -> u64 {
    60
}

fn default_reconcile_timeout() -> u64 {
    2_000
}

fn default_requests_per_second() -> u32 {
    10
}

fn default_burst() -> u32 {
    50
}

/// Parse an optional variable, falling back to `default` when unset.
/// A set but malformed value is an error rather than a silent default.
fn parse_var<T: FromStr>(name: &'static str, default: impl FnOnce() -> T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(name, raw)),
        Err(_) => Ok(default()),
    }
}

fn parse_flag(name: &'static str) -> Result<bool, ConfigError> {
    match env::var(name) {
        Ok(raw) => match raw.trim().to_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" | "" => Ok(false),
            _ => Err(ConfigError::InvalidValue(name, raw)),
        },
        Err(_) => Ok(false),
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let env_kind = env::var("APP_ENV")
            .ok()
            .and_then(|s| Environment::parse(&s))
            .unwrap_or_default();

        Ok(Self {
            app: AppSettings {
                name: env::var("APP_NAME").unwrap_or_else(|_| default_app_name()),
                env: env_kind,
            },
            api: ServerConfig {
                host: env::var("API_HOST").unwrap_or_else(|_| default_host()),
                port: env::var("API_PORT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .ok_or(ConfigError::MissingVar("API_PORT"))?,
            },
            database: DatabaseConfig {
                url: env::var("DATABASE_URL").map_err(|_| ConfigError::MissingVar("DATABASE_URL"))?,
                max_connections: parse_var("DATABASE_MAX_CONNECTIONS", default_max_connections)?,
                min_connections: parse_var("DATABASE_MIN_CONNECTIONS", default_min_connections)?,
                run_migrations: parse_flag("RUN_MIGRATIONS")?,
            },
            redis: RedisConfig {
                url: env::var("REDIS_URL").map_err(|_| ConfigError::MissingVar("REDIS_URL"))?,
                max_connections: parse_var("REDIS_MAX_CONNECTIONS", default_redis_max_connections)?,
            },
            session: SessionConfig {
                cookie_name: env::var("SESSION_COOKIE_NAME").unwrap_or_else(|_| default_cookie_name()),
                ttl_seconds: parse_var("SESSION_TTL_SECONDS", default_session_ttl)?,
                // Secure cookies by default in production
                cookie_secure: if env::var("SESSION_COOKIE_SECURE").is_ok() {
                    parse_flag("SESSION_COOKIE_SECURE")?
                } else {
                    env_kind.is_production()
                },
            },
            access: AccessConfig {
                presence_touch_interval_seconds: parse_var(
                    "PRESENCE_TOUCH_INTERVAL_SECONDS",
                    default_presence_interval,
                )?,
                ban_reconcile_timeout_ms: parse_var(
                    "BAN_RECONCILE_TIMEOUT_MS",
                    default_reconcile_timeout,
                )?,
            },
            rate_limit: RateLimitConfig {
                requests_per_second: parse_var(
                    "RATE_LIMIT_REQUESTS_PER_SECOND",
                    default_requests_per_second,
                )?,
                burst: parse_var("RATE_LIMIT_BURST", default_burst)?,
            },
            cors: CorsConfig {
                allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                    .ok()
                    .map(|s| {
                        s.split(',')
                            .map(str::trim)
                            .filter(|s| !s.is_empty())
                            .map(String::from)
                            .collect()
                    })
                    .unwrap_or_default(),
            },
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_parse() {
        assert_eq!(Environment::parse("PRODUCTION"), Some(Environment::Production));
        assert_eq!(Environment::parse("dev"), Some(Environment::Development));
        assert_eq!(Environment::parse("qa"), None);
    }

    #[test]
    fn test_server_address() {
        let config = ServerConfig {
            host: "0.0.0.0".to_string(),
            port: 8080,
        };
        assert_eq!(config.address(), "0.0.0.0:8080");
    }

    #[test]
    fn test_access_defaults() {
        let access = AccessConfig::default();
        assert_eq!(access.ban_reconcile_timeout(), Duration::from_millis(2000));
        assert_eq!(access.presence_touch_interval(), Duration::from_secs(60));
    }

    #[test]
    fn test_default_values() {
        assert_eq!(default_app_name(), "nutribite");
        assert_eq!(default_host(), "127.0.0.1");
        assert_eq!(default_cookie_name(), "nutribite.sid");
        assert_eq!(default_session_ttl(), 86_400);
    }
}
