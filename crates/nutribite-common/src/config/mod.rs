//! Configuration structs

mod app_config;

pub use app_config::{
    AccessConfig, AppConfig, AppSettings, ConfigError, CorsConfig, DatabaseConfig, Environment,
    RateLimitConfig, RedisConfig, ServerConfig, SessionConfig,
};
