//! Shared handler state
//!
//! Wraps the service context and the loaded configuration, and knows how
//! the session cookie is shaped.

use std::sync::Arc;

use axum_extra::extract::cookie::{Cookie, SameSite};
use nutribite_common::AppConfig;
use nutribite_service::ServiceContext;

#[derive(Clone)]
pub struct AppState {
    ctx: Arc<ServiceContext>,
    config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(ctx: ServiceContext, config: AppConfig) -> Self {
        Self {
            ctx: Arc::new(ctx),
            config: Arc::new(config),
        }
    }

    pub fn service_context(&self) -> &ServiceContext {
        &self.ctx
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn cookie_name(&self) -> &str {
        &self.config.session.cookie_name
    }

    /// HttpOnly, `SameSite=Lax` cookie carrying a session id
    pub fn session_cookie(&self, session_id: String) -> Cookie<'static> {
        Cookie::build((self.cookie_name().to_string(), session_id))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.config.session.cookie_secure)
            .build()
    }

    /// Matches the path of [`Self::session_cookie`] so the browser drops it
    pub fn removal_cookie(&self) -> Cookie<'static> {
        Cookie::build((self.cookie_name().to_string(), "")).path("/").build()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("app", &self.config.app.name)
            .field("env", &self.config.app.env)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
pub(crate) fn test_config() -> AppConfig {
    use nutribite_common::{
        AccessConfig, AppSettings, CorsConfig, DatabaseConfig, Environment, RateLimitConfig,
        RedisConfig, ServerConfig, SessionConfig,
    };

    AppConfig {
        app: AppSettings {
            name: "nutribite".to_string(),
            env: Environment::Development,
        },
        api: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        database: DatabaseConfig {
            url: "postgres://nutribite@127.0.0.1:1/nutribite".to_string(),
            max_connections: 1,
            min_connections: 0,
            run_migrations: false,
        },
        redis: RedisConfig {
            url: "redis://127.0.0.1:1".to_string(),
            max_connections: 1,
        },
        session: SessionConfig {
            cookie_name: "nutribite.sid".to_string(),
            ttl_seconds: 600,
            cookie_secure: true,
        },
        access: AccessConfig::default(),
        rate_limit: RateLimitConfig {
            requests_per_second: 100,
            burst: 100,
        },
        cors: CorsConfig {
            allowed_origins: vec!["https://app.nutribite.test".to_string()],
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum_extra::extract::cookie::SameSite;
    use nutribite_service::services::testing::{
        test_context, InMemorySessionStore, InMemoryUserRepository,
    };

    #[tokio::test]
    async fn test_session_cookie_attributes() {
        let ctx = test_context(
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(InMemorySessionStore::new()),
        );
        let state = AppState::new(ctx, test_config());

        let cookie = state.session_cookie("sid-1".to_string());
        assert_eq!(cookie.name(), "nutribite.sid");
        assert_eq!(cookie.value(), "sid-1");
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));

        assert_eq!(state.removal_cookie().path(), Some("/"));
    }
}
