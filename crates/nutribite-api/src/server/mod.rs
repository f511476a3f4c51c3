//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use nutribite_cache::{RedisPool, RedisSessionStore};
use nutribite_common::{AppConfig, AppError, AppResult};
use nutribite_db::{
    create_pool, run_migrations, DatabaseConfig, PgCourierRepository, PgCustomerRepository,
    PgDeliveryRepository, PgMessageRepository, PgNotificationRepository, PgOrderRepository,
    PgRecipeRepository, PgUserRepository,
};
use nutribite_service::ServiceContextBuilder;
use tokio::net::TcpListener;
use tracing::info;

use crate::middleware::apply_middleware;
use crate::routes::create_router;
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> AppResult<Router> {
    let router = create_router(&state);
    let config = state.config();
    let router = apply_middleware(
        router,
        &config.rate_limit,
        &config.cors,
        config.app.env.is_production(),
    )?;
    Ok(router.with_state(state))
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> AppResult<AppState> {
    info!("Connecting to PostgreSQL...");
    let pool = create_pool(&DatabaseConfig::from(&config.database))
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    if config.database.run_migrations {
        run_migrations(&pool)
            .await
            .map_err(|e| AppError::Database(format!("migrations failed: {e}")))?;
        info!("Database migrations applied");
    }

    let redis_pool = RedisPool::from_config(&config.redis)
        .map_err(|e| AppError::Cache(e.to_string()))?;
    let session_store = RedisSessionStore::new(redis_pool.clone(), config.session.ttl_seconds);

    let service_context = ServiceContextBuilder::new()
        .pool(pool.clone())
        .redis_pool(Arc::new(redis_pool))
        .user_repo(Arc::new(PgUserRepository::new(pool.clone())))
        .customer_repo(Arc::new(PgCustomerRepository::new(pool.clone())))
        .courier_repo(Arc::new(PgCourierRepository::new(pool.clone())))
        .order_repo(Arc::new(PgOrderRepository::new(pool.clone())))
        .delivery_repo(Arc::new(PgDeliveryRepository::new(pool.clone())))
        .recipe_repo(Arc::new(PgRecipeRepository::new(pool.clone())))
        .notification_repo(Arc::new(PgNotificationRepository::new(pool.clone())))
        .message_repo(Arc::new(PgMessageRepository::new(pool)))
        .session_store(Arc::new(session_store))
        .access_config(config.access.clone())
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, config))
}

/// Run the HTTP server until it fails or receives Ctrl+C
pub async fn run_server(app: Router, addr: SocketAddr) -> AppResult<()> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> AppResult<()> {
    let addr: SocketAddr = config
        .api
        .address()
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid listen address: {e}")))?;

    let state = create_app_state(config).await?;
    let app = create_app(state)?;

    run_server(app, addr).await
}
