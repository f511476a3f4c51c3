//! Liveness and readiness probes

use std::time::Duration;

use axum::{extract::State, http::StatusCode, Json};
use nutribite_service::dto::{HealthResponse, ReadinessResponse};
use tokio::time::timeout;

use crate::state::AppState;

const PROBE_TIMEOUT: Duration = Duration::from_secs(2);

/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// 503 until both PostgreSQL and Redis answer
///
/// GET /health/ready
pub async fn readiness_check(
    State(state): State<AppState>,
) -> (StatusCode, Json<ReadinessResponse>) {
    let ctx = state.service_context();
    let (database, redis) = tokio::join!(
        timeout(PROBE_TIMEOUT, ctx.pool().acquire()),
        timeout(PROBE_TIMEOUT, ctx.redis_pool().health_check()),
    );

    let response = ReadinessResponse::ready(
        matches!(database, Ok(Ok(_))),
        matches!(redis, Ok(Ok(()))),
    );
    let status = if response.is_ready() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(response))
}
