//! Health check handler and response type.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

use crate::constants::HEALTH_CHECK_TIMEOUT_SECS;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthCheckResponse {
    pub status: String,
    pub database: String,
    pub storage_backend: String,
    pub task_transport: String,
    pub announce_mode: String,
}

/// Reports database reachability plus the configured backend, transport and mode.
pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let database = match tokio::time::timeout(
        Duration::from_secs(HEALTH_CHECK_TIMEOUT_SECS),
        state.database.ping(),
    )
    .await
    {
        Ok(Ok(())) => "healthy".to_string(),
        Ok(Err(e)) => format!("unhealthy: {}", e),
        Err(_) => "timeout".to_string(),
    };

    let healthy = database == "healthy";
    if !healthy {
        tracing::warn!(database = %database, "Health check failed");
    }

    let body = HealthCheckResponse {
        status: if healthy { "healthy" } else { "unhealthy" }.to_string(),
        database,
        storage_backend: state.storage.backend_type().to_string(),
        task_transport: state.announcer.transport_kind().to_string(),
        announce_mode: state.announcer.mode().to_string(),
    };

    let status = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(body))
}
