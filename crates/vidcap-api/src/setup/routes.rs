//! Route configuration and setup.

use crate::constants::{AD_PATH, HEALTH_PATH, MULTIPART_OVERHEAD_BYTES, VIDEO_PATH};
use crate::handlers::{ad_upload, health, method_not_supported, video_upload};
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use vidcap_core::Config;
use vidcap_infra::request_id_middleware;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router<()>, anyhow::Error> {
    let cors = setup_cors(config)?;
    let body_limit = request_body_limit(config.upload_size_limit_bytes());

    let app = Router::new()
        .route(
            VIDEO_PATH,
            post(video_upload::upload_video).fallback(method_not_supported),
        )
        .route(
            AD_PATH,
            post(ad_upload::upload_ad).fallback(method_not_supported),
        )
        .route(HEALTH_PATH, get(health::health_check))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn(request_id_middleware))
        .with_state(state);

    Ok(app)
}

/// Whole-request cap: the file limit plus room for multipart boundaries and text parts.
fn request_body_limit(upload_limit: usize) -> usize {
    upload_limit.saturating_add(MULTIPART_OVERHEAD_BYTES)
}

fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let cors = if config.cors_origins().iter().any(|o| o == "*") {
        if config.is_production() {
            tracing::warn!("CORS configured to allow all origins - not recommended for production");
        }
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any)
    } else {
        let origins = config
            .cors_origins()
            .iter()
            .map(|o| {
                o.parse::<HeaderValue>()
                    .map_err(|e| anyhow::anyhow!("Invalid CORS origin {}: {}", o, e))
            })
            .collect::<Result<Vec<_>, _>>()?;
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any)
    };
    Ok(cors)
}
