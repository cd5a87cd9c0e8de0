//! Application initialization and setup
//!
//! This module handles all initialization logic for the application, including
//! database setup, storage backend creation, task announcer wiring and router
//! configuration.

pub mod announcer;
pub mod database;
pub mod routes;
pub mod server;
pub mod storage;

use crate::state::AppState;
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use vidcap_core::Config;

/// Initialize the entire application
///
/// Returns the shared state and the configured router.
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, Router)> {
    tracing::info!(
        environment = %config.environment(),
        storage_backend = %config.storage_backend(),
        task_transport = %config.task_transport(),
        announce_mode = %config.announce_mode(),
        "Starting vidcap upload service"
    );

    let database = database::setup_database(&config).await?;
    let storage = storage::setup_storage(&config).await?;
    let announcer = announcer::setup_announcer(&config)?;

    let state = Arc::new(AppState::new(config.clone(), storage, database, announcer));
    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
