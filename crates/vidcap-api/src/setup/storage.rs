//! Storage backend initialization

use anyhow::{Context, Result};
use std::sync::Arc;
use vidcap_core::Config;
use vidcap_storage::{create_storage, Storage};

pub async fn setup_storage(config: &Config) -> Result<Arc<dyn Storage>> {
    let storage = create_storage(config)
        .await
        .context("Failed to initialize storage backend")?;
    tracing::info!(backend = %storage.backend_type(), "Storage backend initialized");
    Ok(storage)
}
