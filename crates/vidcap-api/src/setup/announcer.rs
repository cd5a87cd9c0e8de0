//! Task announcer initialization

use anyhow::{Context, Result};
use std::sync::Arc;
use vidcap_core::Config;
use vidcap_worker::{create_transport, TaskAnnouncer, TokioExecutor};

/// Build the transport selected by configuration and the bounded executor used for
/// detached announcements.
pub fn setup_announcer(config: &Config) -> Result<TaskAnnouncer> {
    let transport = create_transport(config).context("Failed to initialize task transport")?;
    let executor = Arc::new(TokioExecutor::new(config.announce_max_in_flight()));

    tracing::info!(
        transport = %transport.kind(),
        mode = %config.announce_mode(),
        max_in_flight = config.announce_max_in_flight(),
        "Task announcer initialized"
    );

    Ok(TaskAnnouncer::new(transport, config.announce_mode(), executor))
}
