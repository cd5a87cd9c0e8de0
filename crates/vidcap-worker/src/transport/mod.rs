//! Task transports
//!
//! Each transport delivers a single task once and reports whether the receiving side
//! took it. There is no retry at this layer.

mod amqp;
mod direct;

pub use amqp::AmqpTransport;
pub use direct::DirectCallTransport;

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use vidcap_core::models::Task;
use vidcap_core::{Config, TransportKind};

use crate::error::AnnounceError;

#[async_trait]
pub trait TaskTransport: Send + Sync {
    /// Deliver one task. `Ok` means the receiving side acknowledged it.
    async fn deliver(&self, task: &Task) -> Result<(), AnnounceError>;

    fn kind(&self) -> TransportKind;
}

/// Build the transport selected by `TASK_TRANSPORT`.
pub fn create_transport(config: &Config) -> Result<Arc<dyn TaskTransport>, AnnounceError> {
    match config.task_transport() {
        TransportKind::Queue => {
            let uri = config
                .amqp_url()
                .ok_or_else(|| AnnounceError::Config("AMQP_URL not configured".to_string()))?;
            tracing::info!(queue = %config.task_queue_name(), "Using broker queue task transport");
            Ok(Arc::new(AmqpTransport::new(
                uri.to_string(),
                config.task_queue_name().to_string(),
                Duration::from_secs(config.task_call_timeout_secs()),
            )))
        }
        TransportKind::Direct => {
            let url = config.task_allocator_url().ok_or_else(|| {
                AnnounceError::Config("TASK_ALLOCATOR_URL not configured".to_string())
            })?;
            tracing::info!(allocator_url = %url, "Using direct-call task transport");
            Ok(Arc::new(DirectCallTransport::new(
                url.to_string(),
                Duration::from_secs(config.task_call_timeout_secs()),
            )?))
        }
    }
}
