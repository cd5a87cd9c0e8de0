use async_trait::async_trait;
use lapin::options::{BasicPublishOptions, ConfirmSelectOptions, QueueDeclareOptions};
use lapin::types::FieldTable;
use lapin::{BasicProperties, Channel, Connection, ConnectionProperties};
use std::time::Duration;
use vidcap_core::constants::TASK_CONTENT_TYPE;
use vidcap_core::models::Task;
use vidcap_core::TransportKind;

use super::TaskTransport;
use crate::error::AnnounceError;

/// AMQP delivery mode for messages that survive a broker restart.
const PERSISTENT_DELIVERY_MODE: u8 = 2;

/// Publishes tasks as persistent messages on a durable broker queue.
///
/// Opens a fresh connection and channel per task and closes both before returning,
/// whether or not the publish succeeded. There is no connection pooling.
///
/// The whole exchange, from connect to publisher confirm, is bounded by `timeout`.
pub struct AmqpTransport {
    uri: String,
    queue: String,
    timeout: Duration,
}

impl AmqpTransport {
    pub fn new(uri: String, queue: String, timeout: Duration) -> Self {
        Self {
            uri,
            queue,
            timeout,
        }
    }

    async fn publish(&self, channel: &Channel, payload: &[u8]) -> Result<(), AnnounceError> {
        channel
            .confirm_select(ConfirmSelectOptions::default())
            .await?;

        channel
            .queue_declare(
                &self.queue,
                QueueDeclareOptions {
                    durable: true,
                    exclusive: false,
                    auto_delete: false,
                    ..Default::default()
                },
                FieldTable::default(),
            )
            .await?;

        let properties = BasicProperties::default()
            .with_delivery_mode(PERSISTENT_DELIVERY_MODE)
            .with_content_type(TASK_CONTENT_TYPE.into());

        let confirmation = channel
            .basic_publish(
                "",
                &self.queue,
                BasicPublishOptions::default(),
                payload,
                properties,
            )
            .await?
            .await?;

        if confirmation.is_nack() {
            return Err(AnnounceError::NotConfirmed {
                queue: self.queue.clone(),
            });
        }
        Ok(())
    }

    /// Connect, publish and close. Dropping this future drops the connection.
    async fn send(&self, payload: &[u8]) -> Result<(), AnnounceError> {
        let connection = Connection::connect(&self.uri, ConnectionProperties::default())
            .await
            .map_err(|e| {
                tracing::error!(error = %e, queue = %self.queue, "Failed to connect to broker");
                AnnounceError::Broker(e)
            })?;

        let result = match connection.create_channel().await {
            Ok(channel) => {
                let published = self.publish(&channel, payload).await;
                if let Err(e) = channel.close(200, "OK").await {
                    tracing::debug!(error = %e, "Failed to close broker channel");
                }
                published
            }
            Err(e) => Err(AnnounceError::Broker(e)),
        };

        if let Err(e) = connection.close(200, "OK").await {
            tracing::debug!(error = %e, "Failed to close broker connection");
        }
        result
    }
}

#[async_trait]
impl TaskTransport for AmqpTransport {
    async fn deliver(&self, task: &Task) -> Result<(), AnnounceError> {
        let payload = task.to_payload();

        let result = match tokio::time::timeout(self.timeout, self.send(&payload)).await {
            Ok(result) => result,
            Err(_) => Err(AnnounceError::Timeout {
                target: self.queue.clone(),
                timeout_secs: self.timeout.as_secs(),
            }),
        };

        match &result {
            Ok(()) => tracing::info!(
                queue = %self.queue,
                video_cid = %task.video_cid,
                payload_bytes = payload.len(),
                "Task published"
            ),
            Err(e) => tracing::error!(
                error = %e,
                queue = %self.queue,
                video_cid = %task.video_cid,
                "Task publish failed"
            ),
        }
        result
    }

    fn kind(&self) -> TransportKind {
        TransportKind::Queue
    }
}
