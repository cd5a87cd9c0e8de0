//! Announce policy: wait for delivery, or detach it.

use std::sync::Arc;
use vidcap_core::models::Task;
use vidcap_core::{AnnounceMode, TransportKind};

use crate::error::AnnounceError;
use crate::executor::BackgroundExecutor;
use crate::transport::TaskTransport;

/// What happened to a task handed to [`TaskAnnouncer::announce`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnounceOutcome {
    /// Delivered and acknowledged before returning.
    Acknowledged,
    /// Handed to the background executor; the result is only logged.
    Detached,
    /// The background executor refused the job; the task was not sent.
    Dropped,
}

#[derive(Clone)]
pub struct TaskAnnouncer {
    transport: Arc<dyn TaskTransport>,
    mode: AnnounceMode,
    executor: Arc<dyn BackgroundExecutor>,
}

impl TaskAnnouncer {
    pub fn new(
        transport: Arc<dyn TaskTransport>,
        mode: AnnounceMode,
        executor: Arc<dyn BackgroundExecutor>,
    ) -> Self {
        Self {
            transport,
            mode,
            executor,
        }
    }

    pub fn mode(&self) -> AnnounceMode {
        self.mode
    }

    pub fn transport_kind(&self) -> TransportKind {
        self.transport.kind()
    }

    /// Announce a stored video.
    ///
    /// In sync mode a delivery failure is returned to the caller. In async mode this
    /// never fails: delivery errors and executor rejections are logged and dropped.
    #[tracing::instrument(skip(self, task), fields(video_cid = %task.video_cid, mode = %self.mode))]
    pub async fn announce(&self, task: Task) -> Result<AnnounceOutcome, AnnounceError> {
        match self.mode {
            AnnounceMode::Sync => {
                self.transport.deliver(&task).await?;
                Ok(AnnounceOutcome::Acknowledged)
            }
            AnnounceMode::Async => {
                let transport = self.transport.clone();
                let video_cid = task.video_cid.clone();
                let job = Box::pin(async move {
                    if let Err(e) = transport.deliver(&task).await {
                        tracing::warn!(
                            error = %e,
                            video_cid = %task.video_cid,
                            transport = %transport.kind(),
                            "Detached task announcement failed"
                        );
                    }
                });

                match self.executor.submit(job) {
                    Ok(()) => Ok(AnnounceOutcome::Detached),
                    Err(e) => {
                        tracing::warn!(error = %e, video_cid = %video_cid, "Task announcement dropped");
                        Ok(AnnounceOutcome::Dropped)
                    }
                }
            }
        }
    }
}
