//! Background job execution for detached task announcements.
//!
//! Jobs are fire-and-forget: no join handle is returned and nothing is cancelled on
//! shutdown. A job accepted by [`TokioExecutor`] counts against a fixed number of
//! in-flight slots until it finishes.

use futures::future::BoxFuture;
use std::sync::{Arc, Mutex};
use tokio::sync::Semaphore;

use crate::error::SubmitError;

pub type BoxJob = BoxFuture<'static, ()>;

pub trait BackgroundExecutor: Send + Sync {
    /// Accept a job for execution. Must not block.
    fn submit(&self, job: BoxJob) -> Result<(), SubmitError>;
}

/// Runs jobs on the current tokio runtime, at most `max_in_flight` at a time.
///
/// When every slot is taken `submit` fails with [`SubmitError::Saturated`]
/// instead of queueing.
#[derive(Clone)]
pub struct TokioExecutor {
    permits: Arc<Semaphore>,
    max_in_flight: usize,
}

impl TokioExecutor {
    pub fn new(max_in_flight: usize) -> Self {
        let max_in_flight = max_in_flight.max(1);
        Self {
            permits: Arc::new(Semaphore::new(max_in_flight)),
            max_in_flight,
        }
    }

    /// Number of jobs currently running.
    pub fn in_flight(&self) -> usize {
        self.max_in_flight - self.permits.available_permits()
    }
}

impl BackgroundExecutor for TokioExecutor {
    fn submit(&self, job: BoxJob) -> Result<(), SubmitError> {
        let handle = tokio::runtime::Handle::try_current().map_err(|_| SubmitError::NoRuntime)?;
        let permit = self
            .permits
            .clone()
            .try_acquire_owned()
            .map_err(|_| SubmitError::Saturated {
                max_in_flight: self.max_in_flight,
            })?;

        handle.spawn(async move {
            job.await;
            drop(permit);
        });
        Ok(())
    }
}

/// Holds submitted jobs until [`DeferredExecutor::run_pending`] is awaited.
///
/// Lets tests observe what an upload detached without racing the runtime.
#[derive(Default)]
pub struct DeferredExecutor {
    pending: Mutex<Vec<BoxJob>>,
}

impl DeferredExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.lock().map(|jobs| jobs.len()).unwrap_or(0)
    }

    /// Run every job submitted so far, in submission order. Returns how many ran.
    pub async fn run_pending(&self) -> usize {
        let jobs = match self.pending.lock() {
            Ok(mut jobs) => std::mem::take(&mut *jobs),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        };
        let count = jobs.len();
        for job in jobs {
            job.await;
        }
        count
    }
}

impl BackgroundExecutor for DeferredExecutor {
    fn submit(&self, job: BoxJob) -> Result<(), SubmitError> {
        match self.pending.lock() {
            Ok(mut jobs) => jobs.push(job),
            Err(poisoned) => poisoned.into_inner().push(job),
        }
        Ok(())
    }
}
