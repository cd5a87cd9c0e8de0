//! Task announcement for vidcap.
//!
//! After a video is stored, a [`Task`](vidcap_core::models::Task) naming it is handed
//! to the processing subsystem. Delivery goes through a [`TaskTransport`] (durable broker
//! queue or direct call to the task allocator); whether the upload request waits for it
//! is decided by [`TaskAnnouncer`] according to the configured
//! [`AnnounceMode`](vidcap_core::AnnounceMode). Detached deliveries run on a
//! [`BackgroundExecutor`].

pub mod announcer;
pub mod error;
pub mod executor;
pub mod transport;

pub use announcer::{AnnounceOutcome, TaskAnnouncer};
pub use error::{AnnounceError, SubmitError};
pub use executor::{BackgroundExecutor, BoxJob, DeferredExecutor, TokioExecutor};
pub use transport::{create_transport, AmqpTransport, DirectCallTransport, TaskTransport};
