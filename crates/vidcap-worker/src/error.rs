use vidcap_core::AppError;

/// A task could not be handed to the processing subsystem.
#[derive(Debug, thiserror::Error)]
pub enum AnnounceError {
    #[error("Broker error: {0}")]
    Broker(#[from] lapin::Error),

    #[error("Broker did not confirm publish to queue {queue}")]
    NotConfirmed { queue: String },

    #[error("Task delivery to {target} timed out after {timeout_secs}s")]
    Timeout { target: String, timeout_secs: u64 },

    #[error("Task allocator request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Task allocator rejected task with status {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("Transport configuration error: {0}")]
    Config(String),
}

impl From<AnnounceError> for AppError {
    fn from(err: AnnounceError) -> Self {
        match err {
            AnnounceError::Config(msg) => AppError::Configuration(msg),
            other => AppError::Announce(other.to_string()),
        }
    }
}

/// A background job was not accepted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    #[error("Background executor saturated ({max_in_flight} jobs in flight)")]
    Saturated { max_in_flight: usize },

    #[error("No async runtime available to run background job")]
    NoRuntime,
}
