//! Task announcement settings selected by configuration.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

/// Whether an upload request waits for the task announcement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnounceMode {
    /// The request blocks on delivery; a failed delivery fails the upload.
    Sync,
    /// Delivery runs detached; failures are logged and never reach the caller.
    Async,
}

/// How a task reaches the processing subsystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportKind {
    /// Persistent message on a durable broker queue.
    Queue,
    /// One-shot call to the task allocator service.
    Direct,
}

impl FromStr for AnnounceMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sync" | "synchronous" => Ok(AnnounceMode::Sync),
            "async" | "asynchronous" => Ok(AnnounceMode::Async),
            _ => Err(anyhow::anyhow!("Invalid announce mode: {}", s)),
        }
    }
}

impl Display for AnnounceMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            AnnounceMode::Sync => write!(f, "sync"),
            AnnounceMode::Async => write!(f, "async"),
        }
    }
}

impl FromStr for TransportKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "queue" | "amqp" => Ok(TransportKind::Queue),
            "direct" | "rpc" => Ok(TransportKind::Direct),
            _ => Err(anyhow::anyhow!("Invalid task transport: {}", s)),
        }
    }
}

impl Display for TransportKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            TransportKind::Queue => write!(f, "queue"),
            TransportKind::Direct => write!(f, "direct"),
        }
    }
}
