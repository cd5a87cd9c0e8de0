//! Vidcap Core Library
//!
//! This crate provides the domain models, error types and configuration shared by
//! every vidcap component: the HTTP API, the storage backends, the metadata
//! database and the task announcer.

pub mod config;
pub mod constants;
pub mod dispatch_types;
pub mod error;
pub mod models;
pub mod storage_types;

// Re-export commonly used types
pub use config::{BaseConfig, Config, UploadServiceConfig};
pub use dispatch_types::{AnnounceMode, TransportKind};
pub use error::{AppError, ErrorMetadata, LogLevel, ResponseStatusMode};
pub use storage_types::StorageBackend;
