//! Error types module
//!
//! Every failure of the upload pipeline is expressed as an `AppError`. The variants
//! follow the pipeline steps (parse, stage, store, announce, persist) so a handler can
//! log which gate failed without inspecting messages.
//!
//! `From<sqlx::Error>` is gated behind the `sqlx` feature.

use std::str::FromStr;

#[cfg(feature = "sqlx")]
use sqlx::Error as SqlxError;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like malformed requests
    Debug,
    /// Warning level - for recoverable issues
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// How error responses pick their HTTP status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseStatusMode {
    /// Always 200; the plain-text body carries the outcome.
    #[default]
    Compat,
    /// Status taken from [`ErrorMetadata::http_status_code`].
    Strict,
}

impl FromStr for ResponseStatusMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "compat" => Ok(ResponseStatusMode::Compat),
            "strict" => Ok(ResponseStatusMode::Strict),
            _ => Err(anyhow::anyhow!("Invalid response status mode: {}", s)),
        }
    }
}

/// Metadata for error responses - defines how an error should be presented
pub trait ErrorMetadata {
    /// HTTP status code to return in strict mode
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "STORAGE_ERROR")
    fn error_code(&self) -> &'static str;

    /// Whether the caller may retry the whole upload
    fn is_recoverable(&self) -> bool;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Staging error: {0}")]
    Staging(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Announce error: {0}")]
    Announce(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

#[cfg(feature = "sqlx")]
impl From<SqlxError> for AppError {
    fn from(err: SqlxError) -> Self {
        AppError::Persistence(err.to_string())
    }
}

/// Static metadata for each variant: (http_status, error_code, recoverable, log_level).
fn app_error_static_metadata(err: &AppError) -> (u16, &'static str, bool, LogLevel) {
    match err {
        AppError::MalformedRequest(_) => (400, "MALFORMED_REQUEST", false, LogLevel::Debug),
        AppError::PayloadTooLarge(_) => (413, "PAYLOAD_TOO_LARGE", false, LogLevel::Debug),
        AppError::Staging(_) => (500, "STAGING_ERROR", false, LogLevel::Error),
        AppError::Storage(_) => (502, "STORAGE_ERROR", true, LogLevel::Error),
        AppError::Announce(_) => (502, "ANNOUNCE_ERROR", true, LogLevel::Error),
        AppError::Persistence(_) => (500, "PERSISTENCE_ERROR", true, LogLevel::Error),
        AppError::Configuration(_) => (500, "CONFIGURATION_ERROR", false, LogLevel::Error),
    }
}

impl AppError {
    /// Get the error type name for structured logs
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::MalformedRequest(_) => "MalformedRequest",
            AppError::PayloadTooLarge(_) => "PayloadTooLarge",
            AppError::Staging(_) => "StagingError",
            AppError::Storage(_) => "StorageError",
            AppError::Announce(_) => "AnnounceError",
            AppError::Persistence(_) => "PersistenceError",
            AppError::Configuration(_) => "ConfigurationError",
        }
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        app_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).1
    }

    fn is_recoverable(&self) -> bool {
        app_error_static_metadata(self).2
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).3
    }
}
