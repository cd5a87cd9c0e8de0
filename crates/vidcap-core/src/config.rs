//! Configuration module
//!
//! Configuration is read once from the environment (and an optional `.env` file) at
//! process start. There is no hot reload.

use std::env;
use std::path::PathBuf;

use crate::constants::{DEFAULT_TASK_QUEUE_NAME, UPLOAD_SIZE_LIMIT_BYTES};
use crate::dispatch_types::{AnnounceMode, TransportKind};
use crate::error::ResponseStatusMode;
use crate::storage_types::StorageBackend;

// Common constants
const SERVER_PORT: u16 = 8080;
const MAX_CONNECTIONS: u32 = 20;
const CONNECTION_TIMEOUT_SECS: u64 = 30;
const TASK_CALL_TIMEOUT_SECS: u64 = 10;
const ANNOUNCE_MAX_IN_FLIGHT: usize = 64;

/// Server-level settings
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub environment: String,
    pub log_format: String,
    pub response_status_mode: ResponseStatusMode,
}

/// Upload service configuration
#[derive(Clone, Debug)]
pub struct UploadServiceConfig {
    pub base: BaseConfig,
    // Database
    pub database_url: String,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,
    // Storage
    pub storage_backend: StorageBackend,
    pub local_storage_path: Option<String>,
    pub s3_bucket: Option<String>,
    pub s3_region: Option<String>,
    pub s3_endpoint: Option<String>, // Custom endpoint for S3-compatible providers (MinIO, etc.)
    pub aws_region: Option<String>,
    pub ipfs_api_url: Option<String>,
    // Task announcement
    pub task_transport: TransportKind,
    pub announce_mode: AnnounceMode,
    pub amqp_url: Option<String>,
    pub task_queue_name: String,
    pub task_allocator_url: Option<String>,
    pub task_call_timeout_secs: u64,
    pub announce_max_in_flight: usize,
    // Uploads
    pub upload_size_limit_bytes: usize,
    pub upload_temp_dir: Option<PathBuf>,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config(pub Box<UploadServiceConfig>);

impl Config {
    fn as_upload(&self) -> &UploadServiceConfig {
        &self.0
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let environment = self.as_upload().base.environment.to_lowercase();
        environment == "production" || environment == "prod"
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        let config = UploadServiceConfig::from_env()?;
        Ok(Config(Box::new(config)))
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.as_upload().validate()
    }

    pub fn server_port(&self) -> u16 {
        self.as_upload().base.server_port
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.as_upload().base.cors_origins
    }

    pub fn environment(&self) -> &str {
        &self.as_upload().base.environment
    }

    pub fn log_format(&self) -> &str {
        &self.as_upload().base.log_format
    }

    pub fn response_status_mode(&self) -> ResponseStatusMode {
        self.as_upload().base.response_status_mode
    }

    pub fn database_url(&self) -> &str {
        &self.as_upload().database_url
    }

    pub fn db_max_connections(&self) -> u32 {
        self.as_upload().db_max_connections
    }

    pub fn db_timeout_seconds(&self) -> u64 {
        self.as_upload().db_timeout_seconds
    }

    pub fn storage_backend(&self) -> StorageBackend {
        self.as_upload().storage_backend
    }

    pub fn local_storage_path(&self) -> Option<&str> {
        self.as_upload().local_storage_path.as_deref()
    }

    pub fn s3_bucket(&self) -> Option<&str> {
        self.as_upload().s3_bucket.as_deref()
    }

    pub fn s3_region(&self) -> Option<&str> {
        self.as_upload().s3_region.as_deref()
    }

    pub fn s3_endpoint(&self) -> Option<&str> {
        self.as_upload().s3_endpoint.as_deref()
    }

    pub fn aws_region(&self) -> Option<&str> {
        self.as_upload().aws_region.as_deref()
    }

    pub fn ipfs_api_url(&self) -> Option<&str> {
        self.as_upload().ipfs_api_url.as_deref()
    }

    pub fn task_transport(&self) -> TransportKind {
        self.as_upload().task_transport
    }

    pub fn announce_mode(&self) -> AnnounceMode {
        self.as_upload().announce_mode
    }

    pub fn amqp_url(&self) -> Option<&str> {
        self.as_upload().amqp_url.as_deref()
    }

    pub fn task_queue_name(&self) -> &str {
        &self.as_upload().task_queue_name
    }

    pub fn task_allocator_url(&self) -> Option<&str> {
        self.as_upload().task_allocator_url.as_deref()
    }

    pub fn task_call_timeout_secs(&self) -> u64 {
        self.as_upload().task_call_timeout_secs
    }

    pub fn announce_max_in_flight(&self) -> usize {
        self.as_upload().announce_max_in_flight
    }

    pub fn upload_size_limit_bytes(&self) -> usize {
        self.as_upload().upload_size_limit_bytes
    }

    pub fn upload_temp_dir(&self) -> Option<&std::path::Path> {
        self.as_upload().upload_temp_dir.as_deref()
    }
}

impl UploadServiceConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins: Vec<String> = env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let response_status_mode = env::var("RESPONSE_STATUS_MODE")
            .ok()
            .map(|s| s.parse::<ResponseStatusMode>())
            .transpose()?
            .unwrap_or_default();

        let base = BaseConfig {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| SERVER_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            cors_origins,
            environment,
            log_format: env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "compact".to_string())
                .to_lowercase(),
            response_status_mode,
        };

        let storage_backend = env::var("STORAGE_BACKEND")
            .unwrap_or_else(|_| "local".to_string())
            .parse::<StorageBackend>()?;

        let task_transport = env::var("TASK_TRANSPORT")
            .unwrap_or_else(|_| "queue".to_string())
            .parse::<TransportKind>()?;

        let announce_mode = env::var("ANNOUNCE_MODE")
            .unwrap_or_else(|_| "sync".to_string())
            .parse::<AnnounceMode>()?;

        Ok(UploadServiceConfig {
            base,
            database_url: env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?,
            db_max_connections: env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| MAX_CONNECTIONS.to_string())
                .parse()
                .unwrap_or(MAX_CONNECTIONS),
            db_timeout_seconds: env::var("DB_TIMEOUT_SECONDS")
                .unwrap_or_else(|_| CONNECTION_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(CONNECTION_TIMEOUT_SECS),
            storage_backend,
            local_storage_path: env::var("LOCAL_STORAGE_PATH").ok(),
            s3_bucket: env::var("S3_BUCKET").ok(),
            s3_region: env::var("S3_REGION").ok(),
            s3_endpoint: env::var("S3_ENDPOINT").ok(),
            aws_region: env::var("AWS_REGION").ok(),
            ipfs_api_url: env::var("IPFS_API_URL").ok(),
            task_transport,
            announce_mode,
            amqp_url: env::var("AMQP_URL").or_else(|_| env::var("RABBITMQ_URL")).ok(),
            task_queue_name: env::var("TASK_QUEUE_NAME")
                .unwrap_or_else(|_| DEFAULT_TASK_QUEUE_NAME.to_string()),
            task_allocator_url: env::var("TASK_ALLOCATOR_URL").ok(),
            task_call_timeout_secs: env::var("TASK_CALL_TIMEOUT_SECS")
                .unwrap_or_else(|_| TASK_CALL_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(TASK_CALL_TIMEOUT_SECS),
            announce_max_in_flight: env::var("ANNOUNCE_MAX_IN_FLIGHT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(ANNOUNCE_MAX_IN_FLIGHT)
                .max(1),
            upload_size_limit_bytes: env::var("UPLOAD_SIZE_LIMIT_BYTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(UPLOAD_SIZE_LIMIT_BYTES),
            upload_temp_dir: env::var("UPLOAD_TEMP_DIR").ok().map(PathBuf::from),
        })
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.base.server_port == 0 {
            return Err(anyhow::anyhow!("PORT must be greater than 0"));
        }

        if self.upload_size_limit_bytes == 0 {
            return Err(anyhow::anyhow!(
                "UPLOAD_SIZE_LIMIT_BYTES must be greater than 0"
            ));
        }

        if self.task_call_timeout_secs == 0 {
            return Err(anyhow::anyhow!(
                "TASK_CALL_TIMEOUT_SECS must be greater than 0"
            ));
        }

        let is_production = self.base.environment.eq_ignore_ascii_case("production")
            || self.base.environment.eq_ignore_ascii_case("prod");
        if is_production && self.base.cors_origins.iter().any(|o| o == "*") {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        match self.storage_backend {
            StorageBackend::Local if self.local_storage_path.is_none() => {
                return Err(anyhow::anyhow!(
                    "LOCAL_STORAGE_PATH must be set when STORAGE_BACKEND=local"
                ));
            }
            StorageBackend::S3 if self.s3_bucket.is_none() => {
                return Err(anyhow::anyhow!(
                    "S3_BUCKET must be set when STORAGE_BACKEND=s3"
                ));
            }
            StorageBackend::S3 if self.s3_region.is_none() && self.aws_region.is_none() => {
                return Err(anyhow::anyhow!(
                    "S3_REGION or AWS_REGION must be set when STORAGE_BACKEND=s3"
                ));
            }
            StorageBackend::Ipfs if self.ipfs_api_url.is_none() => {
                return Err(anyhow::anyhow!(
                    "IPFS_API_URL must be set when STORAGE_BACKEND=ipfs"
                ));
            }
            _ => {}
        }

        match self.task_transport {
            TransportKind::Queue if self.amqp_url.is_none() => Err(anyhow::anyhow!(
                "AMQP_URL must be set when TASK_TRANSPORT=queue"
            )),
            TransportKind::Direct if self.task_allocator_url.is_none() => Err(anyhow::anyhow!(
                "TASK_ALLOCATOR_URL must be set when TASK_TRANSPORT=direct"
            )),
            _ => Ok(()),
        }
    }
}
