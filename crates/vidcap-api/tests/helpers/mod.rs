//! Test helpers: build AppState and router for integration tests.
//!
//! Collaborators are in-memory fakes that share one call log, so tests can assert on
//! which external systems were touched and in what order. Run with
//! `cargo test -p vidcap-api`.

pub mod fakes;
pub mod forms;

use axum_test::TestServer;
use fakes::{CallLog, MemoryDatabase, MemoryStorage, RecordingTransport};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;
use vidcap_api::setup::routes::setup_routes;
use vidcap_api::AppState;
use vidcap_core::{
    AnnounceMode, BaseConfig, Config, ResponseStatusMode, StorageBackend, TransportKind,
    UploadServiceConfig,
};
use vidcap_worker::{DeferredExecutor, TaskAnnouncer};

/// Test application: server, fakes, and the scratch directory uploads are staged in.
pub struct TestApp {
    pub server: TestServer,
    pub log: CallLog,
    pub storage: Arc<MemoryStorage>,
    pub database: Arc<MemoryDatabase>,
    pub transport: Arc<RecordingTransport>,
    pub executor: Arc<DeferredExecutor>,
    pub staging_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    /// Files currently in the staging directory.
    pub fn staged_files(&self) -> Vec<PathBuf> {
        list_dir(self.staging_dir.path())
    }
}

pub fn list_dir(dir: &Path) -> Vec<PathBuf> {
    std::fs::read_dir(dir)
        .expect("Failed to read staging directory")
        .map(|entry| entry.expect("Failed to read directory entry").path())
        .collect()
}

/// Knobs for [`setup_test_app_with`].
#[derive(Clone)]
pub struct TestAppOptions {
    pub announce_mode: AnnounceMode,
    pub status_mode: ResponseStatusMode,
    pub upload_limit: usize,
    pub storage_fails: bool,
    pub transport_fails: bool,
    pub database_fails: bool,
    /// Point the stager at a directory that does not exist.
    pub staging_unavailable: bool,
}

impl Default for TestAppOptions {
    fn default() -> Self {
        Self {
            announce_mode: AnnounceMode::Sync,
            status_mode: ResponseStatusMode::Compat,
            upload_limit: 1024 * 1024,
            storage_fails: false,
            transport_fails: false,
            database_fails: false,
            staging_unavailable: false,
        }
    }
}

pub fn create_test_config(staging_dir: &Path, options: &TestAppOptions) -> Config {
    let upload_temp_dir = if options.staging_unavailable {
        staging_dir.join("missing")
    } else {
        staging_dir.to_path_buf()
    };
    Config(Box::new(UploadServiceConfig {
        base: BaseConfig {
            server_port: 0,
            cors_origins: vec!["*".to_string()],
            environment: "test".to_string(),
            log_format: "compact".to_string(),
            response_status_mode: options.status_mode,
        },
        database_url: "postgres://unused".to_string(),
        db_max_connections: 1,
        db_timeout_seconds: 1,
        storage_backend: StorageBackend::Local,
        local_storage_path: None,
        s3_bucket: None,
        s3_region: None,
        s3_endpoint: None,
        aws_region: None,
        ipfs_api_url: None,
        task_transport: TransportKind::Queue,
        announce_mode: options.announce_mode,
        amqp_url: None,
        task_queue_name: "task_queue".to_string(),
        task_allocator_url: None,
        task_call_timeout_secs: 1,
        announce_max_in_flight: 4,
        upload_size_limit_bytes: options.upload_limit,
        upload_temp_dir: Some(upload_temp_dir),
    }))
}

pub async fn setup_test_app() -> TestApp {
    setup_test_app_with(TestAppOptions::default()).await
}

pub async fn setup_test_app_with(options: TestAppOptions) -> TestApp {
    let staging_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let log = CallLog::default();

    let storage = Arc::new(MemoryStorage::new(log.clone(), options.storage_fails));
    let database = Arc::new(MemoryDatabase::new(log.clone(), options.database_fails));
    let transport = Arc::new(RecordingTransport::new(log.clone(), options.transport_fails));
    let executor = Arc::new(DeferredExecutor::new());

    let config = create_test_config(staging_dir.path(), &options);
    let announcer = TaskAnnouncer::new(transport.clone(), options.announce_mode, executor.clone());
    let state = Arc::new(AppState::new(
        config.clone(),
        storage.clone(),
        database.clone(),
        announcer,
    ));

    let app = setup_routes(&config, state).expect("Failed to build router");
    let server = TestServer::new(app.into_make_service()).expect("Failed to create test server");

    TestApp {
        server,
        log,
        storage,
        database,
        transport,
        executor,
        staging_dir,
    }
}
