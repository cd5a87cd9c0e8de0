use std::sync::Arc;
use vidcap_core::{Config, ResponseStatusMode};
use vidcap_db::Database;
use vidcap_storage::Storage;
use vidcap_worker::TaskAnnouncer;

use crate::services::upload::{Stager, UploadCoordinator};

/// Shared application state. Collaborators are built once at startup and injected.
pub struct AppState {
    pub config: Config,
    pub coordinator: UploadCoordinator,
    pub database: Arc<dyn Database>,
    pub storage: Arc<dyn Storage>,
    pub announcer: TaskAnnouncer,
}

impl AppState {
    pub fn new(
        config: Config,
        storage: Arc<dyn Storage>,
        database: Arc<dyn Database>,
        announcer: TaskAnnouncer,
    ) -> Self {
        let stager = Stager::new(
            config.upload_temp_dir().map(|p| p.to_path_buf()),
            config.upload_size_limit_bytes(),
        );
        let coordinator = UploadCoordinator::new(
            stager,
            storage.clone(),
            announcer.clone(),
            database.clone(),
        );

        Self {
            config,
            coordinator,
            database,
            storage,
            announcer,
        }
    }

    pub fn response_status_mode(&self) -> ResponseStatusMode {
        self.config.response_status_mode()
    }
}
