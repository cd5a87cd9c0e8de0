//! In-memory collaborators.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use vidcap_core::models::{AdvertisementRecord, Task, VideoRecord};
use vidcap_core::{AppError, StorageBackend, TransportKind};
use vidcap_db::Database;
use vidcap_storage::{Storage, StorageError, StorageResult};
use vidcap_worker::{AnnounceError, TaskTransport};

/// Ordered record of calls into the fakes, e.g. `["storage", "announce", "db:video"]`.
#[derive(Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<&'static str>>>);

impl CallLog {
    pub fn push(&self, call: &'static str) {
        self.0.lock().unwrap().push(call);
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.0.lock().unwrap().clone()
    }
}

/// What the storage fake saw for one upload.
#[derive(Debug, Clone)]
pub struct StoredUpload {
    pub path: PathBuf,
    pub content: Vec<u8>,
    pub cid: Option<String>,
}

pub struct MemoryStorage {
    log: CallLog,
    fail: bool,
    uploads: Mutex<Vec<StoredUpload>>,
}

impl MemoryStorage {
    pub fn new(log: CallLog, fail: bool) -> Self {
        Self {
            log,
            fail,
            uploads: Mutex::new(Vec::new()),
        }
    }

    pub fn uploads(&self) -> Vec<StoredUpload> {
        self.uploads.lock().unwrap().clone()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn upload_video(&self, path: &Path) -> StorageResult<String> {
        self.log.push("storage");
        let content = tokio::fs::read(path).await?;
        let mut uploads = self.uploads.lock().unwrap();
        let cid = (!self.fail).then(|| format!("bafy-test-{}", uploads.len() + 1));
        uploads.push(StoredUpload {
            path: path.to_path_buf(),
            content,
            cid: cid.clone(),
        });
        cid.ok_or_else(|| StorageError::BackendError("storage node unreachable".to_string()))
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}

pub struct MemoryDatabase {
    log: CallLog,
    fail: bool,
    videos: Mutex<Vec<VideoRecord>>,
    ads: Mutex<Vec<AdvertisementRecord>>,
}

impl MemoryDatabase {
    pub fn new(log: CallLog, fail: bool) -> Self {
        Self {
            log,
            fail,
            videos: Mutex::new(Vec::new()),
            ads: Mutex::new(Vec::new()),
        }
    }

    pub fn videos(&self) -> Vec<VideoRecord> {
        self.videos.lock().unwrap().clone()
    }

    pub fn ads(&self) -> Vec<AdvertisementRecord> {
        self.ads.lock().unwrap().clone()
    }

    fn check(&self) -> Result<(), AppError> {
        if self.fail {
            Err(AppError::Persistence("connection refused".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl Database for MemoryDatabase {
    async fn insert_video(&self, video: &VideoRecord) -> Result<(), AppError> {
        self.log.push("db:video");
        self.check()?;
        self.videos.lock().unwrap().push(video.clone());
        Ok(())
    }

    async fn insert_ad(&self, ad: &AdvertisementRecord) -> Result<(), AppError> {
        self.log.push("db:ad");
        self.check()?;
        self.ads.lock().unwrap().push(ad.clone());
        Ok(())
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.check()
    }
}

pub struct RecordingTransport {
    log: CallLog,
    fail: bool,
    attempts: Mutex<Vec<Task>>,
}

impl RecordingTransport {
    pub fn new(log: CallLog, fail: bool) -> Self {
        Self {
            log,
            fail,
            attempts: Mutex::new(Vec::new()),
        }
    }

    /// Every task delivery was attempted for, including failed ones.
    pub fn attempts(&self) -> Vec<Task> {
        self.attempts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TaskTransport for RecordingTransport {
    async fn deliver(&self, task: &Task) -> Result<(), AnnounceError> {
        self.log.push("announce");
        self.attempts.lock().unwrap().push(task.clone());
        if self.fail {
            Err(AnnounceError::Rejected {
                status: 503,
                body: "task allocator unreachable".to_string(),
            })
        } else {
            Ok(())
        }
    }

    fn kind(&self) -> TransportKind {
        TransportKind::Queue
    }
}
