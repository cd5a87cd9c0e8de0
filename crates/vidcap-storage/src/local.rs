use crate::traits::{Storage, StorageError, StorageResult};
use crate::StorageBackend;
use async_trait::async_trait;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use uuid::Uuid;

const COPY_BUFFER_SIZE: usize = 64 * 1024;

/// Content-addressed local filesystem storage
///
/// Blobs live at `{base_path}/videos/{cid}` where the CID is the lowercase hex
/// SHA-256 of the content. Uploading identical bytes twice stores them once.
#[derive(Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    /// Create a new LocalStorage instance
    ///
    /// # Arguments
    /// * `base_path` - Root directory for blob storage (e.g., "/var/lib/vidcap/blobs")
    pub async fn new(base_path: impl Into<PathBuf>) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(base_path.join("videos"))
            .await
            .map_err(|e| {
                StorageError::ConfigError(format!(
                    "Failed to create storage directory {}: {}",
                    base_path.display(),
                    e
                ))
            })?;

        Ok(LocalStorage { base_path })
    }

    fn videos_dir(&self) -> PathBuf {
        self.base_path.join("videos")
    }

    /// Path of a stored blob. `cid` must be a hex digest produced by this backend.
    pub fn blob_path(&self, cid: &str) -> StorageResult<PathBuf> {
        if cid.is_empty() || !cid.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(StorageError::BackendError(format!("Invalid CID: {}", cid)));
        }
        Ok(self.videos_dir().join(cid))
    }

    /// Copy `source` into `dest` while hashing it; returns (hex digest, bytes copied).
    async fn copy_and_hash(source: &Path, dest: &Path) -> StorageResult<(String, u64)> {
        let mut reader = fs::File::open(source).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to open {}: {}", source.display(), e))
        })?;
        let mut writer = fs::File::create(dest).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to create file {}: {}", dest.display(), e))
        })?;

        let mut hasher = Sha256::new();
        let mut buffer = vec![0u8; COPY_BUFFER_SIZE];
        let mut total = 0u64;
        loop {
            let read = reader.read(&mut buffer).await?;
            if read == 0 {
                break;
            }
            hasher.update(&buffer[..read]);
            writer.write_all(&buffer[..read]).await.map_err(|e| {
                StorageError::UploadFailed(format!("Failed to write file {}: {}", dest.display(), e))
            })?;
            total += read as u64;
        }

        writer.sync_all().await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to sync file {}: {}", dest.display(), e))
        })?;

        Ok((hex::encode(hasher.finalize()), total))
    }
}

#[async_trait]
impl Storage for LocalStorage {
    async fn upload_video(&self, path: &Path) -> StorageResult<String> {
        let start = std::time::Instant::now();
        let incoming = self
            .videos_dir()
            .join(format!(".incoming-{}", Uuid::new_v4()));

        let (cid, size) = match Self::copy_and_hash(path, &incoming).await {
            Ok(result) => result,
            Err(e) => {
                let _ = fs::remove_file(&incoming).await;
                return Err(e);
            }
        };

        let target = self.blob_path(&cid)?;
        if fs::try_exists(&target).await.unwrap_or(false) {
            let _ = fs::remove_file(&incoming).await;
            tracing::info!(
                cid = %cid,
                size_bytes = size,
                "Local storage already holds content, reusing CID"
            );
            return Ok(cid);
        }

        if let Err(e) = fs::rename(&incoming, &target).await {
            let _ = fs::remove_file(&incoming).await;
            return Err(StorageError::UploadFailed(format!(
                "Failed to move blob into place {}: {}",
                target.display(),
                e
            )));
        }

        tracing::info!(
            path = %target.display(),
            cid = %cid,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage upload successful"
        );

        Ok(cid)
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}

#[cfg(all(test, feature = "storage-local"))]
mod tests {
    use super::*;
    use tempfile::tempdir;

    async fn write_source(dir: &Path, name: &str, data: &[u8]) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, data).await.unwrap();
        path
    }

    #[tokio::test]
    async fn test_local_storage_upload_returns_sha256_cid() {
        let store_dir = tempdir().unwrap();
        let src_dir = tempdir().unwrap();
        let storage = LocalStorage::new(store_dir.path()).await.unwrap();

        let source = write_source(src_dir.path(), "clip.mp4", b"hello").await;
        let cid = storage.upload_video(&source).await.unwrap();

        assert_eq!(
            cid,
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
        let stored = fs::read(storage.blob_path(&cid).unwrap()).await.unwrap();
        assert_eq!(stored, b"hello");
        assert!(fs::try_exists(&source).await.unwrap());
    }

    #[tokio::test]
    async fn test_identical_content_shares_cid() {
        let store_dir = tempdir().unwrap();
        let src_dir = tempdir().unwrap();
        let storage = LocalStorage::new(store_dir.path()).await.unwrap();

        let first = write_source(src_dir.path(), "a.mp4", b"same bytes").await;
        let second = write_source(src_dir.path(), "b.mp4", b"same bytes").await;

        let cid_a = storage.upload_video(&first).await.unwrap();
        let cid_b = storage.upload_video(&second).await.unwrap();
        assert_eq!(cid_a, cid_b);

        let mut entries = fs::read_dir(storage.videos_dir()).await.unwrap();
        let mut count = 0;
        while let Some(entry) = entries.next_entry().await.unwrap() {
            assert!(!entry.file_name().to_string_lossy().starts_with(".incoming-"));
            count += 1;
        }
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_missing_source_fails_without_leftovers() {
        let store_dir = tempdir().unwrap();
        let storage = LocalStorage::new(store_dir.path()).await.unwrap();

        let result = storage
            .upload_video(Path::new("/nonexistent/vidcap/clip.mp4"))
            .await;
        assert!(matches!(result, Err(StorageError::UploadFailed(_))));

        let mut entries = fs::read_dir(storage.videos_dir()).await.unwrap();
        assert!(entries.next_entry().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_blob_path_rejects_non_hex() {
        let store_dir = tempdir().unwrap();
        let storage = LocalStorage::new(store_dir.path()).await.unwrap();

        assert!(storage.blob_path("../../etc/passwd").is_err());
        assert!(storage.blob_path("").is_err());
        assert!(storage.blob_path("abc123").is_ok());
    }
}
