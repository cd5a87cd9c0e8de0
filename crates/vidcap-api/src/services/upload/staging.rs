//! Temporary staging of upload streams on local disk.

use std::io;
use std::path::{Path, PathBuf};
use tempfile::{Builder, TempPath};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use vidcap_core::constants::TEMP_FILE_PREFIX;
use vidcap_core::AppError;

const CHUNK_SIZE: usize = 64 * 1024;
const MAX_EXTENSION_LEN: usize = 8;

#[derive(Debug, thiserror::Error)]
pub enum StageError {
    /// The incoming stream failed.
    #[error("Failed to read upload stream: {0}")]
    Read(io::Error),

    /// The scratch file could not be created or written.
    #[error("Failed to write staged file: {0}")]
    Write(io::Error),

    #[error("Upload exceeds {limit} bytes")]
    TooLarge { limit: usize },
}

impl From<StageError> for AppError {
    fn from(err: StageError) -> Self {
        match err {
            StageError::Read(e) => AppError::MalformedRequest(e.to_string()),
            StageError::Write(e) => AppError::Staging(e.to_string()),
            StageError::TooLarge { limit } => {
                AppError::PayloadTooLarge(format!("upload exceeds {} bytes", limit))
            }
        }
    }
}

/// Writes upload streams to uniquely named files in a scratch directory.
#[derive(Debug, Clone)]
pub struct Stager {
    dir: PathBuf,
    max_bytes: usize,
}

impl Stager {
    /// `dir` defaults to the OS temp directory.
    pub fn new(dir: Option<PathBuf>, max_bytes: usize) -> Self {
        Self {
            dir: dir.unwrap_or_else(std::env::temp_dir),
            max_bytes,
        }
    }

    /// Copy `reader` to a new `upload-*` file and flush it.
    ///
    /// `extension` (from the client's file name) is kept as the file suffix when it is
    /// short and alphanumeric. On any error the partial file is removed.
    pub async fn stage<R>(&self, mut reader: R, extension: Option<&str>) -> Result<StagedFile, StageError>
    where
        R: AsyncRead + Unpin,
    {
        let suffix = extension
            .filter(|ext| {
                !ext.is_empty()
                    && ext.len() <= MAX_EXTENSION_LEN
                    && ext.chars().all(|c| c.is_ascii_alphanumeric())
            })
            .map(|ext| format!(".{}", ext.to_ascii_lowercase()))
            .unwrap_or_default();

        let named = Builder::new()
            .prefix(TEMP_FILE_PREFIX)
            .suffix(&suffix)
            .tempfile_in(&self.dir)
            .map_err(StageError::Write)?;
        let (file, temp_path) = named.into_parts();
        let mut file = tokio::fs::File::from_std(file);

        let mut buffer = vec![0u8; CHUNK_SIZE];
        let mut total = 0usize;
        loop {
            let read = reader.read(&mut buffer).await.map_err(StageError::Read)?;
            if read == 0 {
                break;
            }
            total += read;
            if total > self.max_bytes {
                return Err(StageError::TooLarge {
                    limit: self.max_bytes,
                });
            }
            file.write_all(&buffer[..read])
                .await
                .map_err(StageError::Write)?;
        }
        file.flush().await.map_err(StageError::Write)?;
        drop(file);

        tracing::debug!(path = %temp_path.display(), size_bytes = total, "Upload staged");
        Ok(StagedFile::new(temp_path, total as u64))
    }
}

/// A staged upload owned by one request. Removed from disk on `release` or drop.
#[derive(Debug)]
pub struct StagedFile {
    path: PathBuf,
    size: u64,
    guard: Option<TempPath>,
}

impl StagedFile {
    fn new(temp_path: TempPath, size: u64) -> Self {
        Self {
            path: temp_path.to_path_buf(),
            size,
            guard: Some(temp_path),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn is_released(&self) -> bool {
        self.guard.is_none()
    }

    /// Remove the file now. Safe to call more than once; a missing file is not an error.
    pub fn release(&mut self) {
        if let Some(guard) = self.guard.take() {
            match guard.close() {
                Ok(()) => tracing::debug!(path = %self.path.display(), "Staged file removed"),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => tracing::warn!(
                    error = %e,
                    path = %self.path.display(),
                    "Failed to remove staged file"
                ),
            }
        }
    }
}

impl Drop for StagedFile {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn entries(dir: &Path) -> Vec<PathBuf> {
        std::fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().path())
            .collect()
    }

    #[tokio::test]
    async fn test_stage_writes_whole_stream() {
        let dir = tempdir().unwrap();
        let stager = Stager::new(Some(dir.path().to_path_buf()), 1024);

        let staged = stager.stage(&b"frame data"[..], Some("MP4")).await.unwrap();

        let name = staged.path().file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("upload-"));
        assert!(name.ends_with(".mp4"));
        assert_eq!(staged.size(), 10);
        assert_eq!(std::fs::read(staged.path()).unwrap(), b"frame data");
    }

    #[tokio::test]
    async fn test_release_is_idempotent() {
        let dir = tempdir().unwrap();
        let stager = Stager::new(Some(dir.path().to_path_buf()), 1024);

        let mut staged = stager.stage(&b"abc"[..], None).await.unwrap();
        let path = staged.path().to_path_buf();
        staged.release();
        assert!(!path.exists());
        assert!(staged.is_released());
        staged.release();
    }

    #[tokio::test]
    async fn test_release_tolerates_missing_file() {
        let dir = tempdir().unwrap();
        let stager = Stager::new(Some(dir.path().to_path_buf()), 1024);

        let mut staged = stager.stage(&b"abc"[..], None).await.unwrap();
        std::fs::remove_file(staged.path()).unwrap();
        staged.release();
        assert!(staged.is_released());
    }

    #[tokio::test]
    async fn test_drop_removes_file() {
        let dir = tempdir().unwrap();
        let stager = Stager::new(Some(dir.path().to_path_buf()), 1024);

        let staged = stager.stage(&b"abc"[..], None).await.unwrap();
        let path = staged.path().to_path_buf();
        drop(staged);
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_over_limit_fails_and_leaves_nothing() {
        let dir = tempdir().unwrap();
        let stager = Stager::new(Some(dir.path().to_path_buf()), 4);

        let err = stager.stage(&b"too long"[..], None).await.unwrap_err();
        assert!(matches!(err, StageError::TooLarge { limit: 4 }));
        assert!(matches!(AppError::from(err), AppError::PayloadTooLarge(_)));
        assert!(entries(dir.path()).is_empty());
    }

    #[tokio::test]
    async fn test_identical_content_gets_distinct_paths() {
        let dir = tempdir().unwrap();
        let stager = Stager::new(Some(dir.path().to_path_buf()), 1024);

        let first = stager.stage(&b"same"[..], Some("mp4")).await.unwrap();
        let second = stager.stage(&b"same"[..], Some("mp4")).await.unwrap();
        assert_ne!(first.path(), second.path());
        assert_eq!(entries(dir.path()).len(), 2);
    }

    #[tokio::test]
    async fn test_unsafe_extension_is_dropped() {
        let dir = tempdir().unwrap();
        let stager = Stager::new(Some(dir.path().to_path_buf()), 1024);

        let staged = stager.stage(&b"x"[..], Some("../sh")).await.unwrap();
        assert_eq!(staged.path().parent().unwrap(), dir.path());
        assert!(staged.path().extension().is_none());
    }

    #[tokio::test]
    async fn test_missing_dir_is_write_error() {
        let stager = Stager::new(Some(PathBuf::from("/nonexistent/vidcap/scratch")), 1024);
        let err = stager.stage(&b"x"[..], None).await.unwrap_err();
        assert!(matches!(err, StageError::Write(_)));
        assert!(matches!(AppError::from(err), AppError::Staging(_)));
    }
}
