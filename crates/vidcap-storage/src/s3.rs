use crate::traits::{Storage, StorageError, StorageResult};
use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use object_store::aws::{AmazonS3, AmazonS3Builder};
use object_store::path::Path as ObjectPath;
use object_store::{ObjectStoreExt, PutPayload, Result as ObjectResult};
use std::path::Path;
use uuid::Uuid;

/// S3 storage implementation
///
/// Upload-addressed: every upload gets a fresh `videos/{uuid}` key, and that key is
/// the CID. Identical content uploaded twice is stored twice.
#[derive(Clone)]
pub struct S3Storage {
    store: AmazonS3,
    bucket: String,
}

impl S3Storage {
    /// Create a new S3Storage instance
    ///
    /// # Arguments
    /// * `bucket` - S3 bucket name
    /// * `region` - AWS region (or region identifier for S3-compatible providers)
    /// * `endpoint_url` - Optional custom endpoint URL for S3-compatible providers
    ///   (e.g., "http://localhost:9000" for MinIO)
    pub fn new(bucket: String, region: String, endpoint_url: Option<String>) -> StorageResult<Self> {
        let mut builder = AmazonS3Builder::from_env()
            .with_region(region)
            .with_bucket_name(bucket.clone());

        if let Some(ref endpoint) = endpoint_url {
            let allow_http = endpoint.starts_with("http://");
            builder = builder
                .with_endpoint(endpoint.clone())
                .with_allow_http(allow_http);
        }

        let store = builder
            .build()
            .map_err(|e| StorageError::ConfigError(e.to_string()))?;

        Ok(S3Storage { store, bucket })
    }

    /// Generate a unique object key, keeping the staged file's extension if it has one
    fn generate_key(path: &Path) -> String {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if !ext.is_empty() => format!("videos/{}.{}", Uuid::new_v4(), ext),
            _ => format!("videos/{}", Uuid::new_v4()),
        }
    }
}

#[async_trait]
impl Storage for S3Storage {
    async fn upload_video(&self, path: &Path) -> StorageResult<String> {
        let data = tokio::fs::read(path).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let key = Self::generate_key(path);
        let size = data.len() as u64;
        let location = ObjectPath::from(key.clone());

        let start = std::time::Instant::now();

        let result: ObjectResult<_> = self
            .store
            .put(&location, PutPayload::from(Bytes::from(data)))
            .await;

        result.map_err(|e| {
            tracing::error!(
                error = %e,
                bucket = %self.bucket,
                key = %key,
                size_bytes = size,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "S3 upload failed"
            );
            StorageError::UploadFailed(e.to_string())
        })?;

        tracing::info!(
            bucket = %self.bucket,
            key = %key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 upload successful"
        );

        Ok(key)
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::S3
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_key_is_unique_and_keeps_extension() {
        let path = Path::new("/tmp/upload-abc123.mp4");
        let a = S3Storage::generate_key(path);
        let b = S3Storage::generate_key(path);
        assert_ne!(a, b);
        assert!(a.starts_with("videos/"));
        assert!(a.ends_with(".mp4"));
    }

    #[test]
    fn test_generate_key_without_extension() {
        let key = S3Storage::generate_key(Path::new("/tmp/upload-abc123"));
        assert!(key.starts_with("videos/"));
        assert!(!key.contains('.'));
    }
}
