use crate::traits::{Storage, StorageError, StorageResult};
use crate::StorageBackend;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

const REQUEST_TIMEOUT_SECS: u64 = 120;

/// Response of the IPFS `add` RPC; only the CID is used.
#[derive(Debug, Deserialize)]
struct AddResponse {
    #[serde(rename = "Hash")]
    hash: String,
}

/// IPFS storage implementation using the node's HTTP RPC API (`/api/v0/add`).
///
/// Content-addressed: the node derives the CID from the bytes.
#[derive(Clone)]
pub struct IpfsStorage {
    client: Client,
    api_url: String,
}

impl IpfsStorage {
    /// Create a new IpfsStorage instance
    ///
    /// # Arguments
    /// * `api_url` - Base URL of the node RPC API (e.g., "http://127.0.0.1:5001")
    pub fn new(api_url: String) -> StorageResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| StorageError::ConfigError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(IpfsStorage {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl Storage for IpfsStorage {
    async fn upload_video(&self, path: &Path) -> StorageResult<String> {
        let data = tokio::fs::read(path).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let size = data.len();
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload")
            .to_string();

        let start = std::time::Instant::now();
        let form = Form::new().part("file", Part::bytes(data).file_name(file_name));

        let response = self
            .client
            .post(format!("{}/api/v0/add?pin=true&cid-version=1", self.api_url))
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, api_url = %self.api_url, "IPFS add request failed");
                StorageError::BackendError(format!("IPFS node unreachable: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StorageError::UploadFailed(format!(
                "IPFS add returned {}: {}",
                status, body
            )));
        }

        let added: AddResponse = response
            .json()
            .await
            .map_err(|e| StorageError::BackendError(format!("Invalid IPFS add response: {}", e)))?;

        tracing::info!(
            cid = %added.hash,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "IPFS upload successful"
        );

        Ok(added.hash)
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Ipfs
    }
}
