use axum::extract::Multipart;
use std::sync::Arc;
use vidcap_core::constants::fields;
use vidcap_core::models::{Task, VideoRecord};
use vidcap_core::AppError;
use vidcap_db::Database;
use vidcap_storage::Storage;
use vidcap_worker::{AnnounceOutcome, TaskAnnouncer};

use super::multipart::{client_extension, field_reader, multipart_error, stream_read_error};
use super::staging::{StageError, StagedFile, Stager};

/// A parsed `/video` request whose file is already on local disk.
#[derive(Debug)]
pub struct UploadRequest {
    pub name: String,
    pub description: String,
    pub file: StagedFile,
}

/// Result of a successful upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadReceipt {
    pub cid: String,
    pub announce: AnnounceOutcome,
}

/// Drives one video upload through staging, storage, announcement and indexing.
///
/// A video record is written only after the file was stored and, in sync mode,
/// announced. A stored (and announced) file without a record is tolerated: the
/// client retries the whole upload.
pub struct UploadCoordinator {
    stager: Stager,
    storage: Arc<dyn Storage>,
    announcer: TaskAnnouncer,
    database: Arc<dyn Database>,
}

impl UploadCoordinator {
    pub fn new(
        stager: Stager,
        storage: Arc<dyn Storage>,
        announcer: TaskAnnouncer,
        database: Arc<dyn Database>,
    ) -> Self {
        Self {
            stager,
            storage,
            announcer,
            database,
        }
    }

    pub async fn handle_upload(&self, multipart: Multipart) -> Result<UploadReceipt, AppError> {
        let request = self.receive(multipart).await?;
        self.process(request).await
    }

    /// Parse the form and stage `videoFile`.
    ///
    /// Text fields default to empty. Only the first `videoFile` part is staged.
    pub async fn receive(&self, mut multipart: Multipart) -> Result<UploadRequest, AppError> {
        let mut name = None;
        let mut description = None;
        let mut file = None;

        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            let field_name = field.name().map(str::to_owned);
            match field_name.as_deref() {
                Some(fields::VIDEO_NAME) if name.is_none() => {
                    name = Some(field.text().await.map_err(multipart_error)?);
                }
                Some(fields::VIDEO_DESC) if description.is_none() => {
                    description = Some(field.text().await.map_err(multipart_error)?);
                }
                Some(fields::VIDEO_FILE) if file.is_none() => {
                    let extension = client_extension(&field);
                    let reader = field_reader(field);
                    tokio::pin!(reader);
                    let staged = self
                        .stager
                        .stage(reader, extension.as_deref())
                        .await
                        .map_err(|e| match e {
                            StageError::Read(io) => stream_read_error(io),
                            other => AppError::from(other),
                        })?;
                    file = Some(staged);
                }
                other => {
                    tracing::debug!(field = ?other, "Skipping multipart field");
                }
            }
        }

        let file = file.ok_or_else(|| {
            AppError::MalformedRequest(format!("missing {} part", fields::VIDEO_FILE))
        })?;

        Ok(UploadRequest {
            name: name.unwrap_or_default(),
            description: description.unwrap_or_default(),
            file,
        })
    }

    /// Store, announce, record. The staged file is removed before returning.
    #[tracing::instrument(
        skip_all,
        fields(video_name = %request.name, size_bytes = request.file.size())
    )]
    pub async fn process(&self, request: UploadRequest) -> Result<UploadReceipt, AppError> {
        let UploadRequest {
            name,
            description,
            mut file,
        } = request;

        let result = self.store_and_record(name, description, &file).await;
        file.release();
        result
    }

    async fn store_and_record(
        &self,
        name: String,
        description: String,
        file: &StagedFile,
    ) -> Result<UploadReceipt, AppError> {
        let cid = self.storage.upload_video(file.path()).await?;
        tracing::info!(
            cid = %cid,
            backend = %self.storage.backend_type(),
            "Video stored"
        );

        let announce = self
            .announcer
            .announce(Task::new(name.clone(), cid.clone()))
            .await?;

        self.database
            .insert_video(&VideoRecord {
                name,
                description,
                storage_link: cid.clone(),
            })
            .await?;

        tracing::info!(cid = %cid, announce = ?announce, "Video indexed");
        Ok(UploadReceipt { cid, announce })
    }
}
