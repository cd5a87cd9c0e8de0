use sqlx::PgPool;
use uuid::Uuid;
use vidcap_core::models::VideoRecord;
use vidcap_core::AppError;

#[derive(Clone)]
pub struct VideoRepository {
    pool: PgPool,
}

impl VideoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a video index entry and return its row id.
    ///
    /// `storage_link` is not unique: a retried upload may index the same CID twice.
    pub async fn insert(&self, video: &VideoRecord) -> Result<Uuid, AppError> {
        let id = Uuid::new_v4();
        sqlx::query(
            r#"
            INSERT INTO videos (id, name, description, storage_link)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(id)
        .bind(&video.name)
        .bind(&video.description)
        .bind(&video.storage_link)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, storage_link = %video.storage_link, "Failed to insert video");
            AppError::from(e)
        })?;

        tracing::info!(video_id = %id, storage_link = %video.storage_link, "Inserted video record");
        Ok(id)
    }

    /// Count index entries pointing at a CID
    pub async fn count_by_storage_link(&self, storage_link: &str) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM videos WHERE storage_link = $1")
            .bind(storage_link)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
