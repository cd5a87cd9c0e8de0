//! Database collaborator trait
//!
//! The coordinator and handlers depend on this trait rather than on `PgDatabase` so the
//! pipeline can be exercised against in-memory implementations.

use async_trait::async_trait;
use vidcap_core::models::{AdvertisementRecord, VideoRecord};
use vidcap_core::AppError;

/// Metadata database operations needed by the upload service
#[async_trait]
pub trait Database: Send + Sync {
    /// Insert the index entry for a stored video
    async fn insert_video(&self, video: &VideoRecord) -> Result<(), AppError>;

    /// Insert an advertisement
    async fn insert_ad(&self, ad: &AdvertisementRecord) -> Result<(), AppError>;

    /// Check that the database answers queries
    async fn ping(&self) -> Result<(), AppError>;
}
