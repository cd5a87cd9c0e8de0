//! Database repositories for data access layer
//!
//! One repository per table, plus `PgDatabase` which bundles them behind the
//! `Database` trait.

pub mod advertisement;
pub mod setup;
pub mod video;

pub use advertisement::AdvertisementRepository;
pub use video::VideoRepository;

use async_trait::async_trait;
use sqlx::PgPool;
use vidcap_core::models::{AdvertisementRecord, VideoRecord};
use vidcap_core::AppError;

use crate::traits::Database;

/// Postgres-backed metadata recorder
#[derive(Clone)]
pub struct PgDatabase {
    pool: PgPool,
    videos: VideoRepository,
    advertisements: AdvertisementRepository,
}

impl PgDatabase {
    pub fn new(pool: PgPool) -> Self {
        Self {
            videos: VideoRepository::new(pool.clone()),
            advertisements: AdvertisementRepository::new(pool.clone()),
            pool,
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl Database for PgDatabase {
    async fn insert_video(&self, video: &VideoRecord) -> Result<(), AppError> {
        self.videos.insert(video).await.map(|_| ())
    }

    async fn insert_ad(&self, ad: &AdvertisementRecord) -> Result<(), AppError> {
        self.advertisements.insert(ad).await.map(|_| ())
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(AppError::from)
    }
}
