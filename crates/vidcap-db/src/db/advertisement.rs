use sqlx::PgPool;
use uuid::Uuid;
use vidcap_core::models::AdvertisementRecord;
use vidcap_core::AppError;

#[derive(Clone)]
pub struct AdvertisementRepository {
    pool: PgPool,
}

impl AdvertisementRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, ad: &AdvertisementRecord) -> Result<Uuid, AppError> {
        let id = Uuid::new_v4();
        sqlx::query(
            r#"
            INSERT INTO advertisements (id, name, image_link, object, redirect_url)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(id)
        .bind(&ad.name)
        .bind(&ad.image_link)
        .bind(&ad.object)
        .bind(&ad.redirect_url)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, ad_name = %ad.name, "Failed to insert advertisement");
            AppError::from(e)
        })?;

        tracing::info!(ad_id = %id, "Inserted advertisement record");
        Ok(id)
    }
}
