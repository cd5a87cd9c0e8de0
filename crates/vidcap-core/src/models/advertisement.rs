use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvertisementRecord {
    pub name: String,
    pub image_link: String,
    pub object: String,
    pub redirect_url: String,
}
