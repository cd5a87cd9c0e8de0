mod advertisement;
mod task;
mod video;

pub use advertisement::AdvertisementRecord;
pub use task::Task;
pub use video::VideoRecord;
