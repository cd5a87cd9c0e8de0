//! Vidcap API Library
//!
//! HTTP surface of the upload service: the `/video` and `/ad` handlers, the upload
//! coordinator they drive, and application setup.

pub mod constants;
pub mod error;
mod handlers;
pub mod services;
pub mod setup;
pub mod state;

pub use error::HttpAppError;
pub use services::upload::{UploadCoordinator, UploadReceipt, UploadRequest};
pub use state::AppState;
