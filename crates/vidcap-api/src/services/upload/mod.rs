//! Video upload pipeline.
//!
//! `receive` parses the multipart body and stages the file; `process` stores it,
//! announces it and records it, in that order. The staged file never outlives the
//! request.

mod coordinator;
pub mod multipart;
pub mod staging;

pub use coordinator::{UploadCoordinator, UploadReceipt, UploadRequest};
pub use staging::{StageError, StagedFile, Stager};
