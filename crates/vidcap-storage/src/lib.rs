//! Vidcap Storage Library
//!
//! This crate provides the storage abstraction the upload coordinator hands staged
//! files to, and its backends: a content-addressed local directory, S3 and IPFS.
//!
//! # Content identifiers
//!
//! Every successful upload returns a CID, an opaque string key for the stored blob.
//! Whether two uploads of identical content share a CID is a property of the backend:
//!
//! - **Local** and **IPFS**: content-addressed, identical bytes give the same CID.
//! - **S3**: upload-addressed, every upload gets a fresh key.
//!
//! Callers must not rely on either behaviour.

pub mod factory;
#[cfg(feature = "storage-ipfs")]
pub mod ipfs;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
#[cfg(feature = "storage-ipfs")]
pub use ipfs::IpfsStorage;
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use traits::{Storage, StorageError, StorageResult};
pub use vidcap_core::StorageBackend;
