//! Vidcap Database Layer
//!
//! This crate provides the metadata recorder: the `Database` collaborator trait the
//! upload coordinator writes index entries through, and its Postgres implementation.

// Module declarations
pub mod db;
pub mod traits;

// Re-exports
pub use db::setup::{connect, run_migrations};
pub use db::{AdvertisementRepository, PgDatabase, VideoRepository};
pub use traits::Database;
