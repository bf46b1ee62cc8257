//! Selfie Store
//!
//! A local record+blob store: lightweight metadata records ("selfies") are
//! persisted as JSON files alongside their JPEG image payloads in a single
//! flat directory, linked only by a shared UUID. Image reads are served from
//! a write-through in-memory cache.

pub mod catalog;
pub mod config;
pub mod error;
pub mod image_cache;
pub mod models;
pub mod store;

pub use catalog::RecordCatalog;
pub use config::StoreConfig;
pub use error::{StoreError, StoreResult};
pub use image_cache::{CacheStats, ImageCache};
pub use models::Selfie;
pub use store::SelfieStore;
