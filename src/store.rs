/// Selfie store facade
///
/// Composes the record catalog and the image cache under a single UUID
/// namespace. Record fields and image payloads have independent write paths;
/// the one cross-component guarantee is that deleting a selfie removes its
/// record, its image file, and its cache entry together.
use crate::{
    catalog::RecordCatalog,
    config::StoreConfig,
    error::StoreResult,
    image_cache::{CacheStats, ImageCache},
    models::Selfie,
};
use image::DynamicImage;
use std::path::PathBuf;
use tracing::debug;
use uuid::Uuid;

/// Combined record and image store
#[derive(Debug, Clone)]
pub struct SelfieStore {
    catalog: RecordCatalog,
    images: ImageCache,
}

impl SelfieStore {
    /// Create a store from a configuration, creating the data directory if
    /// missing
    pub fn new(config: StoreConfig) -> StoreResult<Self> {
        let catalog = RecordCatalog::new(&config.data_directory)?;
        let images = ImageCache::new(&config.data_directory, config.jpeg_quality)?;
        Ok(Self { catalog, images })
    }

    /// Create a store over a directory with default settings
    pub fn open(directory: impl Into<PathBuf>) -> StoreResult<Self> {
        Self::new(StoreConfig {
            data_directory: directory.into(),
            ..StoreConfig::default()
        })
    }

    /// Persist a record's metadata; the image payload is written separately
    /// through [`SelfieStore::set_image`]
    pub fn save(&self, selfie: &Selfie) -> StoreResult<()> {
        self.catalog.save(selfie)
    }

    /// Load a record by id; `None` if absent or undecodable
    pub fn load(&self, id: Uuid) -> Option<Selfie> {
        self.catalog.load(id)
    }

    /// List all records on disk
    pub fn list(&self) -> StoreResult<Vec<Selfie>> {
        self.catalog.list()
    }

    /// Get the image for a record; `None` if it has no payload
    pub fn get_image(&self, id: Uuid) -> Option<DynamicImage> {
        self.images.get(id)
    }

    /// Set or clear the image for a record
    pub fn set_image(&self, id: Uuid, image: Option<DynamicImage>) -> StoreResult<()> {
        self.images.set(id, image)
    }

    /// Delete a selfie: record first, then image and cache entry
    ///
    /// The record is removed before the image so that a failure part-way
    /// leaves at worst an orphaned image file, never a record pointing at
    /// recovered-then-lost state.
    pub fn delete(&self, id: Uuid) -> StoreResult<()> {
        self.catalog.delete(id)?;
        self.images.set(id, None)?;
        debug!("Deleted selfie {}", id);
        Ok(())
    }

    /// Convenience overload of [`SelfieStore::delete`] taking the record
    pub fn delete_selfie(&self, selfie: &Selfie) -> StoreResult<()> {
        self.delete(selfie.id)
    }

    /// Image cache hit/miss counters
    pub fn cache_stats(&self) -> CacheStats {
        self.images.stats()
    }
}
