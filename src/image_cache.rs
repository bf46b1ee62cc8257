/// Image cache - write-through cached storage for selfie image payloads
///
/// Images live as `{id}-image.jpg` files next to their records. Reads are
/// served from an in-memory map when possible; writes and deletes go to disk
/// first and update the map under the same lock, so the cache never serves a
/// value older than the last successful write for an id.
use crate::error::{StoreError, StoreResult};
use image::{codecs::jpeg::JpegEncoder, DynamicImage};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, warn};
use uuid::Uuid;

/// Filename suffix for image entries; disjoint from the `.json` record pattern
const IMAGE_SUFFIX: &str = "-image.jpg";

/// Cached image storage, addressed by the owning record's UUID
#[derive(Debug, Clone)]
pub struct ImageCache {
    directory: PathBuf,
    jpeg_quality: u8,
    inner: Arc<Mutex<CacheInner>>,
}

#[derive(Debug, Default)]
struct CacheInner {
    images: HashMap<Uuid, DynamicImage>,
    hits: u64,
    misses: u64,
}

/// Cache statistics
#[derive(Debug, Clone)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub hit_rate: f64,
}

impl ImageCache {
    /// Create an image cache over the given directory, creating it if missing
    pub fn new(directory: impl Into<PathBuf>, jpeg_quality: u8) -> StoreResult<Self> {
        let directory = directory.into();
        fs::create_dir_all(&directory)?;
        Ok(Self {
            directory,
            jpeg_quality,
            inner: Arc::new(Mutex::new(CacheInner::default())),
        })
    }

    /// Get the file path for an image
    fn image_path(&self, id: Uuid) -> PathBuf {
        self.directory.join(format!("{}{}", id, IMAGE_SUFFIX))
    }

    /// A poisoned lock means another thread panicked mid-operation; the map
    /// itself is still structurally valid, so recover the guard.
    fn lock(&self) -> MutexGuard<'_, CacheInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Get an image by id, caching it in memory for future lookups
    ///
    /// Returns `None` if no payload exists or the file cannot be decoded.
    pub fn get(&self, id: Uuid) -> Option<DynamicImage> {
        let mut inner = self.lock();

        if let Some(image) = inner.images.get(&id).cloned() {
            inner.hits += 1;
            debug!("Image cache HIT: {}", id);
            return Some(image);
        }

        inner.misses += 1;
        debug!("Image cache MISS: {}", id);

        let path = self.image_path(id);
        let data = match fs::read(&path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                warn!("Failed to read image {}: {}", path.display(), e);
                return None;
            }
        };

        match image::load_from_memory(&data) {
            Ok(image) => {
                inner.images.insert(id, image.clone());
                Some(image)
            }
            Err(e) => {
                warn!("Failed to decode image {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Set or clear the image for an id
    ///
    /// `Some(image)` encodes to JPEG and writes through to disk and cache;
    /// an encoding failure leaves disk and cache untouched and hands the
    /// image back inside the error. `None` deletes the durable entry
    /// (idempotent - a missing file is not an error) and always drops the
    /// cache entry.
    pub fn set(&self, id: Uuid, image: Option<DynamicImage>) -> StoreResult<()> {
        let mut inner = self.lock();
        let path = self.image_path(id);

        match image {
            Some(image) => {
                let mut data = Vec::new();
                let encoder = JpegEncoder::new_with_quality(&mut data, self.jpeg_quality);
                if let Err(e) = image.write_with_encoder(encoder) {
                    warn!("Failed to encode image {}: {}", id, e);
                    return Err(StoreError::Encoding(Box::new(image)));
                }

                fs::write(&path, &data).map_err(|e| {
                    StoreError::Persistence(format!(
                        "Failed to write image {}: {}",
                        path.display(),
                        e
                    ))
                })?;

                debug!("Image cache SET: {} ({} bytes)", id, data.len());
                inner.images.insert(id, image);
            }
            None => {
                // The cache entry goes regardless of how the file removal went.
                inner.images.remove(&id);

                match fs::remove_file(&path) {
                    Ok(()) => debug!("Image cache DELETE: {}", id),
                    Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                    Err(e) => {
                        return Err(StoreError::Deletion(format!(
                            "Failed to delete image {}: {}",
                            path.display(),
                            e
                        )));
                    }
                }
            }
        }

        Ok(())
    }

    /// Hit/miss counters since this cache was created
    pub fn stats(&self) -> CacheStats {
        let inner = self.lock();
        let total = inner.hits + inner.misses;
        CacheStats {
            hits: inner.hits,
            misses: inner.misses,
            hit_rate: if total > 0 {
                inner.hits as f64 / total as f64
            } else {
                0.0
            },
        }
    }
}
