/// Record catalog - durable storage for selfie metadata
///
/// Records live as `{id}.json` files in a single flat directory. There is no
/// manifest: directory enumeration plus the filename pattern is the index.
/// Records are small, so every read goes to disk; only images are cached.
use crate::{
    error::{StoreError, StoreResult},
    models::Selfie,
};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use uuid::Uuid;

/// Filename extension for record entries
const RECORD_EXTENSION: &str = "json";

/// Durable catalog of selfie records, addressed by UUID
#[derive(Debug, Clone)]
pub struct RecordCatalog {
    directory: PathBuf,
}

impl RecordCatalog {
    /// Create a catalog over the given directory, creating it if missing
    pub fn new(directory: impl Into<PathBuf>) -> StoreResult<Self> {
        let directory = directory.into();
        fs::create_dir_all(&directory)?;
        Ok(Self { directory })
    }

    /// Get the file path for a record
    fn record_path(&self, id: Uuid) -> PathBuf {
        self.directory.join(format!("{}.{}", id, RECORD_EXTENSION))
    }

    /// Persist a record, overwriting any prior content for the same id
    pub fn save(&self, selfie: &Selfie) -> StoreResult<()> {
        let data = serde_json::to_vec_pretty(selfie).map_err(|e| {
            StoreError::Persistence(format!("Failed to serialize record {}: {}", selfie.id, e))
        })?;

        let path = self.record_path(selfie.id);
        fs::write(&path, data).map_err(|e| {
            StoreError::Persistence(format!("Failed to write record {}: {}", path.display(), e))
        })?;

        debug!("Saved record {}", selfie.id);
        Ok(())
    }

    /// Load a record by id
    ///
    /// Returns `None` if the entry is absent or cannot be decoded; a corrupt
    /// record degrades to a miss rather than an error.
    pub fn load(&self, id: Uuid) -> Option<Selfie> {
        let path = self.record_path(id);

        let data = match fs::read(&path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                warn!("Failed to read record {}: {}", path.display(), e);
                return None;
            }
        };

        match serde_json::from_slice(&data) {
            Ok(selfie) => Some(selfie),
            Err(e) => {
                warn!("Failed to decode record {}: {}", path.display(), e);
                None
            }
        }
    }

    /// List all records in the storage directory
    ///
    /// Entries that cannot be read or decoded are skipped and logged, matching
    /// [`RecordCatalog::load`]'s miss policy. Fails only when the directory
    /// itself cannot be enumerated.
    pub fn list(&self) -> StoreResult<Vec<Selfie>> {
        let entries = fs::read_dir(&self.directory).map_err(|e| {
            StoreError::Enumeration(format!(
                "Failed to list {}: {}",
                self.directory.display(),
                e
            ))
        })?;

        let mut selfies = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| {
                StoreError::Enumeration(format!(
                    "Failed to read entry in {}: {}",
                    self.directory.display(),
                    e
                ))
            })?;

            let path = entry.path();
            if !is_record_path(&path) {
                continue;
            }

            let data = match fs::read(&path) {
                Ok(data) => data,
                Err(e) => {
                    warn!("Skipping unreadable record {}: {}", path.display(), e);
                    continue;
                }
            };

            match serde_json::from_slice::<Selfie>(&data) {
                Ok(selfie) => selfies.push(selfie),
                Err(e) => warn!("Skipping undecodable record {}: {}", path.display(), e),
            }
        }

        Ok(selfies)
    }

    /// Remove the record for an id; no-op if absent
    pub fn delete(&self, id: Uuid) -> StoreResult<()> {
        let path = self.record_path(id);

        match fs::remove_file(&path) {
            Ok(()) => {
                debug!("Deleted record {}", id);
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::Deletion(format!(
                "Failed to delete record {}: {}",
                path.display(),
                e
            ))),
        }
    }
}

/// Whether a directory entry is a record entry by naming pattern
///
/// Image payloads end in `.jpg`, so they never match.
fn is_record_path(path: &Path) -> bool {
    path.extension().and_then(|ext| ext.to_str()) == Some(RECORD_EXTENSION)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_save_and_load_record() {
        let dir = tempdir().unwrap();
        let catalog = RecordCatalog::new(dir.path()).unwrap();

        let selfie = Selfie::new("Saved selfie");
        catalog.save(&selfie).unwrap();

        let loaded = catalog.load(selfie.id).unwrap();
        assert_eq!(loaded, selfie);
    }

    #[test]
    fn test_load_missing_record_is_none() {
        let dir = tempdir().unwrap();
        let catalog = RecordCatalog::new(dir.path()).unwrap();

        assert!(catalog.load(Uuid::new_v4()).is_none());
    }

    #[test]
    fn test_load_corrupt_record_is_none() {
        let dir = tempdir().unwrap();
        let catalog = RecordCatalog::new(dir.path()).unwrap();

        let id = Uuid::new_v4();
        fs::write(dir.path().join(format!("{}.json", id)), b"not json").unwrap();

        assert!(catalog.load(id).is_none());
    }

    #[test]
    fn test_save_overwrites_previous_content() {
        let dir = tempdir().unwrap();
        let catalog = RecordCatalog::new(dir.path()).unwrap();

        let mut selfie = Selfie::new("Before");
        catalog.save(&selfie).unwrap();

        selfie.title = "After".to_string();
        catalog.save(&selfie).unwrap();

        let loaded = catalog.load(selfie.id).unwrap();
        assert_eq!(loaded.title, "After");
        assert_eq!(catalog.list().unwrap().len(), 1);
    }

    #[test]
    fn test_list_skips_undecodable_entries() {
        let dir = tempdir().unwrap();
        let catalog = RecordCatalog::new(dir.path()).unwrap();

        let selfie = Selfie::new("Good record");
        catalog.save(&selfie).unwrap();
        fs::write(dir.path().join("corrupt.json"), b"{broken").unwrap();

        let listed = catalog.list().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, selfie.id);
    }

    #[test]
    fn test_list_ignores_non_record_files() {
        let dir = tempdir().unwrap();
        let catalog = RecordCatalog::new(dir.path()).unwrap();

        let selfie = Selfie::new("Only record");
        catalog.save(&selfie).unwrap();
        fs::write(
            dir.path().join(format!("{}-image.jpg", selfie.id)),
            b"jpeg bytes",
        )
        .unwrap();

        let listed = catalog.list().unwrap();
        assert_eq!(listed.len(), 1);
    }

    #[test]
    fn test_delete_missing_record_is_noop() {
        let dir = tempdir().unwrap();
        let catalog = RecordCatalog::new(dir.path()).unwrap();

        catalog.delete(Uuid::new_v4()).unwrap();
    }

    #[test]
    fn test_delete_removes_record() {
        let dir = tempdir().unwrap();
        let catalog = RecordCatalog::new(dir.path()).unwrap();

        let selfie = Selfie::new("Doomed");
        catalog.save(&selfie).unwrap();
        catalog.delete(selfie.id).unwrap();

        assert!(catalog.load(selfie.id).is_none());
        assert!(catalog.list().unwrap().is_empty());
    }
}
