/// Configuration for the selfie store
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Store configuration
///
/// Constructed explicitly and handed to [`crate::SelfieStore::new`]; there is
/// no global store instance, so tests can point each store at its own
/// temporary directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Flat directory holding both record and image files
    pub data_directory: PathBuf,

    /// JPEG quality used when persisting images (0-100)
    pub jpeg_quality: u8,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_directory: PathBuf::from("./data/selfies"),
            jpeg_quality: 90,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = StoreConfig::default();
        assert_eq!(config.data_directory, PathBuf::from("./data/selfies"));
        assert_eq!(config.jpeg_quality, 90);
    }
}
