/// Unified error types for the selfie store
use image::DynamicImage;
use thiserror::Error;

/// Main error type for store operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Metadata write or serialization failed
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// The storage directory could not be enumerated
    #[error("Enumeration error: {0}")]
    Enumeration(String),

    /// An image could not be encoded as JPEG; carries the offending image
    /// so callers can retry or surface it
    #[error("Encoding error: image could not be encoded as JPEG")]
    Encoding(Box<DynamicImage>),

    /// An existing durable entry could not be removed
    #[error("Deletion error: {0}")]
    Deletion(String),

    /// IO errors outside the variants above (e.g. creating the data directory)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;
