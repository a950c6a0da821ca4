use thiserror::Error;

/// Errors that can occur when interacting with a key-value store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// An I/O error occurred while reading or writing a key.
    #[error("I/O error for key {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// The key contains characters the backend cannot represent.
    #[error("Invalid key: {0}")]
    InvalidKey(String),
}

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;
