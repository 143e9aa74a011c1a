use std::path::PathBuf;

/// Result type alias for storage operations
pub type Result<T> = std::result::Result<T, StorageError>;

/// Storage backend error type
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// I/O failure talking to the underlying store
    #[error("storage {operation} failed for '{bucket}/{path}': {source}")]
    Io {
        bucket: String,
        path: String,
        operation: &'static str,
        #[source]
        source: std::io::Error,
    },

    /// The requested bucket does not exist
    #[error("bucket '{bucket}' does not exist")]
    BucketNotFound { bucket: String },

    /// Object path rejected before touching the store
    #[error("invalid object path '{}': {message}", path.display())]
    InvalidPath { path: PathBuf, message: String },
}

impl StorageError {
    pub(crate) fn io(
        bucket: &str,
        path: &str,
        operation: &'static str,
        source: std::io::Error,
    ) -> Self {
        StorageError::Io {
            bucket: bucket.to_string(),
            path: path.to_string(),
            operation,
            source,
        }
    }

    pub(crate) fn invalid_path(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        StorageError::InvalidPath {
            path: path.into(),
            message: message.into(),
        }
    }
}
