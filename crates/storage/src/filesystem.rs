//! Directory-per-bucket backend on the local filesystem.

use async_trait::async_trait;
use bytes::Bytes;
use std::path::{Component, Path, PathBuf};
use tokio::fs;
use tracing::debug;

use crate::backend::{ObjectReader, StorageBackend};
use crate::errors::{Result, StorageError};

/// Stores each bucket as a directory under a fixed root and each object as
/// a regular file. Object paths are validated before any filesystem call:
/// absolute paths and `..` components are rejected so a token scope can
/// never escape its bucket directory.
#[derive(Debug, Clone)]
pub struct FilesystemBackend {
    root: PathBuf,
}

impl FilesystemBackend {
    /// Create a backend rooted at the given directory
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn bucket_dir(&self, bucket: &str) -> Result<PathBuf> {
        validate_segment(bucket)?;
        Ok(self.root.join(bucket))
    }

    fn object_file(&self, bucket: &str, path: &str) -> Result<PathBuf> {
        let mut file = self.bucket_dir(bucket)?;
        file.push(validate_object_path(path)?);
        Ok(file)
    }
}

/// Bucket names are single path segments
fn validate_segment(bucket: &str) -> Result<()> {
    if bucket.is_empty()
        || bucket == "."
        || bucket == ".."
        || bucket.contains('/')
        || bucket.contains('\\')
    {
        return Err(StorageError::invalid_path(bucket, "invalid bucket name"));
    }
    Ok(())
}

/// Object paths must be relative and free of parent-directory traversal
fn validate_object_path(path: &str) -> Result<&Path> {
    let candidate = Path::new(path);
    if path.is_empty() {
        return Err(StorageError::invalid_path(path, "empty object path"));
    }
    for component in candidate.components() {
        match component {
            Component::Normal(_) => {}
            _ => {
                return Err(StorageError::invalid_path(
                    path,
                    "object path must be relative and must not traverse upward",
                ))
            }
        }
    }
    Ok(candidate)
}

/// Map NotFound to `None`, everything else to a storage error
fn absent_on_not_found<T>(
    result: std::io::Result<T>,
    bucket: &str,
    path: &str,
    operation: &'static str,
) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(error) => Err(StorageError::io(bucket, path, operation, error)),
    }
}

#[async_trait]
impl StorageBackend for FilesystemBackend {
    async fn open(&self, bucket: &str, path: &str) -> Result<Option<ObjectReader>> {
        let file = self.object_file(bucket, path)?;
        Ok(absent_on_not_found(fs::File::open(&file).await, bucket, path, "open")?
            .map(|f| Box::new(f) as ObjectReader))
    }

    async fn get(&self, bucket: &str, path: &str) -> Result<Option<Vec<u8>>> {
        let file = self.object_file(bucket, path)?;
        absent_on_not_found(fs::read(&file).await, bucket, path, "read")
    }

    async fn list(&self, bucket: &str, prefix: &str) -> Result<Vec<String>> {
        let dir = self.bucket_dir(bucket)?;
        if !dir.is_dir() {
            return Err(StorageError::BucketNotFound {
                bucket: bucket.to_string(),
            });
        }

        // Iterative walk; object names are paths relative to the bucket dir
        let mut names = Vec::new();
        let mut pending = vec![dir.clone()];
        while let Some(current) = pending.pop() {
            let mut entries = fs::read_dir(&current)
                .await
                .map_err(|e| StorageError::io(bucket, prefix, "list", e))?;
            while let Some(entry) = entries
                .next_entry()
                .await
                .map_err(|e| StorageError::io(bucket, prefix, "list", e))?
            {
                let entry_path = entry.path();
                if entry_path.is_dir() {
                    pending.push(entry_path);
                } else if let Ok(relative) = entry_path.strip_prefix(&dir) {
                    let name = relative.to_string_lossy().replace('\\', "/");
                    if name.starts_with(prefix) {
                        names.push(name);
                    }
                }
            }
        }
        names.sort();
        Ok(names)
    }

    async fn put(
        &self,
        bucket: &str,
        path: &str,
        data: Bytes,
        _content_type: Option<&str>,
    ) -> Result<()> {
        let file = self.object_file(bucket, path)?;
        if let Some(parent) = file.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| StorageError::io(bucket, path, "mkdir", e))?;
        }
        fs::write(&file, &data)
            .await
            .map_err(|e| StorageError::io(bucket, path, "write", e))?;
        debug!(bucket, path, bytes = data.len(), "stored object");
        Ok(())
    }

    async fn delete(&self, bucket: &str, path: &str) -> Result<bool> {
        let file = self.object_file(bucket, path)?;
        Ok(absent_on_not_found(fs::remove_file(&file).await, bucket, path, "delete")?.is_some())
    }

    async fn bucket_exists(&self, bucket: &str) -> Result<bool> {
        let dir = self.bucket_dir(bucket)?;
        Ok(dir.is_dir())
    }

    async fn create_bucket(&self, bucket: &str) -> Result<()> {
        let dir = self.bucket_dir(bucket)?;
        fs::create_dir_all(&dir)
            .await
            .map_err(|e| StorageError::io(bucket, "", "mkdir", e))
    }
}
