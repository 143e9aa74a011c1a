//! The contract the server requires from an object store.

use async_trait::async_trait;
use bytes::Bytes;
use tokio::io::AsyncRead;

use crate::errors::Result;

/// A readable byte stream for one object
pub type ObjectReader = Box<dyn AsyncRead + Send + Unpin>;

/// Object store operations used by the streaming endpoint and its tooling.
///
/// Absence is not an error: `open`, `get`, and `delete` report a missing
/// object through their return value so the caller can answer 404 without
/// inspecting error internals.
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Open a streaming reader for an object, or `None` when absent
    async fn open(&self, bucket: &str, path: &str) -> Result<Option<ObjectReader>>;

    /// Read an entire object into memory, or `None` when absent
    async fn get(&self, bucket: &str, path: &str) -> Result<Option<Vec<u8>>>;

    /// List object names in a bucket that start with `prefix`
    async fn list(&self, bucket: &str, prefix: &str) -> Result<Vec<String>>;

    /// Store an object, overwriting any previous content
    async fn put(
        &self,
        bucket: &str,
        path: &str,
        data: Bytes,
        content_type: Option<&str>,
    ) -> Result<()>;

    /// Remove an object; `false` when it was already absent
    async fn delete(&self, bucket: &str, path: &str) -> Result<bool>;

    /// Whether the bucket exists
    async fn bucket_exists(&self, bucket: &str) -> Result<bool>;

    /// Create a bucket; succeeds if it already exists
    async fn create_bucket(&self, bucket: &str) -> Result<()>;
}
