//! In-memory backend for tests and local demos.

use async_trait::async_trait;
use bytes::Bytes;
use dashmap::DashMap;
use std::io::Cursor;

use crate::backend::{ObjectReader, StorageBackend};
use crate::errors::{Result, StorageError};

#[derive(Debug, Clone)]
struct StoredObject {
    data: Bytes,
    #[allow(dead_code)]
    content_type: Option<String>,
}

/// Concurrent map-backed store. Buckets must be created before use, like a
/// real object store.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    buckets: DashMap<String, DashMap<String, StoredObject>>,
}

impl MemoryBackend {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn object(&self, bucket: &str, path: &str) -> Result<Option<StoredObject>> {
        let bucket_map = self
            .buckets
            .get(bucket)
            .ok_or_else(|| StorageError::BucketNotFound {
                bucket: bucket.to_string(),
            })?;
        Ok(bucket_map.get(path).map(|entry| entry.value().clone()))
    }
}

#[async_trait]
impl StorageBackend for MemoryBackend {
    async fn open(&self, bucket: &str, path: &str) -> Result<Option<ObjectReader>> {
        Ok(self
            .object(bucket, path)?
            .map(|obj| Box::new(Cursor::new(obj.data.to_vec())) as ObjectReader))
    }

    async fn get(&self, bucket: &str, path: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.object(bucket, path)?.map(|obj| obj.data.to_vec()))
    }

    async fn list(&self, bucket: &str, prefix: &str) -> Result<Vec<String>> {
        let bucket_map = self
            .buckets
            .get(bucket)
            .ok_or_else(|| StorageError::BucketNotFound {
                bucket: bucket.to_string(),
            })?;
        let mut names: Vec<String> = bucket_map
            .iter()
            .map(|entry| entry.key().clone())
            .filter(|name| name.starts_with(prefix))
            .collect();
        names.sort();
        Ok(names)
    }

    async fn put(
        &self,
        bucket: &str,
        path: &str,
        data: Bytes,
        content_type: Option<&str>,
    ) -> Result<()> {
        let bucket_map = self
            .buckets
            .get(bucket)
            .ok_or_else(|| StorageError::BucketNotFound {
                bucket: bucket.to_string(),
            })?;
        bucket_map.insert(
            path.to_string(),
            StoredObject {
                data,
                content_type: content_type.map(str::to_string),
            },
        );
        Ok(())
    }

    async fn delete(&self, bucket: &str, path: &str) -> Result<bool> {
        let bucket_map = self
            .buckets
            .get(bucket)
            .ok_or_else(|| StorageError::BucketNotFound {
                bucket: bucket.to_string(),
            })?;
        Ok(bucket_map.remove(path).is_some())
    }

    async fn bucket_exists(&self, bucket: &str) -> Result<bool> {
        Ok(self.buckets.contains_key(bucket))
    }

    async fn create_bucket(&self, bucket: &str) -> Result<()> {
        self.buckets.entry(bucket.to_string()).or_default();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncReadExt;

    async fn seeded() -> MemoryBackend {
        let backend = MemoryBackend::new();
        backend.create_bucket("shopizer").await.unwrap();
        backend
            .put(
                "shopizer",
                "products/m1/sku1/SMALL/img.jpg",
                Bytes::from_static(b"jpeg bytes"),
                Some("image/jpeg"),
            )
            .await
            .unwrap();
        backend
    }

    #[tokio::test]
    async fn get_returns_stored_bytes() {
        let backend = seeded().await;
        let data = backend
            .get("shopizer", "products/m1/sku1/SMALL/img.jpg")
            .await
            .unwrap();
        assert_eq!(data.unwrap(), b"jpeg bytes");
    }

    #[tokio::test]
    async fn open_streams_stored_bytes() {
        let backend = seeded().await;
        let mut reader = backend
            .open("shopizer", "products/m1/sku1/SMALL/img.jpg")
            .await
            .unwrap()
            .unwrap();
        let mut buffer = Vec::new();
        reader.read_to_end(&mut buffer).await.unwrap();
        assert_eq!(buffer, b"jpeg bytes");
    }

    #[tokio::test]
    async fn missing_object_is_none_not_error() {
        let backend = seeded().await;
        assert!(backend.get("shopizer", "absent.jpg").await.unwrap().is_none());
        assert!(backend.open("shopizer", "absent.jpg").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn missing_bucket_is_an_error() {
        let backend = seeded().await;
        assert!(matches!(
            backend.get("unknown", "x").await,
            Err(StorageError::BucketNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn list_filters_by_prefix() {
        let backend = seeded().await;
        backend
            .put("shopizer", "logos/store.png", Bytes::from_static(b"png"), None)
            .await
            .unwrap();

        let products = backend.list("shopizer", "products/").await.unwrap();
        assert_eq!(products, vec!["products/m1/sku1/SMALL/img.jpg"]);

        let all = backend.list("shopizer", "").await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn delete_reports_prior_existence() {
        let backend = seeded().await;
        assert!(backend
            .delete("shopizer", "products/m1/sku1/SMALL/img.jpg")
            .await
            .unwrap());
        assert!(!backend
            .delete("shopizer", "products/m1/sku1/SMALL/img.jpg")
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn bucket_creation_is_idempotent() {
        let backend = seeded().await;
        backend.create_bucket("shopizer").await.unwrap();
        assert!(backend.bucket_exists("shopizer").await.unwrap());
        // Existing content survives re-creation
        assert!(backend
            .get("shopizer", "products/m1/sku1/SMALL/img.jpg")
            .await
            .unwrap()
            .is_some());
    }
}
