// SPDX-FileCopyrightText: 2026 Fixdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory blob store for deterministic testing.
//!
//! Uploaded objects live in a map keyed by object path. Download URLs use a
//! `mock://blob/<path>` scheme that `object_path_from_url` inverts, and
//! individual paths can be marked unfetchable to exercise the report
//! generator's placeholder behavior.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use fixdesk_core::FixdeskError;
use fixdesk_core::traits::adapter::PluginAdapter;
use fixdesk_core::traits::blob_store::BlobStore;
use fixdesk_core::types::{AdapterType, HealthStatus};

const URL_PREFIX: &str = "mock://blob/";

/// A mock blob store backed by an in-memory map.
pub struct MemoryBlobStore {
    objects: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    unfetchable: Arc<Mutex<HashSet<String>>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self {
            objects: Arc::new(Mutex::new(HashMap::new())),
            unfetchable: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    /// The download URL this mock issues for a path.
    pub fn url_for(path: &str) -> String {
        format!("{URL_PREFIX}{path}")
    }

    /// Make `fetch` fail for the given path.
    pub async fn mark_unfetchable(&self, path: &str) {
        self.unfetchable.lock().await.insert(path.to_string());
    }

    /// Number of stored objects.
    pub async fn object_count(&self) -> usize {
        self.objects.lock().await.len()
    }
}

impl Default for MemoryBlobStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PluginAdapter for MemoryBlobStore {
    fn name(&self) -> &str {
        "memory-blob-store"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::BlobStore
    }

    async fn health_check(&self) -> Result<HealthStatus, FixdeskError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), FixdeskError> {
        Ok(())
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn upload(
        &self,
        object_path: &str,
        data: Vec<u8>,
        _content_type: &str,
    ) -> Result<String, FixdeskError> {
        self.objects
            .lock()
            .await
            .insert(object_path.to_string(), data);
        Ok(Self::url_for(object_path))
    }

    async fn fetch(&self, object_path: &str) -> Result<Vec<u8>, FixdeskError> {
        if self.unfetchable.lock().await.contains(object_path) {
            return Err(FixdeskError::Blob {
                message: format!("object {object_path} marked unfetchable"),
                source: None,
            });
        }
        self.objects
            .lock()
            .await
            .get(object_path)
            .cloned()
            .ok_or_else(|| FixdeskError::Blob {
                message: format!("object {object_path} not found"),
                source: None,
            })
    }

    fn object_path_from_url(&self, url: &str) -> Option<String> {
        url.strip_prefix(URL_PREFIX).map(|p| p.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn upload_fetch_round_trip() {
        let blob = MemoryBlobStore::new();
        let url = blob
            .upload("complaints/1_x.jpg", vec![1, 2, 3], "image/jpeg")
            .await
            .unwrap();

        let path = blob.object_path_from_url(&url).unwrap();
        assert_eq!(path, "complaints/1_x.jpg");
        assert_eq!(blob.fetch(&path).await.unwrap(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn unfetchable_paths_error() {
        let blob = MemoryBlobStore::new();
        blob.upload("p.jpg", vec![0], "image/jpeg").await.unwrap();
        blob.mark_unfetchable("p.jpg").await;
        assert!(blob.fetch("p.jpg").await.is_err());
    }

    #[test]
    fn foreign_urls_are_rejected() {
        let blob = MemoryBlobStore::new();
        assert!(blob.object_path_from_url("https://elsewhere/x.jpg").is_none());
    }
}
