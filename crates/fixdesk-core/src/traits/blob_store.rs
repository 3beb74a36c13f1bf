// SPDX-FileCopyrightText: 2026 Fixdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Blob storage adapter trait for photo hosting.

use async_trait::async_trait;

use crate::error::FixdeskError;
use crate::traits::adapter::PluginAdapter;

/// Adapter for the external object store that hosts complaint photos.
///
/// Uploads return a time-limited download URL which is what gets persisted
/// on the record. Because that URL expires, the report generator re-derives
/// the object path from the stored URL and fetches the bytes fresh through
/// this adapter.
#[async_trait]
pub trait BlobStore: PluginAdapter {
    /// Uploads an object and returns its time-limited download URL.
    async fn upload(
        &self,
        object_path: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> Result<String, FixdeskError>;

    /// Fetches an object's bytes by its storage path.
    async fn fetch(&self, object_path: &str) -> Result<Vec<u8>, FixdeskError>;

    /// Re-derives the storage path from a previously issued download URL.
    ///
    /// Returns `None` when the URL was not issued by this store.
    fn object_path_from_url(&self, url: &str) -> Option<String>;
}
