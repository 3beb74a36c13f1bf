// SPDX-FileCopyrightText: 2026 Fixdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the storage REST surface.
//!
//! Uploads go to `POST /v0/b/<bucket>/o?name=<path>`; the response carries a
//! download token from which the public download URL is assembled. Fetches
//! go to `GET /v0/b/<bucket>/o/<encoded-path>?alt=media`. Transient failures
//! (429, 5xx, connection errors) are retried with exponential backoff.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::Deserialize;
use tracing::{debug, warn};

use fixdesk_config::model::BlobConfig;
use fixdesk_core::FixdeskError;
use fixdesk_core::traits::adapter::PluginAdapter;
use fixdesk_core::traits::blob_store::BlobStore;
use fixdesk_core::types::{AdapterType, HealthStatus};

use crate::paths::{decode_object_path, encode_object_path};

/// Per-request timeout. Photo payloads are small (Telegram caps them),
/// so a minute is generous.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Retries after the initial attempt, on transient errors only.
const MAX_RETRIES: u32 = 2;

/// Base delay for exponential retry backoff.
const RETRY_BASE_DELAY: Duration = Duration::from_millis(500);

/// Response shape of an object upload.
#[derive(Debug, Deserialize)]
struct UploadResponse {
    #[serde(default)]
    name: String,
    /// Comma-separated download tokens; the first one is used.
    #[serde(rename = "downloadTokens", default)]
    download_tokens: String,
}

/// Blob store over a Firebase-Storage-style REST API.
pub struct FirebaseBlobStore {
    client: reqwest::Client,
    config: BlobConfig,
}

impl FirebaseBlobStore {
    /// Creates a new blob store client.
    pub fn new(config: BlobConfig) -> Result<Self, FixdeskError> {
        let mut headers = HeaderMap::new();
        if let Some(token) = config.api_token.as_deref() {
            let value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|e| FixdeskError::Config(format!("invalid blob api_token: {e}")))?;
            headers.insert(AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| FixdeskError::Blob {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self { client, config })
    }

    /// Overrides the base URL, for tests against a local mock server.
    pub fn with_base_url(mut self, url: String) -> Self {
        self.config.base_url = url;
        self
    }

    fn object_url(&self, object_path: &str) -> String {
        format!(
            "{}/v0/b/{}/o/{}",
            self.config.base_url,
            self.config.bucket,
            encode_object_path(object_path)
        )
    }

    fn upload_url(&self) -> String {
        format!("{}/v0/b/{}/o", self.config.base_url, self.config.bucket)
    }

    async fn send_with_retry(
        &self,
        what: &str,
        build: impl Fn() -> reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, FixdeskError> {
        let mut last_error = None;

        for attempt in 0..=MAX_RETRIES {
            if attempt > 0 {
                let delay = RETRY_BASE_DELAY * 2u32.pow(attempt - 1);
                warn!(attempt, what, delay_ms = delay.as_millis() as u64, "retrying blob request");
                tokio::time::sleep(delay).await;
            }

            let response = match build().send().await {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(FixdeskError::Blob {
                        message: format!("{what} request failed: {e}"),
                        source: Some(Box::new(e)),
                    });
                    continue;
                }
            };

            let status = response.status();
            if status.is_success() {
                return Ok(response);
            }

            let transient = status.as_u16() == 429 || status.is_server_error();
            let body = response.text().await.unwrap_or_default();
            let error = FixdeskError::Blob {
                message: format!("{what} returned {status}: {body}"),
                source: None,
            };
            if transient {
                last_error = Some(error);
                continue;
            }
            return Err(error);
        }

        Err(last_error.unwrap_or_else(|| FixdeskError::Blob {
            message: format!("{what} failed after retries"),
            source: None,
        }))
    }
}

#[async_trait]
impl PluginAdapter for FirebaseBlobStore {
    fn name(&self) -> &str {
        "firebase-blob-store"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::BlobStore
    }

    async fn health_check(&self) -> Result<HealthStatus, FixdeskError> {
        // Listing with a zero page size exercises auth and reachability.
        let url = self.upload_url();
        let result = self
            .client
            .get(&url)
            .query(&[("maxResults", "1")])
            .send()
            .await;
        match result {
            Ok(r) if r.status().is_success() || r.status().as_u16() == 404 => {
                Ok(HealthStatus::Healthy)
            }
            Ok(r) => Ok(HealthStatus::Unhealthy(format!(
                "storage returned {}",
                r.status()
            ))),
            Err(e) => Ok(HealthStatus::Unhealthy(format!("storage unreachable: {e}"))),
        }
    }

    async fn shutdown(&self) -> Result<(), FixdeskError> {
        debug!("blob store shutting down");
        Ok(())
    }
}

#[async_trait]
impl BlobStore for FirebaseBlobStore {
    async fn upload(
        &self,
        object_path: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> Result<String, FixdeskError> {
        let url = self.upload_url();
        let content_type = content_type.to_string();
        let response = self
            .send_with_retry("upload object", || {
                self.client
                    .post(&url)
                    .query(&[("name", object_path)])
                    .header("content-type", content_type.clone())
                    .body(data.clone())
            })
            .await?;

        let upload: UploadResponse = response.json().await.map_err(|e| FixdeskError::Blob {
            message: format!("upload response was malformed JSON: {e}"),
            source: Some(Box::new(e)),
        })?;

        let token = upload
            .download_tokens
            .split(',')
            .next()
            .unwrap_or_default()
            .trim()
            .to_string();
        if token.is_empty() {
            return Err(FixdeskError::Blob {
                message: format!("upload of {object_path} returned no download token"),
                source: None,
            });
        }

        debug!(object = upload.name.as_str(), "photo uploaded");
        Ok(format!(
            "{}?alt=media&token={token}",
            self.object_url(object_path)
        ))
    }

    async fn fetch(&self, object_path: &str) -> Result<Vec<u8>, FixdeskError> {
        let url = self.object_url(object_path);
        let response = self
            .send_with_retry("fetch object", || {
                self.client.get(&url).query(&[("alt", "media")])
            })
            .await?;

        let bytes = response.bytes().await.map_err(|e| FixdeskError::Blob {
            message: format!("fetch of {object_path} failed mid-body: {e}"),
            source: Some(Box::new(e)),
        })?;
        Ok(bytes.to_vec())
    }

    fn object_path_from_url(&self, url: &str) -> Option<String> {
        let parsed = Url::parse(url).ok()?;
        let mut segments = parsed.path_segments()?;
        if segments.next()? != "v0" || segments.next()? != "b" {
            return None;
        }
        if segments.next()? != self.config.bucket {
            return None;
        }
        if segments.next()? != "o" {
            return None;
        }
        let encoded = segments.next()?;
        if segments.next().is_some() || encoded.is_empty() {
            return None;
        }
        Some(decode_object_path(encoded))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> FirebaseBlobStore {
        FirebaseBlobStore::new(BlobConfig {
            bucket: "relief.example.app".into(),
            ..BlobConfig::default()
        })
        .expect("client builds")
    }

    #[test]
    fn object_path_round_trips_through_issued_url() {
        let store = store();
        let url = format!(
            "{}?alt=media&token=abc",
            store.object_url("complaints/42_20260214_090500.jpg")
        );
        assert_eq!(
            store.object_path_from_url(&url).as_deref(),
            Some("complaints/42_20260214_090500.jpg")
        );
    }

    #[test]
    fn urls_for_other_buckets_are_rejected() {
        let store = store();
        let url = "https://firebasestorage.googleapis.com/v0/b/other.bucket/o/complaints%2Fx.jpg?alt=media&token=t";
        assert!(store.object_path_from_url(url).is_none());
    }

    #[test]
    fn non_storage_urls_are_rejected() {
        let store = store();
        assert!(store.object_path_from_url("https://example.com/a.jpg").is_none());
        assert!(store.object_path_from_url("not a url").is_none());
    }
}
