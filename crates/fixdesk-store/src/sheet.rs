// SPDX-FileCopyrightText: 2026 Fixdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Spreadsheet-backed record store.
//!
//! Implements [`RecordStore`] over the values REST surface of a
//! Google-Sheets-style backing store. Row 1 is the header; records occupy
//! rows 2.. in newest-first order. Inserting always targets the fixed top
//! position (row 2) via an insert-dimension request followed by a values
//! update, so the sheet itself never needs re-sorting.
//!
//! Transient failures (429, 5xx, connection errors) are retried with
//! exponential backoff before surfacing as [`FixdeskError::Store`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};

use fixdesk_config::model::SheetConfig;
use fixdesk_core::FixdeskError;
use fixdesk_core::traits::adapter::PluginAdapter;
use fixdesk_core::traits::record_store::RecordStore;
use fixdesk_core::types::{AdapterType, ComplaintRecord, HealthStatus};

use crate::rows;

/// Per-request timeout for the values API.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Retries after the initial attempt, on transient errors only.
const MAX_RETRIES: u32 = 2;

/// Base delay for exponential retry backoff.
const RETRY_BASE_DELAY: Duration = Duration::from_millis(500);

/// Response shape of a values `GET`.
#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

/// Record store over a spreadsheet values API.
pub struct SheetStore {
    client: reqwest::Client,
    config: SheetConfig,
}

impl SheetStore {
    /// Creates a new sheet-backed record store.
    pub fn new(config: SheetConfig) -> Result<Self, FixdeskError> {
        let mut headers = HeaderMap::new();
        if let Some(token) = config.api_token.as_deref() {
            let value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|e| FixdeskError::Config(format!("invalid sheet api_token: {e}")))?;
            headers.insert(AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| FixdeskError::Store {
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

    fn values_url(&self, range: &str) -> String {
        format!(
            "{}/v4/spreadsheets/{}/values/{}!{}",
            self.config.base_url, self.config.spreadsheet_id, self.config.worksheet, range
        )
    }

    fn batch_update_url(&self) -> String {
        format!(
            "{}/v4/spreadsheets/{}:batchUpdate",
            self.config.base_url, self.config.spreadsheet_id
        )
    }

    /// Sends a request, retrying transient failures with backoff.
    ///
    /// `build` is called once per attempt because a `RequestBuilder` is
    /// consumed by `send`.
    async fn send_with_retry(
        &self,
        what: &str,
        build: impl Fn() -> reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, FixdeskError> {
        let mut last_error = None;

        for attempt in 0..=MAX_RETRIES {
            if attempt > 0 {
                let delay = RETRY_BASE_DELAY * 2u32.pow(attempt - 1);
                warn!(attempt, what, delay_ms = delay.as_millis() as u64, "retrying sheet request");
                tokio::time::sleep(delay).await;
            }

            let response = match build().send().await {
                Ok(r) => r,
                Err(e) => {
                    // Connection-level failures and timeouts are transient.
                    last_error = Some(FixdeskError::Store {
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
            let error = FixdeskError::Store {
                message: format!("{what} returned {status}: {body}"),
                source: None,
            };
            if transient {
                last_error = Some(error);
                continue;
            }
            return Err(error);
        }

        Err(last_error.unwrap_or_else(|| FixdeskError::Store {
            message: format!("{what} failed after retries"),
            source: None,
        }))
    }

    async fn read_range(&self, range: &str, what: &str) -> Result<Vec<Vec<String>>, FixdeskError> {
        let url = self.values_url(range);
        let response = self
            .send_with_retry(what, || self.client.get(&url))
            .await?;

        let value_range: ValueRange =
            response.json().await.map_err(|e| FixdeskError::Store {
                message: format!("{what} returned malformed JSON: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(value_range.values)
    }
}

#[async_trait]
impl PluginAdapter for SheetStore {
    fn name(&self) -> &str {
        "sheet-store"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::RecordStore
    }

    async fn health_check(&self) -> Result<HealthStatus, FixdeskError> {
        // Reading the header row exercises auth and reachability.
        match self.read_range("A1:K1", "health check").await {
            Ok(_) => Ok(HealthStatus::Healthy),
            Err(e) => Ok(HealthStatus::Unhealthy(format!("sheet unreachable: {e}"))),
        }
    }

    async fn shutdown(&self) -> Result<(), FixdeskError> {
        debug!("sheet store shutting down");
        Ok(())
    }
}

#[async_trait]
impl RecordStore for SheetStore {
    async fn read_all(&self) -> Result<Vec<ComplaintRecord>, FixdeskError> {
        let values = self.read_range("A2:K", "read records").await?;

        let mut records = Vec::with_capacity(values.len());
        for (i, cells) in values.iter().enumerate() {
            // Sheet rows are 1-based and the data starts at row 2.
            records.push(rows::from_row(i + 2, cells)?);
        }

        debug!(count = records.len(), "read record snapshot");
        Ok(records)
    }

    async fn count(&self) -> Result<usize, FixdeskError> {
        // Counting the id column alone keeps the payload small.
        let values = self.read_range("A2:A", "count records").await?;
        Ok(values.len())
    }

    async fn insert_top(&self, record: &ComplaintRecord) -> Result<(), FixdeskError> {
        // Open a fresh row 2 below the header, then write the record into it.
        let insert_body = json!({
            "requests": [{
                "insertDimension": {
                    "range": {
                        "sheetId": self.config.grid_id,
                        "dimension": "ROWS",
                        "startIndex": 1,
                        "endIndex": 2,
                    },
                    "inheritFromBefore": false,
                }
            }]
        });
        let batch_url = self.batch_update_url();
        self.send_with_retry("insert row", || {
            self.client.post(&batch_url).json(&insert_body)
        })
        .await?;

        let row = rows::to_row(record);
        let update_body = json!({ "values": [row] });
        let update_url = self.values_url("A2:K2");
        self.send_with_retry("write row", || {
            self.client
                .put(&update_url)
                .query(&[("valueInputOption", "RAW")])
                .json(&update_body)
        })
        .await?;

        debug!(id = %record.id, "record written at top position");
        Ok(())
    }
}
