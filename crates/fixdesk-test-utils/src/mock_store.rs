// SPDX-FileCopyrightText: 2026 Fixdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory record store for deterministic testing.
//!
//! `MemoryRecordStore` keeps records in a `Vec` (newest first, like the real
//! sheet) and supports failure injection and an artificial per-operation
//! delay used to widen race windows in concurrency tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use fixdesk_core::FixdeskError;
use fixdesk_core::traits::adapter::PluginAdapter;
use fixdesk_core::traits::record_store::RecordStore;
use fixdesk_core::types::{AdapterType, ComplaintRecord, HealthStatus};

/// A mock record store backed by an in-memory `Vec`.
pub struct MemoryRecordStore {
    records: Arc<Mutex<Vec<ComplaintRecord>>>,
    /// Number of upcoming `insert_top` calls that will fail.
    fail_next_inserts: AtomicU32,
    /// Artificial delay applied at the start of every operation.
    op_delay_ms: AtomicU64,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self {
            records: Arc::new(Mutex::new(Vec::new())),
            fail_next_inserts: AtomicU32::new(0),
            op_delay_ms: AtomicU64::new(0),
        }
    }

    /// Pre-load the store with records (newest first).
    pub async fn seed(&self, records: Vec<ComplaintRecord>) {
        *self.records.lock().await = records;
    }

    /// Make the next `n` insert calls fail with a store error.
    pub fn fail_next_inserts(&self, n: u32) {
        self.fail_next_inserts.store(n, Ordering::SeqCst);
    }

    /// Delay every store operation, widening race windows in tests.
    pub fn set_op_delay(&self, delay: Duration) {
        self.op_delay_ms
            .store(delay.as_millis() as u64, Ordering::SeqCst);
    }

    /// Snapshot of the current records, newest first.
    pub async fn records(&self) -> Vec<ComplaintRecord> {
        self.records.lock().await.clone()
    }

    async fn delay(&self) {
        let ms = self.op_delay_ms.load(Ordering::SeqCst);
        if ms > 0 {
            tokio::time::sleep(Duration::from_millis(ms)).await;
        }
    }
}

impl Default for MemoryRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PluginAdapter for MemoryRecordStore {
    fn name(&self) -> &str {
        "memory-record-store"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::RecordStore
    }

    async fn health_check(&self) -> Result<HealthStatus, FixdeskError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), FixdeskError> {
        Ok(())
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn read_all(&self) -> Result<Vec<ComplaintRecord>, FixdeskError> {
        self.delay().await;
        Ok(self.records.lock().await.clone())
    }

    async fn count(&self) -> Result<usize, FixdeskError> {
        self.delay().await;
        Ok(self.records.lock().await.len())
    }

    async fn insert_top(&self, record: &ComplaintRecord) -> Result<(), FixdeskError> {
        self.delay().await;

        let remaining = self.fail_next_inserts.load(Ordering::SeqCst);
        if remaining > 0 {
            self.fail_next_inserts.store(remaining - 1, Ordering::SeqCst);
            return Err(FixdeskError::Store {
                message: "injected insert failure".into(),
                source: None,
            });
        }

        self.records.lock().await.insert(0, record.clone());
        Ok(())
    }
}
