// SPDX-FileCopyrightText: 2026 Fixdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Record store adapter trait for the append-only complaint ledger.

use async_trait::async_trait;

use crate::error::FixdeskError;
use crate::traits::adapter::PluginAdapter;
use crate::types::ComplaintRecord;

/// Adapter over the tabular backing store, viewed as an ordered,
/// append-only list of complaint records (newest first).
///
/// Implementations expose only whole-record operations; the store's
/// low-level cell API never leaks past this boundary. `count` and
/// `insert_top` are individually atomic but NOT atomic together: the
/// allocate-then-insert sequence is serialized by the committer, which is
/// the only caller allowed to pair them.
#[async_trait]
pub trait RecordStore: PluginAdapter {
    /// Reads the full record snapshot, newest first.
    async fn read_all(&self) -> Result<Vec<ComplaintRecord>, FixdeskError>;

    /// Returns the current number of records (header rows excluded).
    async fn count(&self) -> Result<usize, FixdeskError>;

    /// Inserts a record at the fixed top position, immediately after the
    /// header.
    async fn insert_top(&self, record: &ComplaintRecord) -> Result<(), FixdeskError>;
}
