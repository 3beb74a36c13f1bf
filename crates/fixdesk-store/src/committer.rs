// SPDX-FileCopyrightText: 2026 Fixdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Sequential-id allocation and record commit.
//!
//! Deriving the next id from the record count is race-prone under plain
//! read-count-then-insert logic: two submissions reading the same count
//! would both produce the same id. [`RecordCommitter`] closes that race by
//! serializing the whole allocate-and-insert sequence behind one
//! process-wide async mutex. Unrelated session work stays parallel; only
//! commits queue here.

use std::sync::Arc;

use chrono::Local;
use tokio::sync::Mutex;
use tracing::{info, warn};

use fixdesk_config::model::IntakeConfig;
use fixdesk_core::FixdeskError;
use fixdesk_core::traits::record_store::RecordStore;
use fixdesk_core::types::{CompleteDraft, ComplaintId, ComplaintRecord, Reporter};

/// Allocates sequential complaint ids and commits records to the store.
pub struct RecordCommitter {
    store: Arc<dyn RecordStore>,
    /// Guards the count-then-insert critical section.
    commit_lock: Mutex<()>,
    config: IntakeConfig,
}

impl RecordCommitter {
    pub fn new(store: Arc<dyn RecordStore>, config: IntakeConfig) -> Self {
        Self {
            store,
            commit_lock: Mutex::new(()),
            config,
        }
    }

    /// Allocates the next id and appends a new record at the top position.
    ///
    /// The draft is fully populated by construction ([`CompleteDraft`]), so
    /// field presence is not re-validated here. If the insert fails after an
    /// id was computed, the attempt is repeated with a freshly re-read
    /// count; a stale id is never reused, so a retried commit cannot collide
    /// with one that landed in between.
    ///
    /// Commit is at-least-once: once the insert call has been acknowledged
    /// the record is never re-appended, even if later steps (like notifying
    /// the user) fail.
    pub async fn allocate_and_commit(
        &self,
        reporter: &Reporter,
        draft: CompleteDraft,
        photo_url: String,
    ) -> Result<ComplaintRecord, FixdeskError> {
        let _guard = self.commit_lock.lock().await;

        let mut last_error = None;
        for attempt in 0..self.config.max_commit_attempts {
            if attempt > 0 {
                warn!(attempt, "retrying commit with freshly read count");
            }

            let sequence = self.store.count().await?;
            let record = ComplaintRecord {
                id: ComplaintId::from_sequence(sequence),
                created_at: Local::now().naive_local(),
                reporter_name: reporter.name.clone(),
                reporter_id: reporter.id.clone(),
                category: draft.category,
                location: draft.location.clone(),
                description: draft.description.clone(),
                photo_url: photo_url.clone(),
                status: self.config.initial_status.to_string(),
            };

            match self.store.insert_top(&record).await {
                Ok(()) => {
                    info!(id = %record.id, category = %record.category, "complaint committed");
                    return Ok(record);
                }
                Err(e) => {
                    warn!(id = %record.id, error = %e, "insert failed, id discarded");
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            FixdeskError::Internal("commit failed without an attempt".into())
        }))
    }
}
