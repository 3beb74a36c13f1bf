// SPDX-FileCopyrightText: 2026 Fixdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Record store adapter and sequential-id allocator for Fixdesk.
//!
//! [`SheetStore`] implements [`fixdesk_core::RecordStore`] over a
//! spreadsheet values REST API, treating the sheet as an ordered,
//! append-only list of complaint records (newest first, fixed 11-column
//! schema). [`RecordCommitter`] is the one component allowed to pair the
//! store's `count` and `insert_top` calls: it serializes the whole
//! allocate-id-then-insert sequence behind a process-wide lock so that
//! concurrent submissions can never observe the same sequence number.

pub mod committer;
pub mod lookup;
pub mod rows;
pub mod sheet;

pub use committer::RecordCommitter;
pub use lookup::find_by_id;
pub use sheet::SheetStore;
