// SPDX-FileCopyrightText: 2026 Fixdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Blob storage adapter for the Fixdesk complaint desk.
//!
//! [`FirebaseBlobStore`] implements [`fixdesk_core::BlobStore`] over a
//! Firebase-Storage-style REST surface: uploads return a token download URL
//! that gets persisted on the record, and the report generator re-derives
//! the object path from that URL to fetch photo bytes fresh (the stored URL
//! is treated as expiring, nominally after seven days, and is never trusted
//! for re-fetching).

pub mod client;
pub mod paths;

pub use client::FirebaseBlobStore;
