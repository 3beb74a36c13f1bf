// SPDX-FileCopyrightText: 2026 Fixdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Fixdesk complaint desk.
//!
//! This crate provides the foundational trait definitions, error types, and
//! common types used throughout the Fixdesk workspace. All adapter
//! implementations (channel, record store, blob store, renderer) implement
//! traits defined here.

pub mod document;
pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::FixdeskError;
pub use types::{
    AdapterType, Category, ComplaintId, ComplaintRecord, ComplaintStatus, HealthStatus, MessageId,
    ReportMonth, Reporter, UserId,
};

// Re-export all adapter traits at crate root.
pub use traits::{BlobStore, ChannelAdapter, PluginAdapter, RecordStore, ReportRenderer};
