// SPDX-FileCopyrightText: 2026 Fixdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter trait definitions.
//!
//! External collaborators (messaging transport, record store, blob storage,
//! document renderer) sit behind these traits so the core stays testable
//! against mocks and the concrete services stay swappable.

pub mod adapter;
pub mod blob_store;
pub mod channel;
pub mod record_store;
pub mod renderer;

pub use adapter::PluginAdapter;
pub use blob_store::BlobStore;
pub use channel::ChannelAdapter;
pub use record_store::RecordStore;
pub use renderer::ReportRenderer;
