// SPDX-FileCopyrightText: 2026 Fixdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Fixdesk integration tests.
//!
//! Provides deterministic mock adapters for the channel, record store, and
//! blob store boundaries, plus record fixtures.

pub mod fixtures;
pub mod mock_blob;
pub mod mock_channel;
pub mod mock_store;

pub use fixtures::{record_fixture, record_fixture_dated};
pub use mock_blob::MemoryBlobStore;
pub use mock_channel::MockChannel;
pub use mock_store::MemoryRecordStore;
