// SPDX-FileCopyrightText: 2026 Fixdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Channel adapter trait for messaging platform integrations.

use async_trait::async_trait;

use crate::error::FixdeskError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{InboundEvent, MessageId, Reply};

/// Adapter for bidirectional messaging channel integrations.
///
/// Channel adapters connect Fixdesk to an external messaging platform,
/// translating platform updates into [`InboundEvent`]s and rendering
/// [`Reply`] payloads (text, keyboards, file attachments) back out.
#[async_trait]
pub trait ChannelAdapter: PluginAdapter {
    /// Establishes a connection to the messaging platform.
    async fn connect(&mut self) -> Result<(), FixdeskError>;

    /// Sends a reply through the channel.
    async fn send(&self, reply: Reply) -> Result<MessageId, FixdeskError>;

    /// Receives the next inbound event from the channel.
    async fn receive(&self) -> Result<InboundEvent, FixdeskError>;
}
