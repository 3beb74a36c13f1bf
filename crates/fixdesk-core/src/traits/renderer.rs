// SPDX-FileCopyrightText: 2026 Fixdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Renderer adapter trait for turning report documents into artifacts.

use async_trait::async_trait;

use crate::document::{RenderedReport, ReportDocument};
use crate::error::FixdeskError;
use crate::traits::adapter::PluginAdapter;

/// Adapter over the document-rendering engine.
///
/// Consumes the abstract paginated document and produces a single
/// deliverable artifact. Rendering may be I/O-bound, hence async.
#[async_trait]
pub trait ReportRenderer: PluginAdapter {
    /// Renders the document into a deliverable artifact.
    async fn render(&self, doc: &ReportDocument) -> Result<RenderedReport, FixdeskError>;
}
