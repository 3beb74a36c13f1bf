// SPDX-FileCopyrightText: 2026 Fixdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Abstract paginated document model handed to a [`crate::traits::ReportRenderer`].
//!
//! The report generator lays records out into [`Page`]s of [`Block`]s; the
//! renderer turns the whole document into a single deliverable artifact. The
//! model is deliberately renderer-agnostic: block sizes used for pagination
//! are estimates owned by the layout code, not the renderer.

use serde::{Deserialize, Serialize};

use crate::types::ReportMonth;

/// A paginated report document.
#[derive(Debug, Clone)]
pub struct ReportDocument {
    pub title: String,
    pub month: ReportMonth,
    /// Number of records covered by the report (zero is a valid report).
    pub total: usize,
    pub pages: Vec<Page>,
}

/// One page of laid-out blocks.
#[derive(Debug, Clone, Default)]
pub struct Page {
    pub blocks: Vec<Block>,
}

/// A single content block.
#[derive(Debug, Clone)]
pub enum Block {
    /// Document or section heading.
    Heading(String),
    /// Free-flowing text.
    Paragraph(String),
    /// Labelled field rows for one record.
    FieldList(Vec<(String, String)>),
    /// An image rendered inside a fixed bounding box, aspect ratio preserved.
    Image {
        data: Vec<u8>,
        mime_type: String,
        caption: Option<String>,
    },
    /// Stand-in for an image that could not be fetched.
    Placeholder(String),
    /// Visual separator between record sections.
    Divider,
}

/// The rendered artifact, kept in memory and dropped after delivery.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderedReport {
    pub filename: String,
    pub mime_type: String,
    pub data: Vec<u8>,
}
