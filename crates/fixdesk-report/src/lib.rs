// SPDX-FileCopyrightText: 2026 Fixdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Monthly report generation for the Fixdesk complaint desk.
//!
//! [`ReportGenerator`] filters the record snapshot by parsed creation month,
//! groups matching records by category, fetches each photo fresh from blob
//! storage, lays everything out into pages, and hands the document to a
//! [`fixdesk_core::ReportRenderer`]. [`HtmlReportRenderer`] is the bundled
//! renderer: a single self-contained HTML artifact with embedded images.

pub mod generator;
pub mod html;
pub mod layout;

pub use generator::ReportGenerator;
pub use html::HtmlReportRenderer;
