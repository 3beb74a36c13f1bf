// SPDX-FileCopyrightText: 2026 Fixdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Self-contained HTML renderer.
//!
//! Produces one HTML artifact per report: pages become `<section
//! class="page">` elements (with print page breaks), images are embedded as
//! base64 data URIs and constrained to the layout bounding box with aspect
//! ratio preserved. All text is HTML-escaped.

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;

use fixdesk_core::FixdeskError;
use fixdesk_core::document::{Block, RenderedReport, ReportDocument};
use fixdesk_core::traits::adapter::PluginAdapter;
use fixdesk_core::traits::renderer::ReportRenderer;
use fixdesk_core::types::{AdapterType, HealthStatus};

use crate::layout::{IMAGE_BOX_HEIGHT, IMAGE_BOX_WIDTH};

/// Renders report documents into a single self-contained HTML file.
pub struct HtmlReportRenderer;

impl HtmlReportRenderer {
    pub fn new() -> Self {
        Self
    }

    fn render_block(out: &mut String, block: &Block) {
        match block {
            Block::Heading(text) => {
                out.push_str(&format!("<h2>{}</h2>\n", escape(text)));
            }
            Block::Paragraph(text) => {
                out.push_str(&format!("<p>{}</p>\n", escape(text)));
            }
            Block::FieldList(rows) => {
                out.push_str("<dl>\n");
                for (label, value) in rows {
                    out.push_str(&format!(
                        "<dt>{}</dt><dd>{}</dd>\n",
                        escape(label),
                        escape(value)
                    ));
                }
                out.push_str("</dl>\n");
            }
            Block::Image {
                data,
                mime_type,
                caption,
            } => {
                out.push_str("<figure>\n");
                out.push_str(&format!(
                    "<img src=\"data:{};base64,{}\" alt=\"complaint photo\">\n",
                    escape(mime_type),
                    BASE64.encode(data)
                ));
                if let Some(caption) = caption {
                    out.push_str(&format!("<figcaption>{}</figcaption>\n", escape(caption)));
                }
                out.push_str("</figure>\n");
            }
            Block::Placeholder(text) => {
                out.push_str(&format!(
                    "<div class=\"placeholder\">{}</div>\n",
                    escape(text)
                ));
            }
            Block::Divider => {
                out.push_str("<hr>\n");
            }
        }
    }
}

impl Default for HtmlReportRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Minimal HTML escaping for text content and attribute values.
fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[async_trait]
impl PluginAdapter for HtmlReportRenderer {
    fn name(&self) -> &str {
        "html-renderer"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Renderer
    }

    async fn health_check(&self) -> Result<HealthStatus, FixdeskError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), FixdeskError> {
        Ok(())
    }
}

#[async_trait]
impl ReportRenderer for HtmlReportRenderer {
    async fn render(&self, doc: &ReportDocument) -> Result<RenderedReport, FixdeskError> {
        let mut out = String::with_capacity(4096);
        out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
        out.push_str(&format!("<title>{}</title>\n", escape(&doc.title)));
        out.push_str("<style>\n");
        out.push_str("body { font-family: sans-serif; margin: 0; }\n");
        out.push_str(
            ".page { padding: 24px 32px; border-bottom: 1px dashed #999; page-break-after: always; }\n",
        );
        out.push_str(&format!(
            "img {{ max-width: {IMAGE_BOX_WIDTH}px; max-height: {IMAGE_BOX_HEIGHT}px; object-fit: contain; }}\n",
        ));
        out.push_str("dl { display: grid; grid-template-columns: max-content auto; gap: 2px 12px; }\n");
        out.push_str("dt { font-weight: bold; }\ndd { margin: 0; }\n");
        out.push_str(".placeholder { color: #777; border: 1px dashed #bbb; padding: 24px; text-align: center; }\n");
        out.push_str("</style>\n</head>\n<body>\n");

        for page in &doc.pages {
            out.push_str("<section class=\"page\">\n");
            for block in &page.blocks {
                Self::render_block(&mut out, block);
            }
            out.push_str("</section>\n");
        }

        out.push_str("</body>\n</html>\n");

        Ok(RenderedReport {
            filename: format!(
                "complaint-report-{:02}-{}.html",
                doc.month.month, doc.month.year
            ),
            mime_type: "text/html".into(),
            data: out.into_bytes(),
        })
    }
}
