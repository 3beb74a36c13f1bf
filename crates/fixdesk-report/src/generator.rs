// SPDX-FileCopyrightText: 2026 Fixdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Monthly report assembly.
//!
//! Filtering is done on the parsed creation timestamp, never on rendered
//! date strings: matching `02/2026` by substring would also catch a record
//! dated 02/12/2026 (day 2 of December), which is exactly the bug this
//! module exists to avoid.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, warn};

use fixdesk_core::FixdeskError;
use fixdesk_core::document::{Block, RenderedReport, ReportDocument};
use fixdesk_core::traits::blob_store::BlobStore;
use fixdesk_core::traits::record_store::RecordStore;
use fixdesk_core::traits::renderer::ReportRenderer;
use fixdesk_core::types::{Category, ComplaintRecord, ReportMonth};

use crate::layout;

/// Builds monthly report documents and renders them into one artifact.
pub struct ReportGenerator {
    store: Arc<dyn RecordStore>,
    blob: Arc<dyn BlobStore>,
    renderer: Arc<dyn ReportRenderer>,
}

impl ReportGenerator {
    pub fn new(
        store: Arc<dyn RecordStore>,
        blob: Arc<dyn BlobStore>,
        renderer: Arc<dyn ReportRenderer>,
    ) -> Self {
        Self {
            store,
            blob,
            renderer,
        }
    }

    /// Generates the report for one month and renders it.
    ///
    /// The returned artifact lives in memory only; the caller hands it to
    /// the transport and drops it, so nothing persists after delivery.
    pub async fn generate(&self, month: ReportMonth) -> Result<RenderedReport, FixdeskError> {
        let records = self.store.read_all().await?;
        let doc = self.build_document(month, &records).await;
        self.renderer.render(&doc).await
    }

    /// Filters, groups, fetches photos, and paginates into a document.
    pub async fn build_document(
        &self,
        month: ReportMonth,
        records: &[ComplaintRecord],
    ) -> ReportDocument {
        let matching: Vec<&ComplaintRecord> = records
            .iter()
            .filter(|r| month.contains(&r.created_at))
            .collect();

        debug!(month = %month, matching = matching.len(), "building report document");

        let mut by_category: BTreeMap<Category, Vec<&ComplaintRecord>> = BTreeMap::new();
        for &record in &matching {
            by_category.entry(record.category).or_default().push(record);
        }

        let mut sections: Vec<Vec<Block>> = Vec::new();
        sections.push(vec![
            Block::Heading(format!("Complaint report for {month}")),
            Block::Paragraph(summary_line(matching.len(), month)),
        ]);

        for category in Category::ALL {
            let Some(group) = by_category.get(&category) else {
                continue;
            };
            sections.push(vec![Block::Heading(category.to_string())]);
            for record in group {
                sections.push(self.record_section(record).await);
            }
        }

        ReportDocument {
            title: format!("Complaint report for {month}"),
            month,
            total: matching.len(),
            pages: layout::paginate(sections),
        }
    }

    async fn record_section(&self, record: &ComplaintRecord) -> Vec<Block> {
        vec![
            Block::FieldList(vec![
                ("ID".into(), record.id.to_string()),
                ("Status".into(), record.status.clone()),
                (
                    "Filed".into(),
                    format!("{} {}", record.display_date(), record.display_time()),
                ),
                ("Reporter".into(), record.reporter_name.clone()),
                ("Location".into(), record.location.clone()),
                ("Description".into(), record.description.clone()),
            ]),
            self.photo_block(record).await,
            Block::Divider,
        ]
    }

    /// Fetches the record's photo fresh from blob storage.
    ///
    /// The stored URL is expired or expiring, so the object path is
    /// re-derived from it and the bytes fetched through the adapter. Any
    /// failure degrades this one section to a placeholder; the rest of the
    /// report is unaffected.
    async fn photo_block(&self, record: &ComplaintRecord) -> Block {
        let Some(path) = self.blob.object_path_from_url(&record.photo_url) else {
            warn!(id = %record.id, "photo URL does not belong to the configured store");
            return Block::Placeholder("no image".into());
        };

        match self.blob.fetch(&path).await {
            Ok(data) => Block::Image {
                data,
                mime_type: "image/jpeg".into(),
                caption: Some(record.id.to_string()),
            },
            Err(e) => {
                warn!(id = %record.id, error = %e, "photo fetch failed, using placeholder");
                Block::Placeholder("no image".into())
            }
        }
    }
}

fn summary_line(total: usize, month: ReportMonth) -> String {
    match total {
        0 => format!("No complaints were filed in {month}."),
        1 => format!("1 complaint was filed in {month}."),
        n => format!("{n} complaints were filed in {month}."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fixdesk_core::document::Page;
    use fixdesk_core::types::{AdapterType, HealthStatus};
    use fixdesk_test_utils::{MemoryBlobStore, MemoryRecordStore, record_fixture_dated};

    use async_trait::async_trait;

    /// Renderer stub that records the document shape in its output.
    struct NullRenderer;

    #[async_trait]
    impl fixdesk_core::PluginAdapter for NullRenderer {
        fn name(&self) -> &str {
            "null-renderer"
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
    impl ReportRenderer for NullRenderer {
        async fn render(&self, doc: &ReportDocument) -> Result<RenderedReport, FixdeskError> {
            Ok(RenderedReport {
                filename: format!("report-{:02}-{}.txt", doc.month.month, doc.month.year),
                mime_type: "text/plain".into(),
                data: format!("{} pages", doc.pages.len()).into_bytes(),
            })
        }
    }

    async fn generator_with(
        records: Vec<fixdesk_core::types::ComplaintRecord>,
    ) -> (ReportGenerator, Arc<MemoryBlobStore>) {
        let store = Arc::new(MemoryRecordStore::new());
        let blob = Arc::new(MemoryBlobStore::new());

        // Give every seeded record a fetchable photo object.
        for record in &records {
            if let Some(path) = blob.object_path_from_url(&record.photo_url) {
                blob.upload(&path, vec![0xFF, 0xD8, 0xFF], "image/jpeg")
                    .await
                    .unwrap();
            }
        }
        store.seed(records).await;

        (
            ReportGenerator::new(store, blob.clone(), Arc::new(NullRenderer)),
            blob,
        )
    }

    fn blocks(pages: &[Page]) -> impl Iterator<Item = &Block> {
        pages.iter().flat_map(|p| p.blocks.iter())
    }

    #[tokio::test]
    async fn month_filter_uses_parsed_dates() {
        // Day 2 of December renders as 02/12/2026, whose date string
        // contains "02/2026" yet must not match February.
        let records = vec![
            record_fixture_dated(0, 2026, 2, 12),
            record_fixture_dated(1, 2026, 12, 2),
            record_fixture_dated(2, 2025, 2, 5),
        ];
        let (generator, _) = generator_with(records.clone()).await;

        let month = ReportMonth::parse("02/2026").unwrap();
        let doc = generator.build_document(month, &records).await;

        assert_eq!(doc.total, 1);
        let ids: Vec<String> = blocks(&doc.pages)
            .filter_map(|b| match b {
                Block::FieldList(rows) => rows
                    .iter()
                    .find(|(label, _)| label == "ID")
                    .map(|(_, v)| v.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(ids, vec!["A0000".to_string()]);
    }

    #[tokio::test]
    async fn records_group_by_category_in_fixed_order() {
        // Fixture categories cycle through Category::ALL; sequence 1 is ICT
        // and sequence 0 is Electrical, so Electrical must come first no
        // matter the record order.
        let records = vec![
            record_fixture_dated(1, 2026, 2, 10),
            record_fixture_dated(0, 2026, 2, 11),
        ];
        let (generator, _) = generator_with(records.clone()).await;

        let month = ReportMonth::parse("02/2026").unwrap();
        let doc = generator.build_document(month, &records).await;

        let headings: Vec<&str> = blocks(&doc.pages)
            .filter_map(|b| match b {
                Block::Heading(h) => Some(h.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(
            headings,
            vec!["Complaint report for 02/2026", "Electrical", "ICT"]
        );
    }

    #[tokio::test]
    async fn unfetchable_photo_degrades_to_placeholder_only() {
        let records = vec![
            record_fixture_dated(0, 2026, 2, 10),
            record_fixture_dated(1, 2026, 2, 11),
        ];
        let (generator, blob) = generator_with(records.clone()).await;

        let broken_path = blob
            .object_path_from_url(&records[1].photo_url)
            .expect("fixture URL is mock-scheme");
        blob.mark_unfetchable(&broken_path).await;

        let month = ReportMonth::parse("02/2026").unwrap();
        let doc = generator.build_document(month, &records).await;

        let images = blocks(&doc.pages)
            .filter(|b| matches!(b, Block::Image { .. }))
            .count();
        let placeholders = blocks(&doc.pages)
            .filter(|b| matches!(b, Block::Placeholder(_)))
            .count();
        assert_eq!(images, 1, "the healthy record keeps its photo");
        assert_eq!(placeholders, 1, "only the broken record degrades");
    }

    #[tokio::test]
    async fn empty_month_still_produces_a_summary() {
        let (generator, _) = generator_with(Vec::new()).await;
        let month = ReportMonth::parse("06/2026").unwrap();
        let doc = generator.build_document(month, &[]).await;

        assert_eq!(doc.total, 0);
        assert_eq!(doc.pages.len(), 1);
        let has_summary = blocks(&doc.pages).any(|b| {
            matches!(b, Block::Paragraph(p) if p.contains("No complaints"))
        });
        assert!(has_summary);
    }

    #[tokio::test]
    async fn generate_reads_store_and_renders() {
        let records = vec![record_fixture_dated(0, 2026, 2, 10)];
        let (generator, _) = generator_with(records).await;

        let month = ReportMonth::parse("02/2026").unwrap();
        let report = generator.generate(month).await.unwrap();
        assert_eq!(report.filename, "report-02-2026.txt");
        assert_eq!(report.mime_type, "text/plain");
    }
}
