// SPDX-FileCopyrightText: 2026 Fixdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `fixdesk serve` command implementation.
//!
//! Wires the concrete adapters (Telegram channel, sheet record store,
//! blob store, HTML renderer) into the agent loop and runs it until a
//! shutdown signal arrives.

use std::sync::Arc;

use tracing::{error, info, warn};

use fixdesk_agent::{AgentLoop, shutdown};
use fixdesk_blob::FirebaseBlobStore;
use fixdesk_config::model::FixdeskConfig;
use fixdesk_core::FixdeskError;
use fixdesk_core::traits::blob_store::BlobStore;
use fixdesk_core::traits::channel::ChannelAdapter;
use fixdesk_core::traits::record_store::RecordStore;
use fixdesk_core::types::HealthStatus;
use fixdesk_report::{HtmlReportRenderer, ReportGenerator};
use fixdesk_store::{RecordCommitter, SheetStore};
use fixdesk_telegram::TelegramChannel;

/// Runs the `fixdesk serve` command.
pub async fn run_serve(config: FixdeskConfig) -> Result<(), FixdeskError> {
    init_tracing(&config.bot.log_level);

    info!(bot_name = config.bot.name.as_str(), "starting fixdesk serve");

    // Record store.
    let store: Arc<dyn RecordStore> = Arc::new(SheetStore::new(config.sheet.clone())?);

    // Blob storage for photos.
    let blob: Arc<dyn BlobStore> = Arc::new(FirebaseBlobStore::new(config.blob.clone())?);

    // Commit path and report generator share the adapters.
    let committer = Arc::new(RecordCommitter::new(store.clone(), config.intake.clone()));
    let generator = Arc::new(ReportGenerator::new(
        store.clone(),
        blob.clone(),
        Arc::new(HtmlReportRenderer::new()),
    ));

    // Telegram transport.
    let mut telegram = TelegramChannel::new(config.telegram.clone()).map_err(|e| {
        error!(error = %e, "failed to initialize Telegram channel");
        eprintln!(
            "error: Telegram bot token required. Set telegram.bot_token in fixdesk.toml \
             or the FIXDESK_TELEGRAM_BOT_TOKEN environment variable."
        );
        e
    })?;
    telegram.connect().await?;
    let channel: Arc<dyn ChannelAdapter> = Arc::new(telegram);

    // Startup health checks are advisory: the desk still starts degraded.
    match store.health_check().await? {
        HealthStatus::Healthy => info!("record store healthy"),
        HealthStatus::Degraded(reason) | HealthStatus::Unhealthy(reason) => {
            warn!(reason = reason.as_str(), "record store not healthy at startup");
        }
    }
    match blob.health_check().await? {
        HealthStatus::Healthy => info!("blob storage healthy"),
        HealthStatus::Degraded(reason) | HealthStatus::Unhealthy(reason) => {
            warn!(reason = reason.as_str(), "blob storage not healthy at startup");
        }
    }

    let cancel = shutdown::install_signal_handler();
    let agent = AgentLoop::new(channel, store, committer, blob, generator, config);
    agent.run(cancel).await
}

/// Initializes the tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise the configured `bot.log_level`
/// applies.
fn init_tracing(level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
