// SPDX-FileCopyrightText: 2026 Fixdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Agent loop and session management for the Fixdesk complaint desk.
//!
//! The [`AgentLoop`] is the central coordinator that:
//! - Receives events from a channel adapter
//! - Routes them by user identity to per-user sessions
//! - Runs the effects the state machine requests (commit, lookup, report)
//! - Maps failures onto fixed user-facing messages
//! - Handles graceful shutdown
//!
//! Each inbound event is handled on its own task, so users never block each
//! other; the per-user session mutex is what serializes a single user's
//! events, and the record committer's global lock is the only process-wide
//! critical section.

pub mod messages;
pub mod registry;
pub mod session;
pub mod shutdown;

use std::sync::Arc;
use std::time::Duration;

use chrono::Local;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use fixdesk_config::model::FixdeskConfig;
use fixdesk_core::FixdeskError;
use fixdesk_core::traits::blob_store::BlobStore;
use fixdesk_core::traits::channel::ChannelAdapter;
use fixdesk_core::traits::record_store::RecordStore;
use fixdesk_core::types::{
    CompleteDraft, ComplaintRecord, InboundEvent, PhotoUpload, Reply, ReplyBody, Reporter, UserId,
    photo_object_path,
};
use fixdesk_report::ReportGenerator;
use fixdesk_store::{RecordCommitter, find_by_id};

use crate::registry::SessionRegistry;
use crate::session::{Prompt, Transition};

/// How long in-flight event tasks get to finish during shutdown.
const DRAIN_TIMEOUT: Duration = Duration::from_secs(30);

/// The main agent loop coordinating channel, store, blob storage, and the
/// report generator.
pub struct AgentLoop {
    channel: Arc<dyn ChannelAdapter>,
    store: Arc<dyn RecordStore>,
    committer: Arc<RecordCommitter>,
    blob: Arc<dyn BlobStore>,
    generator: Arc<ReportGenerator>,
    registry: SessionRegistry,
    config: FixdeskConfig,
}

impl AgentLoop {
    pub fn new(
        channel: Arc<dyn ChannelAdapter>,
        store: Arc<dyn RecordStore>,
        committer: Arc<RecordCommitter>,
        blob: Arc<dyn BlobStore>,
        generator: Arc<ReportGenerator>,
        config: FixdeskConfig,
    ) -> Arc<Self> {
        info!(bot_name = config.bot.name.as_str(), "agent loop initialized");
        Arc::new(Self {
            channel,
            store,
            committer,
            blob,
            generator,
            registry: SessionRegistry::new(),
            config,
        })
    }

    /// Runs the main loop until the cancellation token is triggered.
    ///
    /// Every inbound event is spawned onto its own task; on shutdown the
    /// in-flight tasks are drained before the channel is closed.
    pub async fn run(self: Arc<Self>, cancel: CancellationToken) -> Result<(), FixdeskError> {
        info!("agent loop running");

        let mut tasks: JoinSet<()> = JoinSet::new();

        loop {
            tokio::select! {
                event = self.channel.receive() => {
                    match event {
                        Ok(event) => {
                            // Reap tasks that finished since the last event.
                            while tasks.try_join_next().is_some() {}

                            let this = Arc::clone(&self);
                            tasks.spawn(async move {
                                if let Err(e) = this.handle_event(event).await {
                                    error!(error = %e, "failed to handle event");
                                }
                            });
                        }
                        Err(e) => {
                            error!(error = %e, "channel receive error");
                            if e.to_string().contains("closed") {
                                break;
                            }
                        }
                    }
                }
                _ = cancel.cancelled() => {
                    info!("shutdown signal received, stopping agent loop");
                    break;
                }
            }
        }

        shutdown::drain_tasks(tasks, DRAIN_TIMEOUT).await;
        self.channel.shutdown().await?;
        self.store.shutdown().await?;

        info!("agent loop stopped");
        Ok(())
    }

    /// Handles one inbound event end to end.
    ///
    /// The user's session lock is held for the whole cycle, which is what
    /// serializes events from a single user.
    pub async fn handle_event(&self, event: InboundEvent) -> Result<(), FixdeskError> {
        let InboundEvent {
            user,
            chat_id,
            kind,
        } = event;
        let is_admin = self.is_admin(&user.id);

        let handle = self.registry.session(&user.id);
        let mut session = handle.lock().await;
        let transition = session.apply(&kind, is_admin);

        debug!(
            user_id = %user.id,
            step = %session.step(),
            "event applied"
        );

        match transition {
            Transition::Ignored => Ok(()),

            Transition::Prompt(prompt) => self.send_prompt(&chat_id, prompt).await,

            Transition::Refused => self.send_text(&chat_id, messages::REFUSAL.into()).await,

            Transition::Commit { draft, photo } => {
                match self.commit(&user, draft, photo).await {
                    Ok(record) => {
                        // Only a landed commit ends the filing flow.
                        session.reset();
                        self.send_text(&chat_id, messages::confirmation(&record)).await
                    }
                    Err(e) => {
                        error!(user_id = %user.id, error = %e, "commit failed");
                        self.send_text(&chat_id, messages::user_message(&e).into())
                            .await
                    }
                }
            }

            Transition::Lookup { id } => match self.store.read_all().await {
                Ok(records) => {
                    let text = match find_by_id(&records, id.as_str()) {
                        Some(record) => messages::status_found(record),
                        None => messages::status_not_found(id.as_str()),
                    };
                    self.send_text(&chat_id, text).await
                }
                Err(e) => {
                    error!(error = %e, "status lookup failed");
                    self.send_text(&chat_id, messages::user_message(&e).into())
                        .await
                }
            },

            Transition::Report { month } => match self.generator.generate(month).await {
                Ok(report) => {
                    info!(month = %month, filename = report.filename.as_str(), "report generated");
                    // The artifact only exists in memory; once handed to the
                    // transport it is dropped, so nothing persists locally.
                    self.channel
                        .send(Reply {
                            chat_id: chat_id.clone(),
                            body: ReplyBody::Document {
                                filename: report.filename,
                                mime_type: report.mime_type,
                                data: report.data,
                                caption: Some(format!("Complaint report for {month}")),
                            },
                        })
                        .await?;
                    Ok(())
                }
                Err(e) => {
                    error!(month = %month, error = %e, "report generation failed");
                    self.send_text(&chat_id, messages::user_message(&e).into())
                        .await
                }
            },

            Transition::ListRecords => match self.store.read_all().await {
                Ok(records) => {
                    let text =
                        messages::recent_records(&records, self.config.admin.recent_records);
                    self.send_text(&chat_id, text).await
                }
                Err(e) => {
                    error!(error = %e, "record listing failed");
                    self.send_text(&chat_id, messages::user_message(&e).into())
                        .await
                }
            },
        }
    }

    /// Uploads the photo, then allocates an id and commits the record.
    ///
    /// Failure after the insert has been acknowledged never re-appends; a
    /// failed confirmation send surfaces as a channel error and is only
    /// logged by the caller.
    async fn commit(
        &self,
        user: &Reporter,
        draft: CompleteDraft,
        photo: PhotoUpload,
    ) -> Result<ComplaintRecord, FixdeskError> {
        let object_path = photo_object_path(&user.id, &Local::now().naive_local());
        let photo_url = self
            .blob
            .upload(&object_path, photo.data, &photo.mime_type)
            .await?;

        self.committer
            .allocate_and_commit(user, draft, photo_url)
            .await
    }

    fn is_admin(&self, user_id: &UserId) -> bool {
        self.config
            .admin
            .user_ids
            .iter()
            .any(|allowed| allowed == &user_id.0)
    }

    async fn send_prompt(&self, chat_id: &str, prompt: Prompt) -> Result<(), FixdeskError> {
        let text = messages::prompt_text(prompt).to_string();
        let body = match prompt {
            Prompt::MainMenu => ReplyBody::Menu { text },
            Prompt::ChooseCategory => ReplyBody::CategoryPicker { text },
            _ => ReplyBody::Text(text),
        };
        self.channel
            .send(Reply {
                chat_id: chat_id.to_string(),
                body,
            })
            .await?;
        Ok(())
    }

    async fn send_text(&self, chat_id: &str, text: String) -> Result<(), FixdeskError> {
        self.channel
            .send(Reply {
                chat_id: chat_id.to_string(),
                body: ReplyBody::Text(text),
            })
            .await?;
        Ok(())
    }
}
