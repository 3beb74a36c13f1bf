// SPDX-FileCopyrightText: 2026 Fixdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Telegram channel adapter for the Fixdesk complaint desk.
//!
//! Implements [`ChannelAdapter`] for the Telegram Bot API via teloxide:
//! long polling, DM-only routing, reply/inline keyboards, photo download,
//! and report delivery as a document attachment.

pub mod handler;
pub mod keyboard;
pub mod media;

use async_trait::async_trait;
use teloxide::dptree;
use teloxide::prelude::*;
use teloxide::types::{CallbackQuery, ChatId, InputFile, Recipient};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use fixdesk_config::model::TelegramConfig;
use fixdesk_core::FixdeskError;
use fixdesk_core::traits::adapter::PluginAdapter;
use fixdesk_core::traits::channel::ChannelAdapter;
use fixdesk_core::types::{AdapterType, HealthStatus, InboundEvent, MessageId, Reply, ReplyBody};

/// Telegram channel adapter implementing [`ChannelAdapter`].
///
/// Connects via long polling, shapes updates into [`InboundEvent`]s on a
/// background task, and renders [`Reply`] payloads back out.
pub struct TelegramChannel {
    bot: Bot,
    inbound_rx: tokio::sync::Mutex<mpsc::Receiver<InboundEvent>>,
    inbound_tx: mpsc::Sender<InboundEvent>,
    polling_handle: Option<tokio::task::JoinHandle<()>>,
}

impl TelegramChannel {
    /// Creates a new Telegram channel adapter.
    ///
    /// Requires `config.bot_token` to be set.
    pub fn new(config: TelegramConfig) -> Result<Self, FixdeskError> {
        let token = config.bot_token.as_deref().ok_or_else(|| {
            FixdeskError::Config("telegram.bot_token is required for the Telegram adapter".into())
        })?;

        if token.is_empty() {
            return Err(FixdeskError::Config(
                "telegram.bot_token cannot be empty".into(),
            ));
        }

        let bot = Bot::new(token);
        let (inbound_tx, inbound_rx) = mpsc::channel(100);

        Ok(Self {
            bot,
            inbound_rx: tokio::sync::Mutex::new(inbound_rx),
            inbound_tx,
            polling_handle: None,
        })
    }

    /// Returns a reference to the underlying teloxide Bot.
    pub fn bot(&self) -> &Bot {
        &self.bot
    }

    fn recipient(chat_id: &str) -> Result<Recipient, FixdeskError> {
        chat_id
            .parse::<i64>()
            .map(|id| Recipient::Id(ChatId(id)))
            .map_err(|e| FixdeskError::Channel {
                message: format!("invalid chat_id `{chat_id}`: {e}"),
                source: None,
            })
    }
}

#[async_trait]
impl PluginAdapter for TelegramChannel {
    fn name(&self) -> &str {
        "telegram"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Channel
    }

    async fn health_check(&self) -> Result<HealthStatus, FixdeskError> {
        // Check that the bot token is valid by calling getMe.
        match self.bot.get_me().await {
            Ok(_) => Ok(HealthStatus::Healthy),
            Err(e) => Ok(HealthStatus::Unhealthy(format!(
                "Telegram bot unreachable: {e}"
            ))),
        }
    }

    async fn shutdown(&self) -> Result<(), FixdeskError> {
        debug!("Telegram channel shutting down");
        // The polling handle is aborted when TelegramChannel is dropped.
        // For graceful shutdown the agent loop stops calling receive() first.
        Ok(())
    }
}

#[async_trait]
impl ChannelAdapter for TelegramChannel {
    async fn connect(&mut self) -> Result<(), FixdeskError> {
        if self.polling_handle.is_some() {
            return Ok(()); // Already connected
        }

        let bot = self.bot.clone();
        let message_tx = self.inbound_tx.clone();
        let callback_tx = self.inbound_tx.clone();

        info!("starting Telegram long polling");

        let handle = tokio::spawn(async move {
            let message_branch = Update::filter_message().endpoint(
                move |bot: Bot, msg: Message| {
                    let tx = message_tx.clone();
                    async move {
                        // DMs only; group traffic is not part of the desk.
                        if !handler::is_dm(&msg) {
                            debug!(chat_id = msg.chat.id.0, "ignoring non-DM message");
                            return respond(());
                        }

                        match handler::event_from_message(&bot, &msg).await {
                            Ok(Some(event)) => {
                                if tx.send(event).await.is_err() {
                                    warn!("inbound channel closed, dropping message");
                                }
                            }
                            Ok(None) => {
                                debug!(msg_id = msg.id.0, "ignoring unsupported message");
                            }
                            Err(e) => {
                                error!(error = %e, "failed to extract message event");
                            }
                        }

                        respond(())
                    }
                },
            );

            let callback_branch = Update::filter_callback_query().endpoint(
                move |bot: Bot, query: CallbackQuery| {
                    let tx = callback_tx.clone();
                    async move {
                        // Stop the client-side button spinner.
                        if let Err(e) = bot.answer_callback_query(query.id.clone()).await {
                            debug!(error = %e, "failed to answer callback query");
                        }

                        if let Some(event) = handler::event_from_callback(&query) {
                            if tx.send(event).await.is_err() {
                                warn!("inbound channel closed, dropping callback");
                            }
                        }

                        respond(())
                    }
                },
            );

            Dispatcher::builder(
                bot,
                dptree::entry()
                    .branch(message_branch)
                    .branch(callback_branch),
            )
            .default_handler(|_| async {}) // Silently ignore other updates
            .build()
            .dispatch()
            .await;
        });

        self.polling_handle = Some(handle);
        Ok(())
    }

    async fn send(&self, reply: Reply) -> Result<MessageId, FixdeskError> {
        let chat = Self::recipient(&reply.chat_id)?;

        let sent = match reply.body {
            ReplyBody::Text(text) => self
                .bot
                .send_message(chat, text)
                .await
                .map_err(|e| FixdeskError::Channel {
                    message: format!("failed to send message: {e}"),
                    source: Some(Box::new(e)),
                })?,

            ReplyBody::Menu { text } => self
                .bot
                .send_message(chat, text)
                .reply_markup(keyboard::main_menu())
                .await
                .map_err(|e| FixdeskError::Channel {
                    message: format!("failed to send menu: {e}"),
                    source: Some(Box::new(e)),
                })?,

            ReplyBody::CategoryPicker { text } => self
                .bot
                .send_message(chat, text)
                .reply_markup(keyboard::category_picker())
                .await
                .map_err(|e| FixdeskError::Channel {
                    message: format!("failed to send category picker: {e}"),
                    source: Some(Box::new(e)),
                })?,

            ReplyBody::Document {
                filename,
                mime_type: _,
                data,
                caption,
            } => {
                let input = InputFile::memory(data).file_name(filename);
                let request = self.bot.send_document(chat, input);
                let request = match caption {
                    Some(caption) => request.caption(caption),
                    None => request,
                };
                request.await.map_err(|e| FixdeskError::Channel {
                    message: format!("failed to send document: {e}"),
                    source: Some(Box::new(e)),
                })?
            }
        };

        Ok(MessageId(sent.id.0.to_string()))
    }

    async fn receive(&self) -> Result<InboundEvent, FixdeskError> {
        let mut rx = self.inbound_rx.lock().await;
        rx.recv().await.ok_or_else(|| FixdeskError::Channel {
            message: "Telegram inbound channel closed".into(),
            source: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_requires_bot_token() {
        let config = TelegramConfig { bot_token: None };
        assert!(TelegramChannel::new(config).is_err());
    }

    #[test]
    fn new_rejects_empty_token() {
        let config = TelegramConfig {
            bot_token: Some(String::new()),
        };
        assert!(TelegramChannel::new(config).is_err());
    }

    #[test]
    fn new_accepts_valid_token() {
        let config = TelegramConfig {
            bot_token: Some("123456:ABC-DEF1234ghIkl-zyx57W2v1u123ew11".into()),
        };
        assert!(TelegramChannel::new(config).is_ok());
    }

    #[test]
    fn plugin_adapter_metadata() {
        let config = TelegramConfig {
            bot_token: Some("test:token".into()),
        };
        let channel = TelegramChannel::new(config).unwrap();
        assert_eq!(channel.name(), "telegram");
        assert_eq!(channel.version(), semver::Version::new(0, 1, 0));
        assert_eq!(channel.adapter_type(), AdapterType::Channel);
    }

    #[test]
    fn recipient_requires_numeric_chat_id() {
        assert!(TelegramChannel::recipient("12345").is_ok());
        assert!(TelegramChannel::recipient("not-a-chat").is_err());
    }
}
