// SPDX-FileCopyrightText: 2026 Fixdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Update routing and event extraction.
//!
//! Determines whether an incoming Telegram update should be processed
//! (private chats only) and shapes it into a channel-agnostic
//! [`InboundEvent`]: `/start`, menu-button text, category callbacks, free
//! text, or a downloaded photo.

use teloxide::prelude::*;
use teloxide::types::{CallbackQuery, ChatKind, User};
use tracing::debug;

use fixdesk_core::FixdeskError;
use fixdesk_core::types::{EventKind, InboundEvent, Reporter, UserId};

use crate::{keyboard, media};

/// Checks whether the message is from a private (DM) chat.
///
/// Group, supergroup, and channel messages return `false`.
pub fn is_dm(msg: &Message) -> bool {
    matches!(msg.chat.kind, ChatKind::Private(_))
}

/// Builds the reporter identity from a Telegram user.
pub fn reporter_from(user: &User) -> Reporter {
    Reporter {
        id: UserId(user.id.0.to_string()),
        name: user.full_name(),
    }
}

/// Shapes a Telegram message into an inbound event.
///
/// Returns `None` for messages without a sender or with unsupported
/// content (stickers, voice notes, locations, ...). Photo messages are
/// downloaded here so the core only ever sees bytes.
pub async fn event_from_message(
    bot: &Bot,
    msg: &Message,
) -> Result<Option<InboundEvent>, FixdeskError> {
    let Some(user) = msg.from.as_ref() else {
        return Ok(None);
    };
    let reporter = reporter_from(user);
    let chat_id = msg.chat.id.0.to_string();

    if let Some(text) = msg.text() {
        let kind = if text.trim() == "/start" {
            EventKind::Start
        } else if let Some(choice) = keyboard::menu_choice_from_text(text) {
            EventKind::Menu(choice)
        } else {
            EventKind::Text(text.to_string())
        };
        return Ok(Some(InboundEvent {
            user: reporter,
            chat_id,
            kind,
        }));
    }

    if let Some(photos) = msg.photo() {
        let photo = media::extract_photo(bot, photos).await?;
        return Ok(Some(InboundEvent {
            user: reporter,
            chat_id,
            kind: EventKind::Photo(photo),
        }));
    }

    debug!(msg_id = msg.id.0, "ignoring unsupported message type");
    Ok(None)
}

/// Shapes a callback query (inline keyboard press) into an inbound event.
///
/// Only category callbacks are recognized; anything else returns `None`.
pub fn event_from_callback(query: &CallbackQuery) -> Option<InboundEvent> {
    let data = query.data.as_deref()?;
    let category = keyboard::category_from_callback(data)?;

    // In a DM the chat id equals the user id, which covers queries whose
    // originating message is no longer accessible.
    let chat_id = query
        .message
        .as_ref()
        .map(|m| m.chat().id.0.to_string())
        .unwrap_or_else(|| query.from.id.0.to_string());

    Some(InboundEvent {
        user: reporter_from(&query.from),
        chat_id,
        kind: EventKind::Category(category),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use fixdesk_core::types::{Category, MenuChoice};

    /// Build a mock private chat message from JSON, matching the Telegram
    /// Bot API structure.
    fn make_private_message(user_id: u64, text: &str) -> Message {
        let json = serde_json::json!({
            "message_id": 1,
            "date": 1700000000i64,
            "chat": {
                "id": user_id as i64,
                "type": "private",
                "first_name": "Test",
            },
            "from": {
                "id": user_id,
                "is_bot": false,
                "first_name": "Test",
                "last_name": "Reporter",
            },
            "text": text,
        });

        serde_json::from_value(json).expect("failed to deserialize mock message")
    }

    /// Build a mock group chat message.
    fn make_group_message(user_id: u64, text: &str) -> Message {
        let json = serde_json::json!({
            "message_id": 1,
            "date": 1700000000i64,
            "chat": {
                "id": -100123i64,
                "type": "supergroup",
                "title": "Test Group",
            },
            "from": {
                "id": user_id,
                "is_bot": false,
                "first_name": "Test",
            },
            "text": text,
        });

        serde_json::from_value(json).expect("failed to deserialize mock group message")
    }

    fn make_callback(user_id: u64, data: &str) -> CallbackQuery {
        let json = serde_json::json!({
            "id": "cb-1",
            "from": {
                "id": user_id,
                "is_bot": false,
                "first_name": "Test",
            },
            "chat_instance": "ci-1",
            "data": data,
        });

        serde_json::from_value(json).expect("failed to deserialize mock callback")
    }

    #[test]
    fn is_dm_private_chat() {
        assert!(is_dm(&make_private_message(12345, "hello")));
        assert!(!is_dm(&make_group_message(12345, "hello")));
    }

    #[tokio::test]
    async fn start_command_maps_to_start_event() {
        let bot = Bot::new("test:token");
        let msg = make_private_message(12345, "/start");
        let event = event_from_message(&bot, &msg).await.unwrap().unwrap();
        assert!(matches!(event.kind, EventKind::Start));
        assert_eq!(event.user.id.0, "12345");
        assert_eq!(event.user.name, "Test Reporter");
        assert_eq!(event.chat_id, "12345");
    }

    #[tokio::test]
    async fn menu_button_text_maps_to_menu_event() {
        let bot = Bot::new("test:token");
        let msg = make_private_message(12345, "🛠 File complaint");
        let event = event_from_message(&bot, &msg).await.unwrap().unwrap();
        assert!(matches!(
            event.kind,
            EventKind::Menu(MenuChoice::FileComplaint)
        ));
    }

    #[tokio::test]
    async fn other_text_maps_to_text_event() {
        let bot = Bot::new("test:token");
        let msg = make_private_message(12345, "Room 5A");
        let event = event_from_message(&bot, &msg).await.unwrap().unwrap();
        match event.kind {
            EventKind::Text(t) => assert_eq!(t, "Room 5A"),
            other => panic!("expected Text, got {other:?}"),
        }
    }

    #[test]
    fn category_callback_maps_to_category_event() {
        let query = make_callback(12345, "category|ICT");
        let event = event_from_callback(&query).unwrap();
        assert!(matches!(event.kind, EventKind::Category(Category::Ict)));
        // No originating message in the mock: falls back to the user id.
        assert_eq!(event.chat_id, "12345");
    }

    #[test]
    fn foreign_callback_data_is_ignored() {
        assert!(event_from_callback(&make_callback(1, "noop|x")).is_none());
    }
}
