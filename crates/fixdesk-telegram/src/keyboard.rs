// SPDX-FileCopyrightText: 2026 Fixdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Keyboard markup and label mapping.
//!
//! The persistent reply keyboard carries the fixed menu; categories are an
//! inline keyboard whose callback data is `category|<name>`. Labels are the
//! channel's concern: the core only ever sees [`MenuChoice`] and
//! [`Category`] values.

use std::str::FromStr;

use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup, KeyboardButton, KeyboardMarkup};

use fixdesk_core::types::{Category, MenuChoice};

const CALLBACK_CATEGORY_PREFIX: &str = "category|";

/// Button label for a menu choice.
pub fn menu_label(choice: MenuChoice) -> &'static str {
    match choice {
        MenuChoice::FileComplaint => "🛠 File complaint",
        MenuChoice::CheckStatus => "🔍 Check status",
        MenuChoice::ViewRecords => "📋 View records",
        MenuChoice::MonthlyReport => "📊 Monthly report",
    }
}

/// Maps a message text back to a menu choice, if it is a menu button.
pub fn menu_choice_from_text(text: &str) -> Option<MenuChoice> {
    MenuChoice::ALL
        .into_iter()
        .find(|choice| menu_label(*choice) == text.trim())
}

/// The persistent main-menu reply keyboard, two buttons per row.
pub fn main_menu() -> KeyboardMarkup {
    let rows: Vec<Vec<KeyboardButton>> = MenuChoice::ALL
        .chunks(2)
        .map(|pair| {
            pair.iter()
                .map(|choice| KeyboardButton::new(menu_label(*choice)))
                .collect()
        })
        .collect();
    KeyboardMarkup::new(rows).resize_keyboard()
}

/// The inline category picker, one category per row.
pub fn category_picker() -> InlineKeyboardMarkup {
    let rows: Vec<Vec<InlineKeyboardButton>> = Category::ALL
        .into_iter()
        .map(|category| {
            vec![InlineKeyboardButton::callback(
                category.to_string(),
                format!("{CALLBACK_CATEGORY_PREFIX}{category}"),
            )]
        })
        .collect();
    InlineKeyboardMarkup::new(rows)
}

/// Parses category callback data (`category|<name>`).
pub fn category_from_callback(data: &str) -> Option<Category> {
    let name = data.strip_prefix(CALLBACK_CATEGORY_PREFIX)?;
    Category::from_str(name).ok()
}
