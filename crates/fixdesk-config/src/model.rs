// SPDX-FileCopyrightText: 2026 Fixdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Fixdesk complaint desk.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use fixdesk_core::ComplaintStatus;
use serde::{Deserialize, Serialize};

/// Top-level Fixdesk configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable
/// overrides. All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FixdeskConfig {
    /// Bot identity and logging settings.
    #[serde(default)]
    pub bot: BotConfig,

    /// Telegram transport settings.
    #[serde(default)]
    pub telegram: TelegramConfig,

    /// Record store (spreadsheet backend) settings.
    #[serde(default)]
    pub sheet: SheetConfig,

    /// Blob storage (photo hosting) settings.
    #[serde(default)]
    pub blob: BlobConfig,

    /// Administrator allow-list settings.
    #[serde(default)]
    pub admin: AdminConfig,

    /// Complaint intake settings.
    #[serde(default)]
    pub intake: IntakeConfig,
}

/// Bot identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BotConfig {
    /// Display name of the bot.
    #[serde(default = "default_bot_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            name: default_bot_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_bot_name() -> String {
    "fixdesk".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Telegram transport configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TelegramConfig {
    /// Telegram Bot API token. `None` disables the Telegram channel.
    #[serde(default)]
    pub bot_token: Option<String>,
}

/// Record store configuration (spreadsheet values API).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SheetConfig {
    /// Spreadsheet document id holding the complaint ledger.
    #[serde(default)]
    pub spreadsheet_id: String,

    /// Worksheet (tab) name holding the records.
    #[serde(default = "default_worksheet")]
    pub worksheet: String,

    /// Numeric grid id of the worksheet, used for row insertion.
    #[serde(default)]
    pub grid_id: i64,

    /// Bearer token for the values API. `None` sends unauthenticated
    /// requests (only useful against a local mock).
    #[serde(default)]
    pub api_token: Option<String>,

    /// API base URL. Overridden in tests.
    #[serde(default = "default_sheet_base_url")]
    pub base_url: String,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            spreadsheet_id: String::new(),
            worksheet: default_worksheet(),
            grid_id: 0,
            api_token: None,
            base_url: default_sheet_base_url(),
        }
    }
}

fn default_worksheet() -> String {
    "Sheet1".to_string()
}

fn default_sheet_base_url() -> String {
    "https://sheets.googleapis.com".to_string()
}

/// Blob storage configuration (photo hosting).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BlobConfig {
    /// Storage bucket hosting complaint photos.
    #[serde(default)]
    pub bucket: String,

    /// Bearer token for the storage API. `None` sends unauthenticated
    /// requests (only useful against a local mock).
    #[serde(default)]
    pub api_token: Option<String>,

    /// API base URL. Overridden in tests.
    #[serde(default = "default_blob_base_url")]
    pub base_url: String,
}

impl Default for BlobConfig {
    fn default() -> Self {
        Self {
            bucket: String::new(),
            api_token: None,
            base_url: default_blob_base_url(),
        }
    }
}

fn default_blob_base_url() -> String {
    "https://firebasestorage.googleapis.com".to_string()
}

/// Administrator allow-list configuration.
///
/// An empty list means no one can use the admin actions (secure default).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AdminConfig {
    /// User ids allowed to run "View records" and "Monthly report".
    #[serde(default)]
    pub user_ids: Vec<String>,

    /// Number of records shown by "View records".
    #[serde(default = "default_recent_records")]
    pub recent_records: usize,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            user_ids: Vec::new(),
            recent_records: default_recent_records(),
        }
    }
}

fn default_recent_records() -> usize {
    10
}

/// Complaint intake configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct IntakeConfig {
    /// Status written onto freshly committed records. Observed deployments
    /// disagree on `new` vs `in_progress`, so this is a setting, not a
    /// constant.
    #[serde(default = "default_initial_status")]
    pub initial_status: ComplaintStatus,

    /// Maximum allocate-and-insert attempts per commit.
    #[serde(default = "default_max_commit_attempts")]
    pub max_commit_attempts: u32,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            initial_status: default_initial_status(),
            max_commit_attempts: default_max_commit_attempts(),
        }
    }
}

fn default_initial_status() -> ComplaintStatus {
    ComplaintStatus::New
}

fn default_max_commit_attempts() -> u32 {
    3
}
