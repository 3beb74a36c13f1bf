// SPDX-FileCopyrightText: 2026 Fixdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as required backend settings when the Telegram channel
//! is enabled and a sane initial complaint status.

use fixdesk_core::ComplaintStatus;

use crate::diagnostic::ConfigError;
use crate::model::FixdeskConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &FixdeskConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.bot.name.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "bot.name must not be empty".to_string(),
        });
    }

    // When the Telegram channel is enabled, both backends must be configured.
    if config.telegram.bot_token.is_some() {
        if config.sheet.spreadsheet_id.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: "sheet.spreadsheet_id is required when telegram.bot_token is set"
                    .to_string(),
            });
        }
        if config.blob.bucket.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: "blob.bucket is required when telegram.bot_token is set".to_string(),
            });
        }
    }

    if config.sheet.worksheet.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "sheet.worksheet must not be empty".to_string(),
        });
    }

    // A record can only start out as New or In progress.
    if config.intake.initial_status == ComplaintStatus::Resolved {
        errors.push(ConfigError::Validation {
            message: "intake.initial_status must be `new` or `in_progress`".to_string(),
        });
    }

    if config.intake.max_commit_attempts == 0 {
        errors.push(ConfigError::Validation {
            message: "intake.max_commit_attempts must be at least 1".to_string(),
        });
    }

    if config.admin.recent_records == 0 {
        errors.push(ConfigError::Validation {
            message: "admin.recent_records must be at least 1".to_string(),
        });
    }

    for (i, id) in config.admin.user_ids.iter().enumerate() {
        if id.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("admin.user_ids[{i}] must not be empty"),
            });
        }
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
