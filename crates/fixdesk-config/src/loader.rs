// SPDX-FileCopyrightText: 2026 Fixdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./fixdesk.toml` > `~/.config/fixdesk/fixdesk.toml`
//! > `/etc/fixdesk/fixdesk.toml` with environment variable overrides via
//! the `FIXDESK_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::FixdeskConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/fixdesk/fixdesk.toml` (system-wide)
/// 3. `~/.config/fixdesk/fixdesk.toml` (user XDG config)
/// 4. `./fixdesk.toml` (local directory)
/// 5. `FIXDESK_*` environment variables
pub fn load_config() -> Result<FixdeskConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(FixdeskConfig::default()))
        .merge(Toml::file("/etc/fixdesk/fixdesk.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("fixdesk/fixdesk.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("fixdesk.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<FixdeskConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(FixdeskConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<FixdeskConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(FixdeskConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `FIXDESK_TELEGRAM_BOT_TOKEN` must map to
/// `telegram.bot_token`, not `telegram.bot.token`.
fn env_provider() -> Env {
    const SECTIONS: [&str; 6] = ["telegram", "sheet", "blob", "admin", "intake", "bot"];

    Env::prefixed("FIXDESK_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: FIXDESK_SHEET_SPREADSHEET_ID -> "sheet_spreadsheet_id"
        let key_str = key.as_str();
        let mapped = SECTIONS
            .iter()
            .find_map(|section| {
                key_str
                    .strip_prefix(section)
                    .and_then(|rest| rest.strip_prefix('_'))
                    .map(|rest| format!("{section}.{rest}"))
            })
            .unwrap_or_else(|| key_str.to_string());
        mapped.into()
    })
}
