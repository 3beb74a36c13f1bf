// SPDX-FileCopyrightText: 2026 Fixdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Fixdesk configuration system.

use fixdesk_config::diagnostic::{ConfigError, suggest_key};
use fixdesk_config::model::FixdeskConfig;
use fixdesk_config::{load_and_validate_str, load_config_from_str};
use fixdesk_core::ComplaintStatus;

/// Valid TOML with all known fields deserializes successfully.
#[test]
fn valid_toml_deserializes_into_fixdesk_config() {
    let toml = r#"
[bot]
name = "test-desk"
log_level = "debug"

[telegram]
bot_token = "123:ABC"

[sheet]
spreadsheet_id = "sheet-1"
worksheet = "Complaints"
grid_id = 7
api_token = "ya29.token"

[blob]
bucket = "photos.example.app"
api_token = "ya29.blob"

[admin]
user_ids = ["1001", "1002"]
recent_records = 5

[intake]
initial_status = "in_progress"
max_commit_attempts = 5
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.bot.name, "test-desk");
    assert_eq!(config.bot.log_level, "debug");
    assert_eq!(config.telegram.bot_token.as_deref(), Some("123:ABC"));
    assert_eq!(config.sheet.spreadsheet_id, "sheet-1");
    assert_eq!(config.sheet.worksheet, "Complaints");
    assert_eq!(config.sheet.grid_id, 7);
    assert_eq!(config.blob.bucket, "photos.example.app");
    assert_eq!(config.admin.user_ids, vec!["1001", "1002"]);
    assert_eq!(config.admin.recent_records, 5);
    assert_eq!(config.intake.initial_status, ComplaintStatus::InProgress);
    assert_eq!(config.intake.max_commit_attempts, 5);
}

/// Missing optional sections use defaults without error.
#[test]
fn missing_optional_sections_use_defaults() {
    let toml = "";
    let config = load_config_from_str(toml).expect("empty TOML should use defaults");

    assert_eq!(config.bot.name, "fixdesk");
    assert_eq!(config.bot.log_level, "info");
    assert!(config.telegram.bot_token.is_none());
    assert_eq!(config.sheet.worksheet, "Sheet1");
    assert_eq!(config.sheet.base_url, "https://sheets.googleapis.com");
    assert_eq!(config.blob.base_url, "https://firebasestorage.googleapis.com");
    assert!(config.admin.user_ids.is_empty());
    assert_eq!(config.admin.recent_records, 10);
    assert_eq!(config.intake.initial_status, ComplaintStatus::New);
    assert_eq!(config.intake.max_commit_attempts, 3);
}

/// Unknown field in a section produces an error.
#[test]
fn unknown_field_in_sheet_produces_error() {
    let toml = r#"
[sheet]
spredsheet_id = "abc"
"#;

    let err = load_config_from_str(toml).expect_err("should reject unknown field");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("unknown field") || err_str.contains("spredsheet_id"),
        "error should mention unknown field, got: {err_str}"
    );
}

/// Unexpected top-level section is rejected by deny_unknown_fields.
#[test]
fn deny_unknown_fields_at_top_level() {
    let toml = r#"
[logging]
level = "debug"
"#;

    let err = load_config_from_str(toml).expect_err("unknown top-level section should be rejected");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("unknown field") || err_str.contains("logging"),
        "error should mention unknown field, got: {err_str}"
    );
}

/// Dot-notation override maps onto nested keys, mirroring what the
/// `FIXDESK_TELEGRAM_BOT_TOKEN` env mapping produces.
#[test]
fn env_style_override_sets_bot_token() {
    use figment::{Figment, providers::Serialized};

    let config: FixdeskConfig = Figment::new()
        .merge(Serialized::defaults(FixdeskConfig::default()))
        .merge(("telegram.bot_token", "xyz-from-env"))
        .extract()
        .expect("should set bot_token via dot notation");

    assert_eq!(config.telegram.bot_token.as_deref(), Some("xyz-from-env"));
}

/// Missing config files are silently skipped (Figment's Toml::file() behavior).
#[test]
fn missing_config_files_silently_skipped() {
    use figment::{
        Figment,
        providers::{Format, Serialized, Toml},
    };

    let config: FixdeskConfig = Figment::new()
        .merge(Serialized::defaults(FixdeskConfig::default()))
        .merge(Toml::file("/nonexistent/path/fixdesk.toml"))
        .extract()
        .expect("missing file should be silently skipped");

    assert_eq!(config.bot.name, "fixdesk");
}

/// Unknown key "bukcet" in [blob] produces suggestion "did you mean `bucket`?"
#[test]
fn diagnostic_error_includes_unknown_key() {
    let toml = r#"
[blob]
bukcet = "photos"
"#;

    let errors = load_and_validate_str(toml).expect_err("should produce errors");
    assert!(!errors.is_empty(), "should have at least one error");

    let has_unknown_key = errors.iter().any(|e| {
        matches!(e, ConfigError::UnknownKey { key, suggestion, valid_keys, .. } if {
            key == "bukcet"
                && suggestion.as_deref() == Some("bucket")
                && valid_keys.contains("bucket")
        })
    });
    assert!(
        has_unknown_key,
        "should have UnknownKey error for 'bukcet' with suggestion 'bucket', got: {errors:?}"
    );
}

/// Unknown key with no close match does NOT produce a suggestion.
#[test]
fn diagnostic_no_suggestion_for_distant_typo() {
    let valid_keys = &["bucket", "api_token", "base_url"];
    let suggestion = suggest_key("zzzzzz", valid_keys);
    assert!(suggestion.is_none(), "should not suggest for distant typo");
}

/// Invalid type (string where number expected) produces clear message.
#[test]
fn diagnostic_invalid_type_message() {
    let toml = r#"
[admin]
recent_records = "ten"
"#;

    let err = load_config_from_str(toml).expect_err("should reject invalid type");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("invalid type") || err_str.contains("recent_records"),
        "error should mention type mismatch, got: {err_str}"
    );
}

/// ConfigError implements miette::Diagnostic (can be rendered).
#[test]
fn config_error_implements_diagnostic() {
    use miette::Diagnostic;

    let error = ConfigError::UnknownKey {
        key: "bukcet".to_string(),
        suggestion: Some("bucket".to_string()),
        valid_keys: "bucket, api_token, base_url".to_string(),
        span: None,
        src: None,
    };

    let code = error.code();
    assert!(code.is_some(), "should have diagnostic code");

    let help = error.help();
    assert!(help.is_some(), "should have help text");
    let help_str = help.unwrap().to_string();
    assert!(
        help_str.contains("did you mean `bucket`"),
        "help should contain suggestion, got: {help_str}"
    );
}

/// An invalid initial status name is rejected at deserialization time.
#[test]
fn invalid_initial_status_rejected() {
    let toml = r#"
[intake]
initial_status = "closed"
"#;

    assert!(load_config_from_str(toml).is_err());
}

/// Validation rejects `resolved` as an initial status.
#[test]
fn validation_rejects_resolved_initial_status() {
    let toml = r#"
[intake]
initial_status = "resolved"
"#;

    let errors = load_and_validate_str(toml).expect_err("resolved should fail validation");
    let has_validation_error = errors.iter().any(|e| {
        matches!(e, ConfigError::Validation { message } if message.contains("initial_status"))
    });
    assert!(has_validation_error, "should flag initial_status, got: {errors:?}");
}

/// load_and_validate_str with valid TOML returns Ok config.
#[test]
fn load_and_validate_valid_toml() {
    let toml = r#"
[bot]
name = "desk"
"#;

    let config = load_and_validate_str(toml).expect("valid TOML should validate");
    assert_eq!(config.bot.name, "desk");
}
