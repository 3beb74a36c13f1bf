// SPDX-FileCopyrightText: 2026 Fixdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Fixdesk complaint desk.

use thiserror::Error;

/// The primary error type used across all Fixdesk adapter traits and core
/// operations.
///
/// Every variant maps to exactly one user-facing behavior (see the message
/// mapping in `fixdesk-agent`): transient I/O errors surface a generic
/// "system error" reply, `Unauthorized` a fixed refusal, and so on. A status
/// lookup miss is a normal outcome and is deliberately NOT an error variant.
#[derive(Debug, Error)]
pub enum FixdeskError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Messaging channel errors (connection failure, delivery failure, media download).
    #[error("channel error: {message}")]
    Channel {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Record store errors (read, count, or insert round-trip failure).
    #[error("record store error: {message}")]
    Store {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Blob storage errors (photo upload or download failure).
    #[error("blob storage error: {message}")]
    Blob {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Report rendering errors.
    #[error("render error: {message}")]
    Render { message: String },

    /// A stored row does not match the fixed record schema.
    #[error("invalid record at row {row}: {reason}")]
    InvalidRecord { row: usize, reason: String },

    /// Operation timed out.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// A non-administrator invoked an administrator-only action.
    #[error("unauthorized")]
    Unauthorized,

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
