// SPDX-FileCopyrightText: 2026 Fixdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Photo download from Telegram servers.
//!
//! Telegram provides several sizes per photo; the largest (last in the
//! array) is downloaded and handed to the core as a JPEG upload.

use teloxide::net::Download;
use teloxide::prelude::*;
use teloxide::types::{FileMeta, PhotoSize};
use tracing::debug;

use fixdesk_core::FixdeskError;
use fixdesk_core::types::PhotoUpload;

/// Downloads a file from Telegram servers by its file metadata.
///
/// Uses the Bot API's `getFile` to resolve the file path, then downloads
/// the file content as bytes.
pub async fn download_file(bot: &Bot, file_meta: &FileMeta) -> Result<Vec<u8>, FixdeskError> {
    let file = bot
        .get_file(file_meta.id.clone())
        .await
        .map_err(|e| FixdeskError::Channel {
            message: format!("failed to get file info: {e}"),
            source: Some(Box::new(e)),
        })?;

    let mut buf = Vec::new();
    bot.download_file(&file.path, &mut buf)
        .await
        .map_err(|e| FixdeskError::Channel {
            message: format!("failed to download file: {e}"),
            source: Some(Box::new(e)),
        })?;

    debug!(file_id = %file_meta.id, size = buf.len(), "downloaded file from Telegram");
    Ok(buf)
}

/// Downloads the largest variant of a photo message.
pub async fn extract_photo(bot: &Bot, photos: &[PhotoSize]) -> Result<PhotoUpload, FixdeskError> {
    // Telegram provides multiple sizes; the last one is the largest.
    let largest = photos.last().ok_or_else(|| FixdeskError::Channel {
        message: "photo array is empty".into(),
        source: None,
    })?;

    let data = download_file(bot, &largest.file).await?;

    Ok(PhotoUpload {
        data,
        mime_type: "image/jpeg".to_string(),
    })
}
