//! Command handler helper functions
//!
//! Reusable pieces shared by the command, callback and inline handlers:
//! storage timeouts, media extraction and message formatting.

use crate::constants::STORE_TIMEOUT_SECS;
use crate::error::{BotError, BotResult};
use crate::utils;
use std::future::Future;
use std::time::Duration;
use store::{FileType, LinkEntry, MediaRecord, StoreResult};
use teloxide::prelude::*;

/// Run a storage call with the bot-wide timeout
///
/// A timeout is reported as `BotError::Timeout` and leaves no state behind on
/// our side; the caller decides whether to retry.
pub async fn with_timeout<T, F>(operation: F) -> BotResult<T>
where
    F: Future<Output = StoreResult<T>>,
{
    match tokio::time::timeout(Duration::from_secs(STORE_TIMEOUT_SECS), operation).await {
        Ok(result) => result.map_err(BotError::from),
        Err(_) => {
            tracing::warn!("Storage call timed out after {}s", STORE_TIMEOUT_SECS);
            Err(BotError::Timeout)
        }
    }
}

/// Build a media record from a document, video or audio message
///
/// Returns `None` for messages carrying any other kind of content. The
/// file's `unique_id` becomes the record key and the sendable file id is kept
/// as `file_ref`.
pub fn media_from_message(msg: &Message) -> Option<MediaRecord> {
    let (file_type, file, file_name, mime_type) = if let Some(document) = msg.document() {
        (
            FileType::Document,
            &document.file,
            document.file_name.clone(),
            document.mime_type.as_ref(),
        )
    } else if let Some(video) = msg.video() {
        (
            FileType::Video,
            &video.file,
            video.file_name.clone(),
            video.mime_type.as_ref(),
        )
    } else if let Some(audio) = msg.audio() {
        (
            FileType::Audio,
            &audio.file,
            audio.file_name.clone().or_else(|| audio.title.clone()),
            audio.mime_type.as_ref(),
        )
    } else {
        return None;
    };

    Some(MediaRecord {
        file_id: file.unique_id.clone(),
        file_ref: Some(file.id.clone()),
        file_name: file_name.unwrap_or_default(),
        file_size: file.size as i64,
        file_type: Some(file_type),
        mime_type: mime_type.map(ToString::to_string),
        caption: msg.caption().map(str::to_string),
    })
}

/// Short description shown under an inline search result
pub fn format_media_description(record: &MediaRecord) -> String {
    let mut description = format!("Size: {}", utils::format_bytes(record.file_size));
    if let Some(file_type) = record.file_type {
        description.push_str(&format!(", Type: {}", file_type));
    }
    if let Some(caption) = &record.caption {
        description.push('\n');
        description.push_str(&utils::truncate(caption, 100));
    }
    description
}

/// Text listing one page of a category's links
pub fn format_links(category: &str, links: &[LinkEntry]) -> String {
    let mut response = format!("Links in {}:\n\n", category);
    let lines: Vec<String> = links
        .iter()
        .map(|link| format!("{}: {}", link.name, link.link))
        .collect();
    response.push_str(&lines.join("\n"));
    response
}
