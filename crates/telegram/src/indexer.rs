//! Indexing of media posted in monitored channels and groups

use crate::error::BotError;
use crate::handlers::{self, with_timeout};
use crate::types::HandlerResult;
use store::SearchService;
use teloxide::prelude::*;

/// Save a document, video or audio message to the media index
pub async fn index_media(msg: Message, search: SearchService) -> HandlerResult {
    let record = match handlers::media_from_message(&msg) {
        Some(record) => record,
        None => return Ok(()),
    };

    match with_timeout(search.save(&record)).await {
        Ok(()) => {}
        Err(err) if err.is_duplicate() => {
            tracing::warn!("{} is already saved in database", record.file_name);
        }
        Err(BotError::StoreError(store::StoreError::Validation(reason))) => {
            tracing::warn!("Skipping file from chat {}: {}", msg.chat.id.0, reason);
        }
        Err(err) => {
            tracing::error!("Error occurred while saving file in database: {}", err);
        }
    }

    Ok(())
}
