//! Admin commands (channel, total, logger, delete)

use crate::config::BotConfig;
use crate::constants::{emoji, usage, CHANNELS_FILE_NAME, MAX_MESSAGE_LEN};
use crate::error::UserMessage;
use crate::handlers::{self, with_timeout};
use crate::types::HandlerResult;
use std::sync::Arc;
use store::SearchService;
use teloxide::{prelude::*, types::InputFile};

/// Send basic information about the indexed channels
pub async fn channel_info(bot: Bot, msg: Message, config: Arc<BotConfig>) -> HandlerResult {
    let mut text = format!("{} Indexed channels/groups\n", emoji::CHANNELS);

    for channel in &config.channels {
        match bot.get_chat(channel.recipient()).await {
            Ok(chat) => {
                let label = match chat.username() {
                    Some(username) => format!("@{}", username),
                    None => chat
                        .title()
                        .or_else(|| chat.first_name())
                        .unwrap_or("Unknown")
                        .to_string(),
                };
                text.push('\n');
                text.push_str(&label);
            }
            Err(err) => {
                tracing::warn!("Failed to get chat {:?}: {}", channel, err);
                text.push_str(&format!("\n{:?} (unavailable)", channel));
            }
        }
    }

    text.push_str(&format!("\n\nTotal: {}", config.channels.len()));

    if text.chars().count() < MAX_MESSAGE_LEN {
        bot.send_message(msg.chat.id, text).await?;
    } else {
        let file = InputFile::memory(text.into_bytes()).file_name(CHANNELS_FILE_NAME);
        bot.send_document(msg.chat.id, file).await?;
    }
    Ok(())
}

/// Show total files in database
pub async fn total(bot: Bot, msg: Message, search: SearchService) -> HandlerResult {
    let status = bot
        .send_message(msg.chat.id, format!("Processing...{}", emoji::PROCESSING))
        .reply_to_message_id(msg.id)
        .await?;

    let text = match with_timeout(search.total()).await {
        Ok(total) => format!("{} Saved files: {}", emoji::FOLDER, total),
        Err(err) => {
            tracing::error!("Failed to check total files: {}", err);
            err.user_message()
        }
    };

    bot.edit_message_text(status.chat.id, status.id, text).await?;
    Ok(())
}

/// Send the log file
pub async fn log_file(bot: Bot, msg: Message, config: Arc<BotConfig>) -> HandlerResult {
    let document = InputFile::file(config.log_file.clone());
    if let Err(err) = bot.send_document(msg.chat.id, document).await {
        tracing::warn!("Failed to send log file {}: {}", config.log_file.display(), err);
        bot.send_message(msg.chat.id, err.to_string()).await?;
    }
    Ok(())
}

/// Delete the replied-to file from the index
pub async fn delete(bot: Bot, msg: Message, search: SearchService) -> HandlerResult {
    let reply = match msg.reply_to_message() {
        Some(reply) => reply,
        None => {
            bot.send_message(msg.chat.id, usage::DELETE)
                .reply_to_message_id(msg.id)
                .await?;
            return Ok(());
        }
    };

    let status = bot
        .send_message(msg.chat.id, format!("Processing...{}", emoji::PROCESSING))
        .reply_to_message_id(msg.id)
        .await?;

    let record = match handlers::media_from_message(reply) {
        Some(record) => record,
        None => {
            bot.edit_message_text(status.chat.id, status.id, "This is not supported file format")
                .await?;
            return Ok(());
        }
    };

    let text = match with_timeout(search.delete(&record.key())).await {
        Ok(true) => format!("{} File is successfully deleted from database", emoji::SUCCESS),
        Ok(false) => "File not found in database".to_string(),
        Err(err) => {
            tracing::error!("Failed to delete {}: {}", record.file_name, err);
            err.user_message()
        }
    };

    bot.edit_message_text(status.chat.id, status.id, text).await?;
    Ok(())
}
