//! Basic bot commands (start, help)

use crate::config::BotConfig;
use crate::keyboards;
use crate::types::{Command, HandlerResult};
use std::sync::Arc;
use teloxide::{prelude::*, utils::command::BotCommands};

/// Welcome message, or the invite text when started with `subscribe`
pub async fn start(bot: Bot, msg: Message, config: Arc<BotConfig>, param: String) -> HandlerResult {
    if param.trim() == "subscribe" {
        bot.send_message(msg.chat.id, config.invite_message.clone())
            .await?;
        return Ok(());
    }

    bot.send_message(msg.chat.id, config.start_message.clone())
        .reply_markup(keyboards::start_keyboard())
        .await?;
    Ok(())
}

/// Display help message with available commands
pub async fn help(bot: Bot, msg: Message) -> HandlerResult {
    bot.send_message(msg.chat.id, Command::descriptions().to_string())
        .await?;
    Ok(())
}

/// Handle messages nothing else claimed
pub async fn invalid_state(bot: Bot, msg: Message) -> HandlerResult {
    bot.send_message(
        msg.chat.id,
        "Unable to handle the message. Type /help to see the usage.",
    )
    .await?;
    Ok(())
}
