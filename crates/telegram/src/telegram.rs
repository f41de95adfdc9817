use crate::config::BotConfig;
use crate::types::Command;
use crate::{callbacks, commands, indexer, inline};
use std::sync::Arc;
use teloxide::{dispatching::UpdateHandler, prelude::*, utils::command::BotCommands};

/// Register bot commands in Telegram menu
pub async fn set_bot_commands(bot: &Bot) -> Result<(), teloxide::RequestError> {
    bot.set_my_commands(Command::bot_commands()).await?;
    Ok(())
}

fn is_admin(msg: Message, config: Arc<BotConfig>) -> bool {
    msg.from().is_some_and(|user| config.is_admin(user))
}

fn is_indexed_chat(msg: Message, config: Arc<BotConfig>) -> bool {
    config.is_indexed_chat(&msg.chat)
}

/// Update handler tree
///
/// Expects `Arc<BotConfig>`, `SearchService` and `CatalogService` in the
/// dispatcher dependencies.
pub fn schema() -> UpdateHandler<Box<dyn std::error::Error + Send + Sync + 'static>> {
    use dptree::case;

    let admin_commands = dptree::filter(is_admin)
        .branch(case![Command::Channel].endpoint(commands::channel_info))
        .branch(case![Command::Total].endpoint(commands::total))
        .branch(case![Command::Logger].endpoint(commands::log_file))
        .branch(case![Command::Delete].endpoint(commands::delete))
        .branch(case![Command::AddLink(args)].endpoint(commands::add_link));

    let command_handler = teloxide::filter_command::<Command, _>()
        .branch(case![Command::Start(param)].endpoint(commands::start))
        .branch(case![Command::Help].endpoint(commands::help))
        .branch(admin_commands);

    let message_handler = Update::filter_message()
        .branch(command_handler)
        .branch(dptree::filter(is_indexed_chat).endpoint(indexer::index_media))
        .branch(
            dptree::filter(|msg: Message| msg.chat.is_private())
                .endpoint(commands::invalid_state),
        );

    let channel_handler = Update::filter_channel_post()
        .branch(dptree::filter(is_indexed_chat).endpoint(indexer::index_media));

    let inline_handler = Update::filter_inline_query().endpoint(inline::answer_query);

    // Handle callback queries from inline keyboards
    let callback_handler = Update::filter_callback_query().endpoint(callbacks::handle_callback);

    dptree::entry()
        .branch(message_handler)
        .branch(channel_handler)
        .branch(inline_handler)
        .branch(callback_handler)
}
