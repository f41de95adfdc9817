//! Callback query handlers for inline keyboard interactions
//!
//! Drives the link catalog browser: the category list and the paged links of
//! one category.

use crate::constants::{emoji, LINKS_PER_PAGE, MAX_CALLBACK_DATA_LEN};
use crate::error::UserMessage;
use crate::handlers::{self, with_timeout};
use crate::keyboards;
use crate::types::HandlerResult;
use store::CatalogService;
use teloxide::prelude::*;

/// Action encoded in a callback payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackAction {
    /// Show the category list
    Categories,
    /// Show one page of a category's links
    Links { category: String, page: u64 },
}

/// Decode a callback payload
pub fn parse_callback(data: &str) -> Option<CallbackAction> {
    if data == keyboards::CATEGORIES_CALLBACK {
        return Some(CallbackAction::Categories);
    }

    if let Some(category) = data.strip_prefix("category:") {
        return Some(CallbackAction::Links {
            category: category.to_string(),
            page: 0,
        });
    }

    let rest = data.strip_prefix("links:")?;
    let (page, category) = rest.split_once(':')?;
    Some(CallbackAction::Links {
        category: category.to_string(),
        page: page.parse().ok()?,
    })
}

/// Handle all callback queries from inline keyboards
pub async fn handle_callback(bot: Bot, q: CallbackQuery, catalog: CatalogService) -> HandlerResult {
    // Answer callback query to remove loading state
    bot.answer_callback_query(&q.id).await?;

    let data = match q.data {
        Some(ref data) => data,
        None => return Ok(()),
    };

    if data.len() > MAX_CALLBACK_DATA_LEN {
        tracing::warn!("Callback data too long: {} bytes", data.len());
        return Ok(());
    }

    let message = match q.message {
        Some(ref msg) => msg,
        None => return Ok(()),
    };

    match parse_callback(data) {
        Some(CallbackAction::Categories) => show_categories(&bot, message, &catalog).await?,
        Some(CallbackAction::Links { category, page }) => {
            show_links(&bot, message, &catalog, &category, page).await?
        }
        None => tracing::debug!("Ignoring unknown callback data: {}", data),
    }

    Ok(())
}

async fn show_categories(bot: &Bot, message: &Message, catalog: &CatalogService) -> HandlerResult {
    let categories = match with_timeout(catalog.list_categories()).await {
        Ok(categories) => categories,
        Err(err) => {
            tracing::error!("Failed to get categories: {}", err);
            bot.edit_message_text(message.chat.id, message.id, err.user_message())
                .await?;
            return Ok(());
        }
    };

    if categories.is_empty() {
        bot.edit_message_text(message.chat.id, message.id, "No categories found.")
            .await?;
        return Ok(());
    }

    bot.edit_message_text(message.chat.id, message.id, "Choose a category:")
        .reply_markup(keyboards::category_keyboard(&categories))
        .await?;
    Ok(())
}

async fn show_links(
    bot: &Bot,
    message: &Message,
    catalog: &CatalogService,
    category: &str,
    page: u64,
) -> HandlerResult {
    let skip = page.saturating_mul(LINKS_PER_PAGE);
    let links = match with_timeout(catalog.list_by_category(category, skip, LINKS_PER_PAGE)).await {
        Ok(links) => links,
        Err(err) => {
            bot.edit_message_text(
                message.chat.id,
                message.id,
                format!("{} Failed to load links: {}", emoji::ERROR, err),
            )
            .reply_markup(keyboards::links_keyboard(category, 0, false))
            .await?;
            return Ok(());
        }
    };

    if links.is_empty() {
        bot.edit_message_text(
            message.chat.id,
            message.id,
            format!("No links found in category: {}", category),
        )
        .reply_markup(keyboards::links_keyboard(category, page, false))
        .await?;
        return Ok(());
    }

    let has_next = links.len() as u64 == LINKS_PER_PAGE;
    bot.edit_message_text(message.chat.id, message.id, handlers::format_links(category, &links))
        .disable_web_page_preview(true)
        .reply_markup(keyboards::links_keyboard(category, page, has_next))
        .await?;
    Ok(())
}
