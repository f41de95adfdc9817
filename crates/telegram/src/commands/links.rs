//! Link catalog commands

use crate::constants::{emoji, usage, MAX_CATEGORY_LEN};
use crate::error::{BotError, UserMessage};
use crate::handlers::with_timeout;
use crate::types::HandlerResult;
use crate::utils;
use store::CatalogService;
use teloxide::prelude::*;

/// Arguments of `/addlink category title url [searchURL]`
#[derive(Debug, PartialEq, Eq)]
pub struct AddLinkArgs<'a> {
    pub category: &'a str,
    pub title: &'a str,
    pub url: &'a str,
    pub search_url: Option<&'a str>,
}

/// Parse `/addlink` arguments
pub fn parse_add_link(args: &str) -> Result<AddLinkArgs<'_>, BotError> {
    let args = utils::parse_args(args);

    let (category, title, url, search_url) = match args.as_slice() {
        [category, title, url] => (*category, *title, *url, None),
        [category, title, url, search_url] => (*category, *title, *url, Some(*search_url)),
        _ => return Err(BotError::InvalidArguments(usage::ADDLINK.to_string())),
    };

    if category.len() > MAX_CATEGORY_LEN {
        return Err(BotError::InvalidArguments(format!(
            "Category name must be at most {} bytes",
            MAX_CATEGORY_LEN
        )));
    }

    Ok(AddLinkArgs {
        category,
        title,
        url,
        search_url,
    })
}

/// Add a new link to the catalog
pub async fn add_link(bot: Bot, msg: Message, catalog: CatalogService, args: String) -> HandlerResult {
    let parsed = match parse_add_link(&args) {
        Ok(parsed) => parsed,
        Err(err) => {
            bot.send_message(msg.chat.id, err.user_message()).await?;
            return Ok(());
        }
    };

    let result = with_timeout(catalog.add_link(
        parsed.title,
        parsed.url,
        parsed.category,
        parsed.search_url,
    ))
    .await;

    let reply = match result {
        Ok(()) => {
            let mut reply = format!(
                "{} Link added to category '{}' with title '{}'.",
                emoji::SUCCESS,
                parsed.category,
                parsed.title
            );
            if let Some(search_url) = parsed.search_url {
                reply.push_str(&format!("\n{} Search URL: {}", emoji::SEARCH, search_url));
            }
            reply
        }
        Err(err) if err.is_duplicate() => {
            format!("{} Link '{}' already exists in the database.", emoji::ERROR, parsed.title)
        }
        Err(BotError::StoreError(store::StoreError::Validation(reason))) => {
            format!("{} Invalid link: {}", emoji::ERROR, reason)
        }
        Err(_) => format!("{} Failed to add the link. Please try again.", emoji::ERROR),
    };

    bot.send_message(msg.chat.id, reply)
        .disable_web_page_preview(true)
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_add_link() {
        assert_eq!(
            parse_add_link("movies IMDb https://imdb.com").unwrap(),
            AddLinkArgs {
                category: "movies",
                title: "IMDb",
                url: "https://imdb.com",
                search_url: None,
            }
        );

        let parsed = parse_add_link("movies IMDb https://imdb.com https://imdb.com/find?q=").unwrap();
        assert_eq!(parsed.search_url, Some("https://imdb.com/find?q="));
    }

    #[test]
    fn test_parse_add_link_usage() {
        assert!(matches!(parse_add_link(""), Err(BotError::InvalidArguments(_))));
        assert!(matches!(parse_add_link("movies IMDb"), Err(BotError::InvalidArguments(_))));
        assert!(parse_add_link("a b c d e").is_err());
    }

    #[test]
    fn test_parse_add_link_long_category() {
        let args = format!("{} title http://x", "c".repeat(MAX_CATEGORY_LEN + 1));
        assert!(parse_add_link(&args).is_err());
    }
}
