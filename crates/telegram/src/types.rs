use teloxide::macros::BotCommands;

/// Type alias for handler result types
pub type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// Available bot commands
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(
    rename_rule = "lowercase",
    description = "These commands are supported:"
)]
pub enum Command {
    #[command(description = "Start the bot")]
    Start(String),
    #[command(description = "Display help information")]
    Help,
    #[command(description = "List indexed channels (admin)")]
    Channel,
    #[command(description = "Show how many files are indexed (admin)")]
    Total,
    #[command(description = "Send the log file (admin)")]
    Logger,
    #[command(description = "Reply to a file to remove it from the index (admin)")]
    Delete,
    #[command(description = "Add a catalog link: category title url [searchURL] (admin)")]
    AddLink(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use teloxide::utils::command::BotCommands;

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            Command::parse("/start subscribe", "bot").unwrap(),
            Command::Start("subscribe".to_string())
        );
        assert_eq!(Command::parse("/total", "bot").unwrap(), Command::Total);
        assert_eq!(
            Command::parse("/addlink movies IMDb https://imdb.com", "bot").unwrap(),
            Command::AddLink("movies IMDb https://imdb.com".to_string())
        );
    }
}
