//! Constants used throughout the telegram bot

/// Links shown per page of a category listing
pub const LINKS_PER_PAGE: u64 = 10;

/// Telegram limit on inline button callback data
pub const MAX_CALLBACK_DATA_LEN: usize = 64;

/// Longest category name accepted by /addlink, keeps every callback payload under the limit
pub const MAX_CATEGORY_LEN: usize = 48;

/// Telegram limit on message text length
pub const MAX_MESSAGE_LEN: usize = 4096;

/// Seconds to wait for a storage call before giving up
pub const STORE_TIMEOUT_SECS: u64 = 10;

/// Seconds Telegram may cache inline query results
pub const DEFAULT_CACHE_TIME: u32 = 300;

/// Inline search page size
pub const DEFAULT_MAX_RESULTS: u64 = 10;

/// Log file sent by /logger
pub const DEFAULT_LOG_FILE: &str = "TelegramBot.log";

/// File name used when the channel list is too long for a message
pub const CHANNELS_FILE_NAME: &str = "Indexed channels.txt";

/// Start parameter used by the "no results" inline button
pub const NO_RESULTS_PARAMETER: &str = "okay";

/// Emoji constants for consistent UI
pub mod emoji {
    pub const SUCCESS: &str = "✅";
    pub const ERROR: &str = "❌";
    pub const FOLDER: &str = "📁";
    pub const CHANNELS: &str = "📑";
    pub const SEARCH: &str = "🔍";
    pub const PROCESSING: &str = "⏳";
}

/// Usage messages for commands
pub mod usage {
    pub const ADDLINK: &str = "Usage: /addlink category title url [searchURL]";
    pub const DELETE: &str = "Reply to file with /delete which you want to delete";
}

/// Default texts used when the environment does not provide one
pub mod messages {
    pub const SEARCH_UNAVAILABLE: &str = "Search is unavailable, try again";
    pub const START: &str = "Hi! I can search the files indexed from my channels.\n\n\
        Use the buttons below to search right here, search inline in any chat, \
        or browse the link catalog.";
    pub const INVITE: &str = "Please join my channel to use this bot.";
}
