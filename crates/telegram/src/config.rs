//! Bot configuration loaded from environment variables

use crate::constants::{messages, DEFAULT_CACHE_TIME, DEFAULT_LOG_FILE, DEFAULT_MAX_RESULTS};
use crate::error::{BotError, BotResult};
use std::path::PathBuf;
use std::str::FromStr;
use teloxide::types::{Chat, ChatId, Recipient, User};

/// A chat or user referenced by numeric id or by @username
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatRef {
    Id(i64),
    /// Username without the leading `@`
    Username(String),
}

impl FromStr for ChatRef {
    type Err = BotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(BotError::Config("empty chat reference".to_string()));
        }

        if let Ok(id) = s.parse::<i64>() {
            return Ok(ChatRef::Id(id));
        }

        let name = s.trim_start_matches('@');
        if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(BotError::Config(format!("invalid chat reference '{}'", s)));
        }
        Ok(ChatRef::Username(name.to_string()))
    }
}

impl ChatRef {
    /// Target usable with `get_chat`
    pub fn recipient(&self) -> Recipient {
        match self {
            ChatRef::Id(id) => Recipient::Id(ChatId(*id)),
            ChatRef::Username(name) => Recipient::ChannelUsername(format!("@{}", name)),
        }
    }

    pub fn matches_chat(&self, chat: &Chat) -> bool {
        match self {
            ChatRef::Id(id) => chat.id.0 == *id,
            ChatRef::Username(name) => chat
                .username()
                .is_some_and(|u| u.eq_ignore_ascii_case(name)),
        }
    }

    pub fn matches_user(&self, user: &User) -> bool {
        match self {
            ChatRef::Id(id) => i64::try_from(user.id.0).is_ok_and(|uid| uid == *id),
            ChatRef::Username(name) => user
                .username
                .as_deref()
                .is_some_and(|u| u.eq_ignore_ascii_case(name)),
        }
    }
}

/// Parse a whitespace separated list of chat references
pub fn parse_chat_list(value: &str) -> BotResult<Vec<ChatRef>> {
    value.split_whitespace().map(str::parse).collect()
}

/// Settings of the Telegram front end
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Users allowed to run admin commands
    pub admins: Vec<ChatRef>,
    /// Channels and groups whose media is indexed
    pub channels: Vec<ChatRef>,
    pub start_message: String,
    pub invite_message: String,
    /// File the logger writes to and /logger sends
    pub log_file: PathBuf,
    /// Seconds Telegram may cache inline results
    pub cache_time: u32,
    /// Inline results per page
    pub max_results: u64,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            admins: Vec::new(),
            channels: Vec::new(),
            start_message: messages::START.to_string(),
            invite_message: messages::INVITE.to_string(),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            cache_time: DEFAULT_CACHE_TIME,
            max_results: DEFAULT_MAX_RESULTS,
        }
    }
}

impl BotConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> BotResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> BotResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let parse_number = |key: &str| -> BotResult<Option<u64>> {
            lookup(key)
                .map(|v| {
                    v.trim()
                        .parse::<u64>()
                        .map_err(|_| BotError::Config(format!("{} must be a number", key)))
                })
                .transpose()
        };

        let cache_time = match parse_number("CACHE_TIME")? {
            Some(v) => u32::try_from(v)
                .map_err(|_| BotError::Config("CACHE_TIME is too large".to_string()))?,
            None => defaults.cache_time,
        };

        let max_results = parse_number("MAX_RESULTS")?.unwrap_or(defaults.max_results);
        if max_results == 0 || max_results > 50 {
            return Err(BotError::Config(
                "MAX_RESULTS must be between 1 and 50".to_string(),
            ));
        }

        Ok(Self {
            admins: parse_chat_list(&lookup("ADMINS").unwrap_or_default())?,
            channels: parse_chat_list(&lookup("CHANNELS").unwrap_or_default())?,
            start_message: lookup("START_MSG").unwrap_or(defaults.start_message),
            invite_message: lookup("INVITE_MSG").unwrap_or(defaults.invite_message),
            log_file: lookup("LOG_FILE").map(PathBuf::from).unwrap_or(defaults.log_file),
            cache_time,
            max_results,
        })
    }

    pub fn is_admin(&self, user: &User) -> bool {
        self.admins.iter().any(|admin| admin.matches_user(user))
    }

    pub fn is_indexed_chat(&self, chat: &Chat) -> bool {
        self.channels.iter().any(|channel| channel.matches_chat(chat))
    }
}
