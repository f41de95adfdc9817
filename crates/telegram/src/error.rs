use std::fmt;

/// Custom error type for telegram bot operations
#[derive(Debug)]
pub enum BotError {
    /// Telegram API error
    TelegramError(teloxide::RequestError),
    /// Media index or link catalog error
    StoreError(store::StoreError),
    /// Storage call did not finish in time
    Timeout,
    /// Invalid command arguments
    InvalidArguments(String),
    /// Missing or malformed configuration
    Config(String),
}

impl fmt::Display for BotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BotError::TelegramError(e) => write!(f, "Telegram error: {}", e),
            BotError::StoreError(e) => write!(f, "Storage error: {}", e),
            BotError::Timeout => write!(f, "Storage request timed out"),
            BotError::InvalidArguments(msg) => write!(f, "Invalid arguments: {}", msg),
            BotError::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for BotError {}

impl From<teloxide::RequestError> for BotError {
    fn from(err: teloxide::RequestError) -> Self {
        BotError::TelegramError(err)
    }
}

impl From<store::StoreError> for BotError {
    fn from(err: store::StoreError) -> Self {
        BotError::StoreError(err)
    }
}

impl BotError {
    /// Whether the underlying store rejected a duplicate insert
    pub fn is_duplicate(&self) -> bool {
        matches!(self, BotError::StoreError(e) if e.is_duplicate())
    }
}

/// Result type alias for bot operations
pub type BotResult<T> = Result<T, BotError>;

/// Helper trait to convert results into user-friendly messages
pub trait UserMessage {
    fn user_message(&self) -> String;
}

impl UserMessage for BotError {
    fn user_message(&self) -> String {
        match self {
            BotError::TelegramError(e) => format!("❌ Communication error: {}", e),
            BotError::StoreError(store::StoreError::Duplicate(key)) => {
                format!("❌ {} already exists in the database.", key)
            }
            BotError::StoreError(store::StoreError::Validation(msg)) => format!("❌ {}", msg),
            BotError::StoreError(_) => "❌ Database error, please try again later.".to_string(),
            BotError::Timeout => "❌ The database is not responding, please try again.".to_string(),
            BotError::InvalidArguments(msg) => format!("❌ {}", msg),
            BotError::Config(msg) => format!("❌ {}", msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_user_message() {
        let err = BotError::from(store::StoreError::Duplicate("http://x".to_string()));
        assert!(err.is_duplicate());
        assert_eq!(err.user_message(), "❌ http://x already exists in the database.");
    }

    #[test]
    fn test_timeout_is_not_duplicate() {
        assert!(!BotError::Timeout.is_duplicate());
        assert!(BotError::Timeout.user_message().starts_with("❌"));
    }
}
