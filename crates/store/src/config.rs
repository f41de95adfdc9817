//! Storage configuration loaded from environment variables

use crate::error::{StoreError, StoreResult};

/// Default name of the media collection
pub const DEFAULT_COLLECTION_NAME: &str = "Telegram_files";

/// Default name of the link catalog collection
pub const DEFAULT_LINKS_COLLECTION: &str = "links";

/// Connection and collection settings for the document store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// MongoDB connection string
    pub database_uri: String,
    /// Database holding both collections
    pub database_name: String,
    /// Collection of indexed media files
    pub collection_name: String,
    /// Collection of catalog links
    pub links_collection: String,
    /// Match search queries against captions as well as file names
    pub use_caption_filter: bool,
}

impl StoreConfig {
    /// Load configuration from the process environment
    ///
    /// # Errors
    /// Returns `StoreError::Config` if `DATABASE_URI` or `DATABASE_NAME` is missing
    pub fn from_env() -> StoreResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> StoreResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| StoreError::Config(format!("{} must be set in .env file", key)))
        };

        Ok(Self {
            database_uri: required("DATABASE_URI")?,
            database_name: required("DATABASE_NAME")?,
            collection_name: lookup("COLLECTION_NAME")
                .unwrap_or_else(|| DEFAULT_COLLECTION_NAME.to_string()),
            links_collection: lookup("LINKS_COLLECTION")
                .unwrap_or_else(|| DEFAULT_LINKS_COLLECTION.to_string()),
            use_caption_filter: lookup("USE_CAPTION_FILTER")
                .map(|v| parse_bool(&v))
                .unwrap_or(false),
        })
    }
}

/// Interpret common truthy spellings
pub fn parse_bool(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
