use std::fmt;

/// Errors raised by the storage layer and the services built on it
#[derive(Debug)]
pub enum StoreError {
    /// Record failed validation before insert
    Validation(String),
    /// Insert rejected because the unique key already exists
    Duplicate(String),
    /// Underlying database driver error
    Database(mongodb::error::Error),
    /// Missing or malformed configuration
    Config(String),
}

impl StoreError {
    /// Whether this error is a rejected duplicate insert
    pub fn is_duplicate(&self) -> bool {
        matches!(self, StoreError::Duplicate(_))
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Validation(msg) => write!(f, "Invalid record: {}", msg),
            StoreError::Duplicate(key) => write!(f, "Duplicate entry: {}", key),
            StoreError::Database(e) => write!(f, "Database error: {}", e),
            StoreError::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Database(e) => Some(e),
            _ => None,
        }
    }
}

impl From<mongodb::error::Error> for StoreError {
    fn from(err: mongodb::error::Error) -> Self {
        StoreError::Database(err)
    }
}

/// Result type alias for storage operations
pub type StoreResult<T> = Result<T, StoreError>;
