//! Stored record types and their pre-insert validation

use crate::error::{StoreError, StoreResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of media a record was indexed from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Document,
    Video,
    Audio,
}

impl FileType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileType::Document => "document",
            FileType::Video => "video",
            FileType::Audio => "audio",
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FileType {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "document" => Ok(FileType::Document),
            "video" => Ok(FileType::Video),
            "audio" => Ok(FileType::Audio),
            other => Err(StoreError::Validation(format!("unknown file type '{}'", other))),
        }
    }
}

/// Metadata of one indexed file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaRecord {
    /// Unique identifier, stored as the document primary key
    #[serde(rename = "_id")]
    pub file_id: String,
    /// Opaque reference used to resend the file
    #[serde(default)]
    pub file_ref: Option<String>,
    pub file_name: String,
    pub file_size: i64,
    #[serde(default)]
    pub file_type: Option<FileType>,
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub caption: Option<String>,
}

impl MediaRecord {
    /// Check required fields before the record is inserted
    pub fn validate(&self) -> StoreResult<()> {
        if self.file_id.trim().is_empty() {
            return Err(StoreError::Validation("file_id is required".to_string()));
        }
        if self.file_name.trim().is_empty() {
            return Err(StoreError::Validation("file_name is required".to_string()));
        }
        if self.file_size < 0 {
            return Err(StoreError::Validation(format!(
                "file_size must not be negative, got {}",
                self.file_size
            )));
        }
        Ok(())
    }

    /// Attribute tuple used by delete requests
    pub fn key(&self) -> MediaKey {
        MediaKey {
            file_name: self.file_name.clone(),
            file_size: self.file_size,
            file_type: self.file_type,
            mime_type: self.mime_type.clone(),
        }
    }
}

/// Attribute tuple identifying a file for deletion
///
/// This is not the primary key. When several records share all four values
/// the store removes a single one of them, chosen by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaKey {
    pub file_name: String,
    pub file_size: i64,
    pub file_type: Option<FileType>,
    pub mime_type: Option<String>,
}

impl MediaKey {
    pub fn matches(&self, record: &MediaRecord) -> bool {
        record.file_name == self.file_name
            && record.file_size == self.file_size
            && record.file_type == self.file_type
            && record.mime_type == self.mime_type
    }
}

/// One entry of the categorized link directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkEntry {
    pub name: String,
    /// De-duplication key
    pub link: String,
    pub category: String,
    #[serde(rename = "searchURL", default)]
    pub search_url: Option<String>,
}

impl LinkEntry {
    pub fn new(
        name: impl Into<String>,
        link: impl Into<String>,
        category: impl Into<String>,
        search_url: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            link: link.into(),
            category: category.into(),
            search_url,
        }
    }

    /// Check required fields before the entry is inserted
    pub fn validate(&self) -> StoreResult<()> {
        for (field, value) in [
            ("name", &self.name),
            ("link", &self.link),
            ("category", &self.category),
        ] {
            if value.trim().is_empty() {
                return Err(StoreError::Validation(format!("{} is required", field)));
            }
        }

        if self.link.chars().any(char::is_whitespace) {
            return Err(StoreError::Validation(
                "link must not contain whitespace".to_string(),
            ));
        }

        Ok(())
    }
}
