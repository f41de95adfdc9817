//! MongoDB backend
//!
//! Wraps the two collections of the bot. Uniqueness of `file_id` comes from
//! the `_id` primary key and uniqueness of `link` from a unique index created
//! at startup, so duplicate inserts are rejected by the server. When that
//! index cannot be built (for example because the collection already holds a
//! duplicate link) inserts fall back to looking the link up first.

use crate::backend::{LinkStore, MediaStore};
use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};
use crate::model::{LinkEntry, MediaKey, MediaRecord};
use crate::query::MediaFilter;
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, Bson, Document, Regex};
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::{FindOptions, IndexOptions};
use mongodb::{Client, Collection, Database, IndexModel};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Server error code for a unique index violation
const DUPLICATE_KEY_CODE: i32 = 11000;

/// Store backed by a MongoDB database
#[derive(Debug, Clone)]
pub struct MongoStore {
    media: Collection<MediaRecord>,
    links: Collection<LinkEntry>,
    /// Set once the unique `link` index is known to exist
    link_index_ready: Arc<AtomicBool>,
}

impl MongoStore {
    /// Connect to the database and make sure the required indexes exist
    ///
    /// # Errors
    /// Returns an error if the connection string is invalid or the server
    /// does not answer a ping
    pub async fn connect(config: &StoreConfig) -> StoreResult<Self> {
        let client = Client::with_uri_str(&config.database_uri).await?;
        let database = client.database(&config.database_name);

        database.run_command(doc! { "ping": 1 }, None).await.map_err(|e| {
            tracing::error!("Failed to reach MongoDB: {}", e);
            StoreError::from(e)
        })?;

        tracing::info!(
            "Connected to MongoDB database '{}' (files: '{}', links: '{}')",
            config.database_name,
            config.collection_name,
            config.links_collection
        );

        let store = Self::with_database(&database, config);
        store.ensure_indexes().await;
        Ok(store)
    }

    fn with_database(database: &Database, config: &StoreConfig) -> Self {
        Self {
            media: database.collection(&config.collection_name),
            links: database.collection(&config.links_collection),
            link_index_ready: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Create the file name text index and the unique link index
    ///
    /// Failures are logged and not fatal. Without the unique index, link
    /// inserts are preceded by a lookup, which still lets two concurrent
    /// inserts of the same link both succeed.
    pub async fn ensure_indexes(&self) {
        let file_name_index = IndexModel::builder()
            .keys(doc! { "file_name": "text" })
            .build();
        if let Err(e) = self.media.create_index(file_name_index, None).await {
            tracing::warn!("Could not create file_name index: {}", e);
        }

        let link_index = IndexModel::builder()
            .keys(doc! { "link": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        match self.links.create_index(link_index, None).await {
            Ok(_) => self.link_index_ready.store(true, Ordering::Release),
            Err(e) => tracing::warn!(
                "Could not create unique link index, checking links before insert: {}",
                e
            ),
        }
    }

    /// Whether duplicate links are rejected by the unique index
    pub fn has_link_index(&self) -> bool {
        self.link_index_ready.load(Ordering::Acquire)
    }

    /// Filter for the lookup that must precede an insert, if any
    fn link_lookup(&self, entry: &LinkEntry) -> Option<Document> {
        if self.has_link_index() {
            None
        } else {
            Some(doc! { "link": entry.link.as_str() })
        }
    }
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(e)) if e.code == DUPLICATE_KEY_CODE
    )
}

fn media_filter_document(filter: &MediaFilter) -> Document {
    let regex = Bson::RegularExpression(Regex {
        pattern: filter.pattern.as_str().to_string(),
        options: "i".to_string(),
    });

    let mut document = if filter.include_caption {
        doc! { "$or": [ { "file_name": regex.clone() }, { "caption": regex } ] }
    } else {
        doc! { "file_name": regex }
    };

    if let Some(file_type) = filter.file_type {
        document.insert("file_type", file_type.as_str());
    }

    document
}

fn media_key_document(key: &MediaKey) -> Document {
    doc! {
        "file_name": key.file_name.as_str(),
        "file_size": key.file_size,
        "file_type": key.file_type.map(|t| t.as_str()),
        "mime_type": key.mime_type.as_deref(),
    }
}

fn page_options(skip: u64, limit: u64, sort: Option<Document>) -> FindOptions {
    let mut options = FindOptions::default();
    options.sort = sort;
    options.skip = Some(skip);
    options.limit = Some(i64::try_from(limit).unwrap_or(i64::MAX));
    options
}

#[async_trait]
impl MediaStore for MongoStore {
    async fn insert_media(&self, record: &MediaRecord) -> StoreResult<()> {
        match self.media.insert_one(record, None).await {
            Ok(_) => Ok(()),
            Err(e) if is_duplicate_key(&e) => Err(StoreError::Duplicate(record.file_id.clone())),
            Err(e) => Err(e.into()),
        }
    }

    async fn count_media(&self, filter: &MediaFilter) -> StoreResult<u64> {
        Ok(self
            .media
            .count_documents(media_filter_document(filter), None)
            .await?)
    }

    async fn find_media(
        &self,
        filter: &MediaFilter,
        skip: u64,
        limit: u64,
    ) -> StoreResult<Vec<MediaRecord>> {
        let options = page_options(skip, limit, Some(doc! { "$natural": -1 }));
        let cursor = self
            .media
            .find(media_filter_document(filter), options)
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn count_all_media(&self) -> StoreResult<u64> {
        Ok(self.media.count_documents(None, None).await?)
    }

    async fn delete_media(&self, key: &MediaKey) -> StoreResult<bool> {
        let result = self
            .media
            .delete_one(media_key_document(key), None)
            .await?;
        Ok(result.deleted_count > 0)
    }
}

#[async_trait]
impl LinkStore for MongoStore {
    async fn insert_link(&self, entry: &LinkEntry) -> StoreResult<()> {
        if let Some(existing) = self.link_lookup(entry) {
            if self.links.find_one(existing, None).await?.is_some() {
                return Err(StoreError::Duplicate(entry.link.clone()));
            }
        }

        match self.links.insert_one(entry, None).await {
            Ok(_) => Ok(()),
            Err(e) if is_duplicate_key(&e) => Err(StoreError::Duplicate(entry.link.clone())),
            Err(e) => Err(e.into()),
        }
    }

    async fn distinct_categories(&self) -> StoreResult<Vec<String>> {
        let values = self.links.distinct("category", None, None).await?;
        Ok(values
            .into_iter()
            .filter_map(|value| match value {
                Bson::String(category) => Some(category),
                _ => None,
            })
            .collect())
    }

    async fn links_by_category(
        &self,
        category: &str,
        skip: u64,
        limit: u64,
    ) -> StoreResult<Vec<LinkEntry>> {
        let cursor = self
            .links
            .find(doc! { "category": category }, page_options(skip, limit, None))
            .await?;
        Ok(cursor.try_collect().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FileType;
    use crate::query::{build_pattern, compile_pattern};

    #[test]
    fn test_filter_document_name_only() {
        let filter = MediaFilter::new(compile_pattern(&build_pattern("movie")).unwrap(), false, None);
        let document = media_filter_document(&filter);

        match document.get("file_name") {
            Some(Bson::RegularExpression(regex)) => {
                assert_eq!(regex.pattern, build_pattern("movie"));
                assert_eq!(regex.options, "i");
            }
            other => panic!("unexpected file_name filter: {:?}", other),
        }
        assert!(!document.contains_key("$or"));
        assert!(!document.contains_key("file_type"));
    }

    #[test]
    fn test_filter_document_caption_and_type() {
        let filter = MediaFilter::new(
            compile_pattern(&build_pattern("live")).unwrap(),
            true,
            Some(FileType::Audio),
        );
        let document = media_filter_document(&filter);

        assert_eq!(document.get_array("$or").unwrap().len(), 2);
        assert_eq!(document.get_str("file_type").unwrap(), "audio");
    }

    #[test]
    fn test_key_document_nulls() {
        let key = MediaKey {
            file_name: "a.pdf".to_string(),
            file_size: 42,
            file_type: Some(FileType::Document),
            mime_type: None,
        };
        let document = media_key_document(&key);

        assert_eq!(document.get_i64("file_size").unwrap(), 42);
        assert_eq!(document.get_str("file_type").unwrap(), "document");
        assert_eq!(document.get("mime_type"), Some(&Bson::Null));
    }

    #[tokio::test]
    async fn test_link_lookup_until_index_confirmed() {
        let client = Client::with_uri_str("mongodb://localhost:27017").await.unwrap();
        let config = StoreConfig {
            database_uri: "mongodb://localhost:27017".to_string(),
            database_name: "mediabot_test".to_string(),
            collection_name: "files".to_string(),
            links_collection: "links".to_string(),
            use_caption_filter: false,
        };
        let store = MongoStore::with_database(&client.database(&config.database_name), &config);

        let entry = LinkEntry::new("A2", "http://x", "cat1", None);

        // Until the unique index is confirmed, link inserts look the link up first.
        assert!(!store.has_link_index());
        assert_eq!(store.link_lookup(&entry), Some(doc! { "link": "http://x" }));

        let clone = store.clone();
        store.link_index_ready.store(true, Ordering::Release);
        assert!(clone.has_link_index());
        assert_eq!(clone.link_lookup(&entry), None);
    }

    #[test]
    fn test_page_options() {
        let options = page_options(20, 10, None);
        assert_eq!(options.skip, Some(20));
        assert_eq!(options.limit, Some(10));
        assert!(options.sort.is_none());
    }
}
