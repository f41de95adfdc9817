//! Storage traits the services are written against

use crate::error::StoreResult;
use crate::model::{LinkEntry, MediaKey, MediaRecord};
use crate::query::MediaFilter;
use async_trait::async_trait;

/// Collection of indexed media files
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Insert a record, rejecting an existing `file_id` with `StoreError::Duplicate`
    async fn insert_media(&self, record: &MediaRecord) -> StoreResult<()>;

    /// Number of records matching the filter
    async fn count_media(&self, filter: &MediaFilter) -> StoreResult<u64>;

    /// Matching records, most recently inserted first
    async fn find_media(
        &self,
        filter: &MediaFilter,
        skip: u64,
        limit: u64,
    ) -> StoreResult<Vec<MediaRecord>>;

    /// Number of records in the collection
    async fn count_all_media(&self) -> StoreResult<u64>;

    /// Delete one record matching the key, returns whether anything was deleted
    async fn delete_media(&self, key: &MediaKey) -> StoreResult<bool>;
}

/// Collection of catalog links
#[async_trait]
pub trait LinkStore: Send + Sync {
    /// Insert an entry, rejecting an existing `link` with `StoreError::Duplicate`
    async fn insert_link(&self, entry: &LinkEntry) -> StoreResult<()>;

    /// Every distinct category value
    async fn distinct_categories(&self) -> StoreResult<Vec<String>>;

    /// Entries of one category in storage order
    async fn links_by_category(
        &self,
        category: &str,
        skip: u64,
        limit: u64,
    ) -> StoreResult<Vec<LinkEntry>>;
}
