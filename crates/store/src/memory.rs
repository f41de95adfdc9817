//! In-process store
//!
//! Keeps both collections in vectors behind an async lock. Insertion order is
//! preserved, so "storage order" and "most recent first" behave as they do
//! against MongoDB.

use crate::backend::{LinkStore, MediaStore};
use crate::error::{StoreError, StoreResult};
use crate::model::{LinkEntry, MediaKey, MediaRecord};
use crate::query::MediaFilter;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct Collections {
    media: Vec<MediaRecord>,
    links: Vec<LinkEntry>,
}

/// Store backed by process memory
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Collections>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn page<T: Clone>(items: impl Iterator<Item = T>, skip: u64, limit: u64) -> Vec<T> {
    items
        .skip(usize::try_from(skip).unwrap_or(usize::MAX))
        .take(usize::try_from(limit).unwrap_or(usize::MAX))
        .collect()
}

#[async_trait]
impl MediaStore for MemoryStore {
    async fn insert_media(&self, record: &MediaRecord) -> StoreResult<()> {
        let mut inner = self.inner.write().await;
        if inner.media.iter().any(|r| r.file_id == record.file_id) {
            return Err(StoreError::Duplicate(record.file_id.clone()));
        }
        inner.media.push(record.clone());
        Ok(())
    }

    async fn count_media(&self, filter: &MediaFilter) -> StoreResult<u64> {
        let inner = self.inner.read().await;
        Ok(inner.media.iter().filter(|r| filter.matches(r)).count() as u64)
    }

    async fn find_media(
        &self,
        filter: &MediaFilter,
        skip: u64,
        limit: u64,
    ) -> StoreResult<Vec<MediaRecord>> {
        let inner = self.inner.read().await;
        let matching = inner.media.iter().rev().filter(|r| filter.matches(r)).cloned();
        Ok(page(matching, skip, limit))
    }

    async fn count_all_media(&self) -> StoreResult<u64> {
        Ok(self.inner.read().await.media.len() as u64)
    }

    async fn delete_media(&self, key: &MediaKey) -> StoreResult<bool> {
        let mut inner = self.inner.write().await;
        match inner.media.iter().position(|r| key.matches(r)) {
            Some(index) => {
                inner.media.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[async_trait]
impl LinkStore for MemoryStore {
    async fn insert_link(&self, entry: &LinkEntry) -> StoreResult<()> {
        let mut inner = self.inner.write().await;
        if inner.links.iter().any(|l| l.link == entry.link) {
            return Err(StoreError::Duplicate(entry.link.clone()));
        }
        inner.links.push(entry.clone());
        Ok(())
    }

    async fn distinct_categories(&self) -> StoreResult<Vec<String>> {
        let inner = self.inner.read().await;
        let mut categories: Vec<String> = Vec::new();
        for entry in &inner.links {
            if !categories.contains(&entry.category) {
                categories.push(entry.category.clone());
            }
        }
        Ok(categories)
    }

    async fn links_by_category(
        &self,
        category: &str,
        skip: u64,
        limit: u64,
    ) -> StoreResult<Vec<LinkEntry>> {
        let inner = self.inner.read().await;
        let matching = inner.links.iter().filter(|l| l.category == category).cloned();
        Ok(page(matching, skip, limit))
    }
}
