//! Categorized link directory

use crate::backend::LinkStore;
use crate::error::StoreResult;
use crate::model::LinkEntry;
use std::collections::BTreeSet;
use std::sync::Arc;

/// Add and browse catalog links
#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn LinkStore>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn LinkStore>) -> Self {
        Self { store }
    }

    /// Add a link unless one with the same URL already exists
    ///
    /// # Errors
    /// `StoreError::Duplicate` when the link is already catalogued,
    /// `StoreError::Validation` for missing fields, `StoreError::Database`
    /// for storage faults
    pub async fn add_link(
        &self,
        name: &str,
        link: &str,
        category: &str,
        search_url: Option<&str>,
    ) -> StoreResult<()> {
        let entry = LinkEntry::new(name, link, category, search_url.map(str::to_string));
        entry.validate()?;

        match self.store.insert_link(&entry).await {
            Ok(()) => {
                tracing::info!("Link '{}' added to category '{}'", entry.name, entry.category);
                Ok(())
            }
            Err(e) => {
                if e.is_duplicate() {
                    tracing::warn!("Link '{}' already exists in the database", entry.link);
                } else {
                    tracing::error!("Error adding link: {}", e);
                }
                Err(e)
            }
        }
    }

    /// Every category currently in use
    pub async fn list_categories(&self) -> StoreResult<BTreeSet<String>> {
        Ok(self.store.distinct_categories().await?.into_iter().collect())
    }

    /// One slice of a category's links in storage order
    ///
    /// At most `limit` entries are returned; a zero limit returns none.
    pub async fn list_by_category(
        &self,
        category: &str,
        skip: u64,
        limit: u64,
    ) -> StoreResult<Vec<LinkEntry>> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        self.store
            .links_by_category(category, skip, limit)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get links by category: {}", e);
                e
            })
    }
}
