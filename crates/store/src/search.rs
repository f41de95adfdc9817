//! Media search and indexing service

use crate::backend::MediaStore;
use crate::error::StoreResult;
use crate::model::{MediaKey, MediaRecord};
use crate::query::{self, MediaFilter, SearchPage, SearchQuery};
use std::sync::Arc;

/// Search, index and delete media records
#[derive(Clone)]
pub struct SearchService {
    store: Arc<dyn MediaStore>,
    use_caption_filter: bool,
}

impl SearchService {
    pub fn new(store: Arc<dyn MediaStore>, use_caption_filter: bool) -> Self {
        Self {
            store,
            use_caption_filter,
        }
    }

    /// Find one page of records matching a free-text query
    ///
    /// A query that does not compile to a valid pattern yields an empty page,
    /// as does a page size of zero.
    /// Storage failures are returned as errors.
    pub async fn search(&self, request: &SearchQuery) -> StoreResult<SearchPage> {
        if request.max_results == 0 {
            return Ok(SearchPage::empty());
        }

        let raw_pattern = query::build_pattern(&request.text);
        let pattern = match query::compile_pattern(&raw_pattern) {
            Ok(pattern) => pattern,
            Err(e) => {
                tracing::debug!("Ignoring malformed query {:?}: {}", request.text, e);
                return Ok(SearchPage::empty());
            }
        };

        let filter = MediaFilter::new(pattern, self.use_caption_filter, request.file_type);

        let total = self.store.count_media(&filter).await?;
        let results = self
            .store
            .find_media(&filter, request.offset, request.max_results)
            .await?;

        Ok(SearchPage {
            results,
            next_offset: query::next_offset(request.offset, request.max_results, total),
        })
    }

    /// Validate and index a new record
    ///
    /// # Errors
    /// `StoreError::Validation` for an incomplete record,
    /// `StoreError::Duplicate` if the file is already indexed
    pub async fn save(&self, record: &MediaRecord) -> StoreResult<()> {
        record.validate()?;
        self.store.insert_media(record).await?;
        tracing::info!("{} is saved in database", record.file_name);
        Ok(())
    }

    /// Number of indexed files
    pub async fn total(&self) -> StoreResult<u64> {
        self.store.count_all_media().await
    }

    /// Delete one file matching the attribute tuple
    pub async fn delete(&self, key: &MediaKey) -> StoreResult<bool> {
        let deleted = self.store.delete_media(key).await?;
        if deleted {
            tracing::info!("{} is deleted from database", key.file_name);
        }
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::memory::MemoryStore;
    use crate::model::FileType;

    fn record(id: usize, name: &str, file_type: FileType) -> MediaRecord {
        MediaRecord {
            file_id: format!("file{}", id),
            file_ref: Some(format!("ref{}", id)),
            file_name: name.to_string(),
            file_size: 1024,
            file_type: Some(file_type),
            mime_type: None,
            caption: None,
        }
    }

    async fn service_with(names: &[&str]) -> SearchService {
        let service = SearchService::new(Arc::new(MemoryStore::new()), false);
        for (i, name) in names.iter().enumerate() {
            service
                .save(&record(i, name, FileType::Document))
                .await
                .unwrap();
        }
        service
    }

    #[tokio::test]
    async fn test_empty_query_pages_newest_first() {
        let names: Vec<String> = (0..15).map(|i| format!("file{}.pdf", i)).collect();
        let names: Vec<&str> = names.iter().map(String::as_str).collect();
        let service = service_with(&names).await;

        let page = service.search(&SearchQuery::new("")).await.unwrap();
        assert_eq!(page.results.len(), 10);
        assert_eq!(page.results[0].file_name, "file14.pdf");
        assert_eq!(page.next_offset, Some(10));

        let page = service
            .search(&SearchQuery::new("").offset(10))
            .await
            .unwrap();
        assert_eq!(page.results.len(), 5);
        assert_eq!(page.results[4].file_name, "file0.pdf");
        assert_eq!(page.next_offset, None);
    }

    #[tokio::test]
    async fn test_exactly_one_page() {
        let names: Vec<String> = (0..10).map(|i| format!("doc{}.pdf", i)).collect();
        let names: Vec<&str> = names.iter().map(String::as_str).collect();
        let service = service_with(&names).await;

        let page = service.search(&SearchQuery::new("")).await.unwrap();
        assert_eq!(page.results.len(), 10);
        assert_eq!(page.next_offset, None);
    }

    #[tokio::test]
    async fn test_no_match_is_empty() {
        let service = service_with(&["Some.Movie.mkv"]).await;
        let page = service
            .search(&SearchQuery::new("zz_no_such_token"))
            .await
            .unwrap();
        assert!(page.results.is_empty());
        assert_eq!(page.next_offset_token(), "");
    }

    #[tokio::test]
    async fn test_malformed_query_is_empty() {
        let service = service_with(&["Some.Movie.mkv"]).await;
        let page = service.search(&SearchQuery::new("movie(")).await.unwrap();
        assert_eq!(page, SearchPage::empty());
    }

    #[tokio::test]
    async fn test_token_and_multi_word_matching() {
        let service = service_with(&["my.file.mkv", "The_Big-Movie(2019).mp4", "other.txt"]).await;

        let page = service.search(&SearchQuery::new("FILE")).await.unwrap();
        assert_eq!(page.results.len(), 1);
        assert_eq!(page.results[0].file_name, "my.file.mkv");

        let page = service.search(&SearchQuery::new("big movie 2019")).await.unwrap();
        assert_eq!(page.results.len(), 1);
        assert_eq!(page.results[0].file_name, "The_Big-Movie(2019).mp4");
    }

    #[tokio::test]
    async fn test_file_type_filter() {
        let service = SearchService::new(Arc::new(MemoryStore::new()), false);
        service.save(&record(1, "song.mp3", FileType::Audio)).await.unwrap();
        service.save(&record(2, "song.mp4", FileType::Video)).await.unwrap();

        let page = service
            .search(&SearchQuery::new("song").file_type(Some(FileType::Video)))
            .await
            .unwrap();
        assert_eq!(page.results.len(), 1);
        assert_eq!(page.results[0].file_type, Some(FileType::Video));
    }

    #[tokio::test]
    async fn test_caption_filter_mode() {
        let store = Arc::new(MemoryStore::new());
        let mut rec = record(1, "track01.mp3", FileType::Audio);
        rec.caption = Some("Live at Wembley".to_string());

        let plain = SearchService::new(store.clone(), false);
        plain.save(&rec).await.unwrap();
        let with_caption = SearchService::new(store, true);

        let query = SearchQuery::new("wembley");
        assert!(plain.search(&query).await.unwrap().results.is_empty());
        assert_eq!(with_caption.search(&query).await.unwrap().results.len(), 1);
    }

    #[tokio::test]
    async fn test_save_rejects_invalid_and_duplicate() {
        let service = service_with(&["a.pdf"]).await;

        let err = service
            .save(&record(0, "again.pdf", FileType::Document))
            .await
            .unwrap_err();
        assert!(err.is_duplicate());

        let err = service
            .save(&record(7, "", FileType::Document))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
        assert_eq!(service.total().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_delete_by_tuple() {
        let service = service_with(&["same.pdf", "same.pdf", "other.pdf"]).await;
        let key = record(99, "same.pdf", FileType::Document).key();

        // Two records share the tuple; one is removed, which one is up to the store.
        assert!(service.delete(&key).await.unwrap());
        assert_eq!(service.total().await.unwrap(), 2);

        let remaining = service.search(&SearchQuery::new("same")).await.unwrap();
        assert_eq!(remaining.results.len(), 1);
    }

    #[tokio::test]
    async fn test_zero_page_size_is_empty_and_final() {
        let service = service_with(&["a.pdf", "b.pdf", "c.pdf"]).await;

        let page = service
            .search(&SearchQuery::new("").max_results(0).offset(1))
            .await
            .unwrap();
        assert!(page.results.is_empty());
        assert_eq!(page.next_offset, None);
    }
}
