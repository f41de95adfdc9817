//! Inline query search

use crate::config::BotConfig;
use crate::constants::messages::SEARCH_UNAVAILABLE;
use crate::constants::NO_RESULTS_PARAMETER;
use crate::handlers::{self, with_timeout};
use crate::types::HandlerResult;
use crate::utils;
use std::sync::Arc;
use store::{FileType, MediaRecord, SearchPage, SearchQuery, SearchService};
use teloxide::prelude::*;
use teloxide::types::{
    InlineQueryResult, InlineQueryResultCachedAudio, InlineQueryResultCachedDocument,
    InlineQueryResultCachedVideo,
};

/// Build the search request for an inline query
///
/// The offset Telegram sends back is the continuation token of the previous
/// answer; anything unparsable restarts from the first page.
pub fn search_request(query: &str, offset: &str, max_results: u64) -> SearchQuery {
    let (text, file_type) = utils::parse_inline_query(query);
    SearchQuery::new(text)
        .file_type(file_type)
        .max_results(max_results)
        .offset(offset.trim().parse().unwrap_or(0))
}

/// Convert a stored record into a cached inline result
///
/// Records without a sendable file reference are skipped.
pub fn inline_result(record: &MediaRecord) -> Option<InlineQueryResult> {
    let file_ref = record.file_ref.as_deref()?;
    let description = handlers::format_media_description(record);

    let result = match record.file_type {
        Some(FileType::Video) => {
            let mut video =
                InlineQueryResultCachedVideo::new(&record.file_id, file_ref, &record.file_name)
                    .description(description);
            if let Some(caption) = &record.caption {
                video = video.caption(caption);
            }
            InlineQueryResult::CachedVideo(video)
        }
        Some(FileType::Audio) => {
            let mut audio = InlineQueryResultCachedAudio::new(&record.file_id, file_ref);
            if let Some(caption) = &record.caption {
                audio = audio.caption(caption);
            }
            InlineQueryResult::CachedAudio(audio)
        }
        Some(FileType::Document) | None => {
            let mut document =
                InlineQueryResultCachedDocument::new(&record.file_id, &record.file_name, file_ref)
                    .description(description);
            if let Some(caption) = &record.caption {
                document = document.caption(caption);
            }
            InlineQueryResult::CachedDocument(document)
        }
    };

    Some(result)
}

/// Text of the switch-to-PM button shown instead of results
///
/// Returns `None` when the page has results to show or is a later page of a
/// successful search.
pub fn switch_pm_text(request: &SearchQuery, page: &SearchPage, failed: bool) -> Option<String> {
    let text = if failed {
        SEARCH_UNAVAILABLE.to_string()
    } else if !page.results.is_empty() || request.offset != 0 {
        return None;
    } else if request.text.is_empty() {
        "No files indexed yet".to_string()
    } else {
        format!("No results for {}", request.text)
    };
    Some(utils::truncate(&text, 64))
}

/// Answer an inline query with one page of search results
pub async fn answer_query(
    bot: Bot,
    q: InlineQuery,
    search: SearchService,
    config: Arc<BotConfig>,
) -> HandlerResult {
    let request = search_request(&q.query, &q.offset, config.max_results);

    let (page, failed) = match with_timeout(search.search(&request)).await {
        Ok(page) => (page, false),
        Err(err) => {
            tracing::error!("Inline search for {:?} failed: {}", request.text, err);
            (SearchPage::empty(), true)
        }
    };

    let results: Vec<InlineQueryResult> = page.results.iter().filter_map(inline_result).collect();
    tracing::debug!(
        "Inline query {:?} (offset {}) returned {} results",
        request.text,
        request.offset,
        results.len()
    );

    let mut answer = bot
        .answer_inline_query(&q.id, results)
        .cache_time(if failed { 0 } else { config.cache_time })
        .is_personal(true)
        .next_offset(page.next_offset_token());

    if let Some(text) = switch_pm_text(&request, &page, failed) {
        answer = answer
            .switch_pm_text(text)
            .switch_pm_parameter(NO_RESULTS_PARAMETER);
    }

    answer.await?;
    Ok(())
}
