//! Search query construction
//!
//! Free text typed by a user is turned into a case-insensitive regular
//! expression over file names. The query text is inserted without escaping,
//! so regex syntax in the input is honoured and malformed input simply
//! yields no results.
//!
//! Validation uses the `regex` crate, while the MongoDB backend evaluates the
//! pattern with the server's PCRE engine. The dialects differ: input such as
//! `C++` is accepted here and sent to the server, and lookarounds like
//! `x(?=y)` are rejected here although the server would run them.

use crate::model::{FileType, MediaRecord};
use regex::{Regex, RegexBuilder};

/// Pattern used for an empty query
pub const MATCH_ALL: &str = ".";

/// Boundary accepted on either side of a single-token query
const TOKEN_BOUNDARY: &str = r"(\b|[\.\+\-_])";

/// Filler substituted for each run of whitespace in a multi-word query
const WORD_FILLER: &str = r".*[\s\.\+\-_\(\)\[\]]";

/// Default page size for search results
pub const DEFAULT_MAX_RESULTS: u64 = 10;

/// Build the raw pattern for a free-text query
pub fn build_pattern(query: &str) -> String {
    let query = query.trim();

    if query.is_empty() {
        MATCH_ALL.to_string()
    } else if !query.contains(char::is_whitespace) {
        format!("{}{}{}", TOKEN_BOUNDARY, query, TOKEN_BOUNDARY)
    } else {
        query.split_whitespace().collect::<Vec<_>>().join(WORD_FILLER)
    }
}

/// Compile a raw pattern case-insensitively
pub fn compile_pattern(pattern: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(pattern).case_insensitive(true).build()
}

/// Parameters of one search request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub text: String,
    pub file_type: Option<FileType>,
    pub max_results: u64,
    /// Continuation offset returned by the previous page
    pub offset: u64,
}

impl SearchQuery {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            file_type: None,
            max_results: DEFAULT_MAX_RESULTS,
            offset: 0,
        }
    }

    pub fn file_type(mut self, file_type: Option<FileType>) -> Self {
        self.file_type = file_type;
        self
    }

    pub fn max_results(mut self, max_results: u64) -> Self {
        self.max_results = max_results;
        self
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = offset;
        self
    }
}

/// One page of search results
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPage {
    pub results: Vec<MediaRecord>,
    /// Offset of the next page, `None` when this page is the last
    pub next_offset: Option<u64>,
}

impl SearchPage {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Continuation token in its wire form, empty when there are no more pages
    pub fn next_offset_token(&self) -> String {
        self.next_offset.map(|o| o.to_string()).unwrap_or_default()
    }
}

/// Compute the continuation offset for a page
///
/// A zero page size never advances, so it has no continuation.
pub fn next_offset(offset: u64, max_results: u64, total: u64) -> Option<u64> {
    if max_results == 0 {
        return None;
    }
    let next = offset.saturating_add(max_results);
    if next >= total {
        None
    } else {
        Some(next)
    }
}

/// Compiled filter over stored media
#[derive(Debug, Clone)]
pub struct MediaFilter {
    pub pattern: Regex,
    /// Also match the pattern against captions
    pub include_caption: bool,
    pub file_type: Option<FileType>,
}

impl MediaFilter {
    pub fn new(pattern: Regex, include_caption: bool, file_type: Option<FileType>) -> Self {
        Self {
            pattern,
            include_caption,
            file_type,
        }
    }

    /// Evaluate the filter against a record in memory
    pub fn matches(&self, record: &MediaRecord) -> bool {
        if let Some(file_type) = self.file_type {
            if record.file_type != Some(file_type) {
                return false;
            }
        }

        if self.pattern.is_match(&record.file_name) {
            return true;
        }

        self.include_caption
            && record
                .caption
                .as_deref()
                .is_some_and(|caption| self.pattern.is_match(caption))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matches(query: &str, haystack: &str) -> bool {
        compile_pattern(&build_pattern(query))
            .unwrap()
            .is_match(haystack)
    }

    #[test]
    fn test_empty_query_matches_all() {
        assert_eq!(build_pattern("   "), MATCH_ALL);
        assert!(matches("", "anything.mkv"));
    }

    #[test]
    fn test_single_token_separators() {
        for sep in ['.', '+', '-', '_'] {
            let name = format!("my{}file{}mkv", sep, sep);
            assert!(matches("file", &name), "separator {:?}", sep);
        }
        assert!(matches("file", "file"));
        assert!(matches("file", "some file here"));
    }

    #[test]
    fn test_single_token_case_insensitive() {
        assert!(matches("FILE", "file"));
        assert!(matches("file", "My.FILE.mkv"));
    }

    #[test]
    fn test_single_token_requires_boundary() {
        assert!(!matches("file", "myfilemkv"));
    }

    #[test]
    fn test_multi_word_fillers() {
        for filler in [' ', '.', '+', '-', '_', '(', ')', '[', ']'] {
            let name = format!("the{}movie", filler);
            assert!(matches("the movie", &name), "filler {:?}", filler);
        }
        assert!(matches("the   movie", "The.Big.Movie.2019"));
        assert!(!matches("the movie", "themovie"));
    }

    #[test]
    fn test_malformed_query() {
        assert!(compile_pattern(&build_pattern("foo(")).is_err());
        assert!(compile_pattern(&build_pattern("[abc")).is_err());
    }

    #[test]
    fn test_pattern_dialect() {
        assert!(compile_pattern(&build_pattern("C++")).is_ok());
        assert!(compile_pattern(&build_pattern("a**")).is_ok());
        assert!(compile_pattern(&build_pattern("x(?=y)")).is_err());
    }

    #[test]
    fn test_next_offset() {
        assert_eq!(next_offset(0, 10, 25), Some(10));
        assert_eq!(next_offset(10, 10, 25), Some(20));
        assert_eq!(next_offset(20, 10, 25), None);
        assert_eq!(next_offset(0, 10, 10), None);
        assert_eq!(next_offset(0, 10, 0), None);
        assert_eq!(next_offset(1, 0, 3), None);
    }

    #[test]
    fn test_filter_caption_and_type() {
        let record = MediaRecord {
            file_id: "id".to_string(),
            file_ref: None,
            file_name: "track01.mp3".to_string(),
            file_size: 10,
            file_type: Some(FileType::Audio),
            mime_type: None,
            caption: Some("Live at Wembley".to_string()),
        };
        let pattern = compile_pattern(&build_pattern("wembley")).unwrap();

        assert!(!MediaFilter::new(pattern.clone(), false, None).matches(&record));
        assert!(MediaFilter::new(pattern.clone(), true, None).matches(&record));
        assert!(!MediaFilter::new(pattern, true, Some(FileType::Video)).matches(&record));
    }

    #[test]
    fn test_page_token() {
        let page = SearchPage {
            results: vec![],
            next_offset: Some(10),
        };
        assert_eq!(page.next_offset_token(), "10");
        assert_eq!(SearchPage::empty().next_offset_token(), "");
    }
}
