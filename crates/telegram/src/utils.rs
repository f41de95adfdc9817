//! Utility functions for formatting and parsing

use store::FileType;

/// Format file size in human-readable format
pub fn format_bytes(bytes: i64) -> String {
    const UNITS: [&str; 6] = ["B", "KB", "MB", "GB", "TB", "PB"];

    if bytes == 0 {
        return "0 B".to_string();
    }

    let sign = if bytes < 0 { "-" } else { "" };
    let bytes = bytes.unsigned_abs() as f64;
    let unit_index = (bytes.ln() / 1024_f64.ln()).floor() as usize;
    let unit_index = unit_index.min(UNITS.len() - 1);

    let size = bytes / 1024_f64.powi(unit_index as i32);

    format!("{}{:.2} {}", sign, size, UNITS[unit_index])
}

/// Parse command arguments from message text
pub fn parse_args(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

/// Split an inline query into search text and an optional file type
///
/// `the movie | video` searches for "the movie" among videos. A suffix that
/// is not a known file type is kept as part of the search text.
pub fn parse_inline_query(query: &str) -> (String, Option<FileType>) {
    if let Some((text, kind)) = query.rsplit_once('|') {
        if let Ok(file_type) = kind.parse::<FileType>() {
            return (text.trim().to_string(), Some(file_type));
        }
    }
    (query.trim().to_string(), None)
}

/// Truncate text to at most `max` characters, marking the cut with "..."
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(512), "512.00 B");
        assert_eq!(format_bytes(1024), "1.00 KB");
        assert_eq!(format_bytes(1_048_576), "1.00 MB");
        assert_eq!(format_bytes(-2048), "-2.00 KB");
    }

    #[test]
    fn test_parse_args() {
        assert_eq!(parse_args("movies  IMDb https://imdb.com"), ["movies", "IMDb", "https://imdb.com"]);
        assert!(parse_args("   ").is_empty());
    }

    #[test]
    fn test_parse_inline_query() {
        assert_eq!(parse_inline_query(" avatar "), ("avatar".to_string(), None));
        assert_eq!(
            parse_inline_query("avatar 2009 | Video"),
            ("avatar 2009".to_string(), Some(FileType::Video))
        );
        assert_eq!(parse_inline_query("a|b"), ("a|b".to_string(), None));
        assert_eq!(parse_inline_query("| audio"), (String::new(), Some(FileType::Audio)));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a very long file name", 10), "a very ...");
        assert_eq!(truncate("ñññññ", 4), "ñ...");
    }
}
