//! UTF-8-safe string helpers for scraped text
//!
//! Note titles are mostly CJK text, so every length check and truncation
//! here counts characters, never bytes.

/// Safely truncate a string to a maximum number of CHARACTERS (not bytes).
///
/// Respects UTF-8 character boundaries and never panics, even with
/// multi-byte characters like CJK ideographs or emoji.
///
/// # Examples
/// ```
/// # use notescrape::utils::string_utils::safe_truncate_chars;
/// assert_eq!(safe_truncate_chars("Hello, World!", 5), "Hello");
/// assert_eq!(safe_truncate_chars("副业赚钱指南", 2), "副业");
/// assert_eq!(safe_truncate_chars("Hi", 100), "Hi");
/// ```
#[inline]
pub fn safe_truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        None => s,
        Some((byte_idx, _)) => &s[..byte_idx],
    }
}

/// Character count of `s`
#[inline]
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// True when `s` consists only of ASCII digits and whitespace
///
/// Such fragments are counters or timestamps, never titles.
#[must_use]
pub fn is_numeric_or_blank(s: &str) -> bool {
    s.chars().all(|c| c.is_ascii_digit() || c.is_whitespace())
}

/// Collapse runs of whitespace into single spaces and trim the ends
///
/// `scraper` returns text nodes verbatim, including the indentation of
/// the source markup.
#[must_use]
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncation_respects_char_boundaries() {
        assert_eq!(safe_truncate_chars("摄影技巧分享", 4), "摄影技巧");
        assert_eq!(safe_truncate_chars("🎉🎊🎈", 2), "🎉🎊");
    }

    #[test]
    fn numeric_detection() {
        assert!(is_numeric_or_blank("12 345"));
        assert!(is_numeric_or_blank("   "));
        assert!(!is_numeric_or_blank("12万"));
    }

    #[test]
    fn whitespace_collapse() {
        assert_eq!(collapse_whitespace("  a \n\t b  "), "a b");
    }
}
