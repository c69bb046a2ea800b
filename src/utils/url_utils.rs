//! URL normalization for links and thumbnails scraped from the platform.

use url::Url;

use super::constants::PLATFORM_ORIGIN;

/// Resolve a possibly relative URL against `origin`
///
/// - `http(s)://…` is returned unchanged
/// - `//host/path` gains the `https:` scheme
/// - `/path` and bare relative paths are joined onto `origin`
///
/// Returns `None` for empty input or when the join produces no valid URL.
#[must_use]
pub fn absolutize(raw: &str, origin: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if raw.starts_with("http://") || raw.starts_with("https://") {
        return Some(raw.to_string());
    }

    if let Some(rest) = raw.strip_prefix("//") {
        return Some(format!("https://{rest}"));
    }

    let base = Url::parse(origin).ok()?;
    base.join(raw).ok().map(String::from)
}

/// Resolve against the platform origin
#[must_use]
pub fn absolutize_platform(raw: &str) -> Option<String> {
    absolutize(raw, PLATFORM_ORIGIN)
}

/// Check if a URL is a usable http(s) URL
#[must_use]
pub fn is_valid_url(url: &str) -> bool {
    if url.is_empty() {
        return false;
    }

    if url.starts_with("data:") || url.starts_with("javascript:") || url.starts_with("mailto:") {
        return false;
    }

    match Url::parse(url) {
        Ok(parsed) => matches!(parsed.scheme(), "http" | "https"),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn protocol_relative_gains_https() {
        assert_eq!(
            absolutize_platform("//cdn.example.com/a.jpg").as_deref(),
            Some("https://cdn.example.com/a.jpg")
        );
    }

    #[test]
    fn root_relative_joins_origin() {
        assert_eq!(
            absolutize_platform("/explore/abc").as_deref(),
            Some("https://www.xiaohongshu.com/explore/abc")
        );
    }

    #[test]
    fn absolute_is_untouched() {
        assert_eq!(
            absolutize_platform("http://example.com/x?y=1").as_deref(),
            Some("http://example.com/x?y=1")
        );
    }

    #[test]
    fn empty_is_none() {
        assert_eq!(absolutize_platform("   "), None);
    }

    #[test]
    fn validity() {
        assert!(is_valid_url("https://www.xiaohongshu.com/explore/1"));
        assert!(!is_valid_url("javascript:void(0)"));
        assert!(!is_valid_url("#"));
    }
}
