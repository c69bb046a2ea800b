//! Engagement counter normalization
//!
//! The platform renders counters in several shapes (`1.2w`, `1.2万 浏览`,
//! `12000次观看`, `3k likes`). Everything that leaves this crate uses one
//! canonical form: raw values below 10 000 verbatim, larger values as
//! `<x.y>万`, followed by the counter label.

use rand::Rng;
use regex::Regex;
use std::ops::RangeInclusive;
use std::sync::LazyLock;

/// One 万 (ten thousand)
pub const WAN: u64 = 10_000;

/// Which counter a display string belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountLabel {
    Views,
    Likes,
}

impl CountLabel {
    #[must_use]
    pub fn suffix(self) -> &'static str {
        match self {
            CountLabel::Views => "浏览",
            CountLabel::Likes => "点赞",
        }
    }

    /// Find the first counter of this kind inside a text fragment
    ///
    /// Returns the matched slice (number, optional unit and keyword),
    /// not the whole fragment.
    #[must_use]
    pub fn find_in(self, text: &str) -> Option<&str> {
        let re = match self {
            CountLabel::Views => &*VIEW_COUNTER,
            CountLabel::Likes => &*LIKE_COUNTER,
        };
        re.captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }
}

/// A number, an optional magnitude unit, then a view keyword
///
/// The number must not continue a preceding number; group 1 is the counter.
static VIEW_COUNTER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:^|[^\d.,])(\d[\d,]*(?:\.\d+)?\s*[万wk千]?\s*(?:次观看|次播放|浏览|观看|views?|plays?|次))",
    )
    .expect("view counter pattern is valid")
});

/// A number, an optional magnitude unit, then a like keyword
static LIKE_COUNTER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:^|[^\d.,])(\d[\d,]*(?:\.\d+)?\s*[万wk千]?\s*(?:点赞|赞|likes?|❤\x{FE0F}?|👍))",
    )
    .expect("like counter pattern is valid")
});

/// Leading number with optional magnitude unit
static LEADING_COUNT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\d[\d,]*(?:\.\d+)?)\s*([万wWkK千])?").expect("count pattern is valid")
});

/// Render a raw count with its magnitude unit and label
///
/// ```
/// # use notescrape::content::counts::{format_count, CountLabel};
/// assert_eq!(format_count(9_999, CountLabel::Views), "9999浏览");
/// assert_eq!(format_count(12_345, CountLabel::Likes), "1.2万点赞");
/// ```
#[must_use]
pub fn format_count(raw: u64, label: CountLabel) -> String {
    if raw >= WAN {
        format!("{:.1}万{}", raw as f64 / WAN as f64, label.suffix())
    } else {
        format!("{raw}{}", label.suffix())
    }
}

/// Parse the leading count of a display string into a raw integer
///
/// Accepts `万`/`w` (×10 000), `千`/`k` (×1 000) and `,` separators.
/// Anything after the unit is ignored, so labels in any language pass.
#[must_use]
pub fn parse_count(text: &str) -> Option<u64> {
    let caps = LEADING_COUNT.captures(text)?;
    let number: f64 = caps.get(1)?.as_str().replace(',', "").parse().ok()?;

    let multiplier = match caps.get(2).map(|m| m.as_str()) {
        Some("万" | "w" | "W") => WAN as f64,
        Some("千" | "k" | "K") => 1_000.0,
        _ => 1.0,
    };

    let raw = (number * multiplier).round();
    if raw.is_finite() && raw >= 0.0 && raw <= u64::MAX as f64 {
        Some(raw as u64)
    } else {
        None
    }
}

/// Re-render a matched counter fragment in canonical form
///
/// Fragments that cannot be parsed are returned trimmed, unchanged.
#[must_use]
pub fn normalize_counter(fragment: &str, label: CountLabel) -> String {
    match parse_count(fragment) {
        Some(raw) => format_count(raw, label),
        None => fragment.trim().to_string(),
    }
}

/// Bounds for synthesized counters
#[derive(Debug, Clone)]
pub struct SynthesisRanges {
    pub views: RangeInclusive<u64>,
    pub likes: RangeInclusive<u64>,
}

/// Ranges used to fill counters missing from a live page
pub const RECOVERED_RANGES: SynthesisRanges = SynthesisRanges {
    views: 1_000..=100_999,
    likes: 100..=5_099,
};

/// Ranges used by the mock generator
pub const MOCK_RANGES: SynthesisRanges = SynthesisRanges {
    views: 5_000..=104_999,
    likes: 500..=10_499,
};

impl SynthesisRanges {
    #[must_use]
    pub fn range(&self, label: CountLabel) -> RangeInclusive<u64> {
        match label {
            CountLabel::Views => self.views.clone(),
            CountLabel::Likes => self.likes.clone(),
        }
    }
}

/// Draw a raw count from `ranges` and format it
pub fn synthesize_with<R: Rng + ?Sized>(
    rng: &mut R,
    ranges: &SynthesisRanges,
    label: CountLabel,
) -> String {
    format_count(rng.random_range(ranges.range(label)), label)
}

#[must_use]
pub fn synthesize_views(ranges: &SynthesisRanges) -> String {
    synthesize_with(&mut rand::rng(), ranges, CountLabel::Views)
}

#[must_use]
pub fn synthesize_likes(ranges: &SynthesisRanges) -> String {
    synthesize_with(&mut rand::rng(), ranges, CountLabel::Likes)
}
