//! Per-candidate field extraction
//!
//! Each field is resolved independently and degrades on its own: a missing
//! author never costs the title, a missing counter is synthesized. Only the
//! title can reject a candidate.

use scraper::{ElementRef, Html};
use tracing::{debug, info};

use super::cascade::find_candidates;
use super::selectors::{
    ANCHOR_WITH_HREF, AUTHORS, CompiledQuery, IMAGE, QueryScope, TEXT_BEARING, TITLES,
    closest_anchor,
};
use crate::content::counts::{
    CountLabel, RECOVERED_RANGES, normalize_counter, synthesize_likes, synthesize_views,
};
use crate::content::types::ContentItem;
use crate::utils::{
    MAX_ITEMS, MAX_TITLE_CHARS, MIN_TITLE_CHARS, MISSING_LINK, REJECT_TITLE_CHARS, UNKNOWN_AUTHOR,
    absolutize_platform, char_len, collapse_whitespace, is_numeric_or_blank, is_valid_url,
    safe_truncate_chars,
};

/// Lazy-load attributes checked after `src`, in order
const IMAGE_SOURCE_ATTRS: [&str; 3] = ["src", "data-src", "data-lazy-src"];

/// Substrings that mark a title as a rendering artifact
const SENTINEL_TOKENS: [&str; 2] = ["undefined", "null"];

/// Where a field value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldSource {
    /// A named structural query matched
    Query(&'static str),
    /// Longest plausible text fragment inside the candidate
    TextFallback,
    /// Generated locally because the page had nothing usable
    Synthesized,
    /// Fixed sentinel value
    Default,
    /// Descendant element of the candidate
    Descendant,
    /// The candidate itself or one of its ancestors
    Ancestor,
    /// Named attribute of a descendant element
    Attribute(&'static str),
    /// Nothing found and no default applies
    Missing,
}

/// An optional field value plus the reason it has that value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldResolution<T> {
    pub value: Option<T>,
    pub source: FieldSource,
}

impl<T> FieldResolution<T> {
    fn found(value: T, source: FieldSource) -> Self {
        Self {
            value: Some(value),
            source,
        }
    }

    fn missing() -> Self {
        Self {
            value: None,
            source: FieldSource::Missing,
        }
    }
}

/// Why a candidate's title disqualified it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleRejection {
    TooShort,
    TooLong,
    SentinelToken,
    NumericOnly,
}

impl std::fmt::Display for TitleRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let reason = match self {
            TitleRejection::TooShort => "too short",
            TitleRejection::TooLong => "too long",
            TitleRejection::SentinelToken => "contains a sentinel token",
            TitleRejection::NumericOnly => "numeric only",
        };
        f.write_str(reason)
    }
}

/// Check a resolved title and truncate it for output
///
/// ```
/// # use notescrape::extraction::fields::{validate_title, TitleRejection};
/// assert_eq!(validate_title("12345678"), Err(TitleRejection::NumericOnly));
/// assert_eq!(validate_title("周末去哪儿拍照").as_deref(), Ok("周末去哪儿拍照"));
/// ```
pub fn validate_title(title: &str) -> Result<String, TitleRejection> {
    let title = title.trim();
    let len = char_len(title);

    if len <= MIN_TITLE_CHARS {
        return Err(TitleRejection::TooShort);
    }
    if len >= REJECT_TITLE_CHARS {
        return Err(TitleRejection::TooLong);
    }
    if SENTINEL_TOKENS.iter().any(|token| title.contains(token)) {
        return Err(TitleRejection::SentinelToken);
    }
    if is_numeric_or_blank(title) {
        return Err(TitleRejection::NumericOnly);
    }

    Ok(safe_truncate_chars(title, MAX_TITLE_CHARS).to_string())
}

/// Collapsed text content of an element
fn text_of(element: ElementRef<'_>) -> String {
    collapse_whitespace(&element.text().collect::<String>())
}

/// Builds [`ContentItem`]s from candidate elements for one keyword
#[derive(Debug, Clone, Copy)]
pub struct FieldExtractor<'k> {
    keyword: &'k str,
}

impl<'k> FieldExtractor<'k> {
    #[must_use]
    pub fn new(keyword: &'k str) -> Self {
        Self { keyword }
    }

    /// Extract one item from the candidate at `index` (0-based)
    pub fn extract(
        &self,
        element: ElementRef<'_>,
        index: usize,
    ) -> Result<ContentItem, TitleRejection> {
        let title = self.title(element, index);
        let title = validate_title(title.value.as_deref().unwrap_or_default())?;

        let author = self.author(element).value.unwrap_or_else(|| UNKNOWN_AUTHOR.to_string());

        let view_count = self.counter(element, CountLabel::Views).value.unwrap_or_default();
        let like_count = self.counter(element, CountLabel::Likes).value.unwrap_or_default();

        let link = self.link(element).value.unwrap_or_else(|| MISSING_LINK.to_string());
        let thumbnail = self.thumbnail(element).value;

        Ok(ContentItem {
            title,
            author,
            view_count,
            like_count,
            link,
            thumbnail,
        })
    }

    /// Title queries first, then the longest text fragment, then a generated title
    pub fn title(&self, element: ElementRef<'_>, index: usize) -> FieldResolution<String> {
        let long_enough = |t: &str| char_len(t) > MIN_TITLE_CHARS;
        if let Some(resolution) = first_text_match(&TITLES, element, long_enough) {
            return resolution;
        }

        if let Some(fragment) = longest_fragment(element) {
            return FieldResolution::found(fragment, FieldSource::TextFallback);
        }

        FieldResolution::found(
            format!("{}相关内容 {}", self.keyword, index + 1),
            FieldSource::Synthesized,
        )
    }

    /// First non-empty author query match, or the unknown-user sentinel
    pub fn author(&self, element: ElementRef<'_>) -> FieldResolution<String> {
        first_text_match(&AUTHORS, element, |t| !t.is_empty()).unwrap_or_else(|| {
            FieldResolution::found(UNKNOWN_AUTHOR.to_string(), FieldSource::Default)
        })
    }

    /// First counter of `label` kind among text-bearing descendants, normalized
    ///
    /// Leaf fragments are tried before wrappers, whose joined text can glue a
    /// neighbour's trailing digits onto the counter.
    pub fn counter(&self, element: ElementRef<'_>, label: CountLabel) -> FieldResolution<String> {
        let (leaves, wrappers): (Vec<_>, Vec<_>) = element
            .select_all(&TEXT_BEARING)
            .into_iter()
            .partition(|fragment| is_leaf_fragment(*fragment));

        leaves
            .into_iter()
            .chain(wrappers)
            .find_map(|fragment| {
                let text = text_of(fragment);
                label
                    .find_in(&text)
                    .map(|matched| normalize_counter(matched, label))
            })
            .map(|value| FieldResolution::found(value, FieldSource::Descendant))
            .unwrap_or_else(|| {
                let value = match label {
                    CountLabel::Views => synthesize_views(&RECOVERED_RANGES),
                    CountLabel::Likes => synthesize_likes(&RECOVERED_RANGES),
                };
                FieldResolution::found(value, FieldSource::Synthesized)
            })
    }

    /// Absolute URL of the first image, checking lazy-load attributes
    pub fn thumbnail(&self, element: ElementRef<'_>) -> FieldResolution<String> {
        let Some(image) = element.select_first(&IMAGE) else {
            return FieldResolution::missing();
        };

        IMAGE_SOURCE_ATTRS
            .iter()
            .find_map(|&attr| {
                image
                    .value()
                    .attr(attr)
                    .and_then(absolutize_platform)
                    .map(|url| FieldResolution::found(url, FieldSource::Attribute(attr)))
            })
            .unwrap_or_else(FieldResolution::missing)
    }

    /// Descendant anchor first, then the candidate or its nearest anchor ancestor
    pub fn link(&self, element: ElementRef<'_>) -> FieldResolution<String> {
        let descendant = element
            .select_first(&ANCHOR_WITH_HREF)
            .and_then(usable_href)
            .map(|url| FieldResolution::found(url, FieldSource::Descendant));

        descendant
            .or_else(|| {
                closest_anchor(element)
                    .and_then(usable_href)
                    .map(|url| FieldResolution::found(url, FieldSource::Ancestor))
            })
            .unwrap_or_else(|| {
                FieldResolution::found(MISSING_LINK.to_string(), FieldSource::Default)
            })
    }
}

/// Absolute, valid URL from an anchor's `href`
fn usable_href(anchor: ElementRef<'_>) -> Option<String> {
    anchor
        .value()
        .attr("href")
        .and_then(absolutize_platform)
        .filter(|url| is_valid_url(url))
}

/// A text-bearing element with no text-bearing descendants
fn is_leaf_fragment(fragment: ElementRef<'_>) -> bool {
    !fragment
        .descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .any(|child| TEXT_BEARING.matches(&child))
}

/// First query whose first match inside `element` has acceptable text
fn first_text_match(
    queries: &[CompiledQuery],
    element: ElementRef<'_>,
    accept: impl Fn(&str) -> bool,
) -> Option<FieldResolution<String>> {
    queries.iter().find_map(|query| {
        let text = text_of(query.first_in(&element)?);
        accept(&text).then(|| FieldResolution::found(text, FieldSource::Query(query.name())))
    })
}

/// Longest `span`/`p`/`div` text between the title length bounds
///
/// Ties keep document order.
fn longest_fragment(element: ElementRef<'_>) -> Option<String> {
    let mut fragments: Vec<String> = element
        .select_all(&TEXT_BEARING)
        .into_iter()
        .map(text_of)
        .filter(|text| {
            let len = char_len(text);
            len > MIN_TITLE_CHARS && len < MAX_TITLE_CHARS && !is_numeric_or_blank(text)
        })
        .collect();

    fragments.sort_by_key(|text| std::cmp::Reverse(char_len(text)));
    fragments.into_iter().next()
}

/// Parse a page snapshot and extract up to [`MAX_ITEMS`] items
///
/// The parsed document never outlives this call.
#[must_use]
pub fn extract_from_html(html: &str, keyword: &str) -> Vec<ContentItem> {
    let document = Html::parse_document(html);
    let candidates = find_candidates(&document);
    info!(
        stage = "cascade",
        source = ?candidates.source,
        candidates = candidates.len(),
        "Candidate discovery finished"
    );

    let extractor = FieldExtractor::new(keyword);
    let mut items = Vec::with_capacity(MAX_ITEMS);

    for (index, element) in candidates.elements.into_iter().enumerate() {
        match extractor.extract(element, index) {
            Ok(item) => {
                items.push(item);
                if items.len() == MAX_ITEMS {
                    break;
                }
            }
            Err(reason) => {
                debug!(stage = "fields", index, %reason, "Candidate rejected");
            }
        }
    }

    info!(stage = "fields", accepted = items.len(), "Field extraction finished");
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first_div(doc: &Html) -> ElementRef<'_> {
        let selector = scraper::Selector::parse("div.note-item").unwrap();
        doc.select(&selector).next().unwrap()
    }

    #[test]
    fn title_prefers_queries_over_text_fallback() {
        let doc = Html::parse_document(
            r#"<div class="note-item"><h3>周末去哪儿拍照好看</h3><p>这是一段更长的描述文字内容</p></div>"#,
        );
        let res = FieldExtractor::new("摄影").title(first_div(&doc), 0);
        assert_eq!(res.value.as_deref(), Some("周末去哪儿拍照好看"));
        assert_eq!(res.source, FieldSource::Query("h3"));
    }

    #[test]
    fn short_query_match_falls_through_to_next_query() {
        let doc = Html::parse_document(
            r#"<div class="note-item"><div class="title">短标题</div><h4>第二个标题足够长</h4></div>"#,
        );
        let res = FieldExtractor::new("摄影").title(first_div(&doc), 0);
        assert_eq!(res.source, FieldSource::Query("h4"));
    }

    #[test]
    fn text_fallback_picks_longest_fragment() {
        let doc = Html::parse_document(
            r#"<div class="note-item"><span>123456789</span><span>六个字的标题</span><p>这个片段明显更长一些</p></div>"#,
        );
        let res = FieldExtractor::new("摄影").title(first_div(&doc), 0);
        assert_eq!(res.value.as_deref(), Some("这个片段明显更长一些"));
        assert_eq!(res.source, FieldSource::TextFallback);
    }

    #[test]
    fn title_synthesized_from_keyword_and_index() {
        let doc = Html::parse_document(r#"<div class="note-item"><img src="/a.jpg"></div>"#);
        let res = FieldExtractor::new("摄影").title(first_div(&doc), 2);
        assert_eq!(res.value.as_deref(), Some("摄影相关内容 3"));
        assert_eq!(res.source, FieldSource::Synthesized);
    }

    #[test]
    fn validation_rules() {
        assert_eq!(validate_title("五个字标题"), Err(TitleRejection::TooShort));
        assert_eq!(validate_title("title is undefined"), Err(TitleRejection::SentinelToken));
        assert_eq!(validate_title("null pointer story"), Err(TitleRejection::SentinelToken));
        assert_eq!(validate_title(" 1234 5678 "), Err(TitleRejection::NumericOnly));
        assert_eq!(validate_title(&"长".repeat(200)), Err(TitleRejection::TooLong));

        let long = "标".repeat(150);
        assert_eq!(char_len(&validate_title(&long).unwrap()), MAX_TITLE_CHARS);
    }

    #[test]
    fn author_defaults_to_unknown() {
        let doc =
            Html::parse_document(r#"<div class="note-item"><span class="author">  </span></div>"#);
        let res = FieldExtractor::new("x").author(first_div(&doc));
        assert_eq!(res.value.as_deref(), Some(UNKNOWN_AUTHOR));
        assert_eq!(res.source, FieldSource::Default);
    }

    #[test]
    fn counters_are_normalized_or_synthesized() {
        let doc = Html::parse_document(
            r#"<div class="note-item"><span>1.2w 浏览</span><span>88 赞</span></div>"#,
        );
        let extractor = FieldExtractor::new("x");
        let el = first_div(&doc);
        assert_eq!(extractor.counter(el, CountLabel::Views).value.as_deref(), Some("1.2万浏览"));
        assert_eq!(extractor.counter(el, CountLabel::Likes).value.as_deref(), Some("88点赞"));

        let bare = Html::parse_document(r#"<div class="note-item"><span>没有计数</span></div>"#);
        let views = extractor.counter(first_div(&bare), CountLabel::Views);
        assert_eq!(views.source, FieldSource::Synthesized);
        assert!(views.value.unwrap().ends_with("浏览"));
    }

    #[test]
    fn counters_ignore_digits_glued_from_neighbours() {
        let doc = Html::parse_document(
            r#"<div class="note-item"><div class="footer"><span>拍照技巧第2</span><span>1.2万浏览</span><span>摄影师7</span><span>300赞</span></div></div>"#,
        );
        let extractor = FieldExtractor::new("x");
        let el = first_div(&doc);
        assert_eq!(extractor.counter(el, CountLabel::Views).value.as_deref(), Some("1.2万浏览"));
        assert_eq!(extractor.counter(el, CountLabel::Likes).value.as_deref(), Some("300点赞"));
    }

    #[test]
    fn counter_split_across_children_found_in_wrapper() {
        let doc = Html::parse_document(
            r#"<div class="note-item"><span>3.4万<i>浏览</i></span></div>"#,
        );
        let res = FieldExtractor::new("x").counter(first_div(&doc), CountLabel::Views);
        assert_eq!(res.value.as_deref(), Some("3.4万浏览"));
        assert_eq!(res.source, FieldSource::Descendant);
    }

    #[test]
    fn thumbnail_skips_empty_src_for_lazy_attr() {
        let doc = Html::parse_document(
            r#"<div class="note-item"><img src="" data-src="//cdn.example.com/a.jpg"></div>"#,
        );
        let res = FieldExtractor::new("x").thumbnail(first_div(&doc));
        assert_eq!(res.value.as_deref(), Some("https://cdn.example.com/a.jpg"));
        assert_eq!(res.source, FieldSource::Attribute("data-src"));
    }

    #[test]
    fn link_prefers_descendant_then_ancestor() {
        let doc = Html::parse_document(
            r#"<div class="note-item"><a href="/explore/abc">x</a></div>"#,
        );
        let res = FieldExtractor::new("x").link(first_div(&doc));
        assert_eq!(res.value.as_deref(), Some("https://www.xiaohongshu.com/explore/abc"));

        let doc = Html::parse_document(
            r#"<a href="https://www.xiaohongshu.com/explore/def"><div class="note-item">x</div></a>"#,
        );
        let res = FieldExtractor::new("x").link(first_div(&doc));
        assert_eq!(res.source, FieldSource::Ancestor);
        assert_eq!(res.value.as_deref(), Some("https://www.xiaohongshu.com/explore/def"));

        let doc = Html::parse_document(r#"<div class="note-item">x</div>"#);
        assert_eq!(
            FieldExtractor::new("x").link(first_div(&doc)).value.as_deref(),
            Some(MISSING_LINK)
        );
    }

    #[test]
    fn unusable_descendant_href_falls_back_to_ancestor() {
        let doc = Html::parse_document(
            r#"<a href="/explore/ghi"><div class="note-item"><svg><a href="javascript:void(0)"></a></svg></div></a>"#,
        );
        let res = FieldExtractor::new("x").link(first_div(&doc));
        assert_eq!(res.source, FieldSource::Ancestor);
        assert_eq!(res.value.as_deref(), Some("https://www.xiaohongshu.com/explore/ghi"));

        let doc = Html::parse_document(
            r#"<div class="note-item"><a href="javascript:void(0)">x</a></div>"#,
        );
        let res = FieldExtractor::new("x").link(first_div(&doc));
        assert_eq!(res.source, FieldSource::Default);
        assert_eq!(res.value.as_deref(), Some(MISSING_LINK));
    }

    #[test]
    fn extract_from_html_caps_and_skips_rejections() {
        let mut html = String::from(r#"<div class="note-item"><h3>undefined</h3></div>"#);
        for n in 0..14 {
            html.push_str(&format!(
                r#"<div class="note-item"><h3>第{n}篇笔记的标题</h3></div>"#
            ));
        }
        let items = extract_from_html(&html, "x");
        assert_eq!(items.len(), MAX_ITEMS);
        assert_eq!(items[0].title, "第0篇笔记的标题");
    }
}
