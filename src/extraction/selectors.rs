//! Structural query descriptors
//!
//! The platform's markup is unstable, so every lookup is an ordered list of
//! descriptors tried until one matches. All descriptor lists live here.
//! Update this file when the platform changes its HTML structure. Each
//! descriptor renders to CSS, which serves both the parsed-snapshot matcher
//! below and the live-page search input lookup in `session`.

use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;
use tracing::error;

/// What a descriptor keys on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    /// ARIA role attribute
    Role,
    /// Platform class name
    Class,
    /// `data-testid` marker
    TestId,
    /// Semantic element name
    Tag,
    /// Anchor whose href follows the note URL pattern
    LinkPattern,
    /// Presence or content of another attribute
    Attribute,
    /// Element inside a marked container
    Nested,
}

/// One entry in an ordered query list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryDescriptor {
    pub name: &'static str,
    pub kind: QueryKind,
    pub css: &'static str,
}

const fn query(name: &'static str, kind: QueryKind, css: &'static str) -> QueryDescriptor {
    QueryDescriptor { name, kind, css }
}

/// Note containers, most specific first
pub const CANDIDATE_QUERIES: &[QueryDescriptor] = &[
    query("listitem-section", QueryKind::Role, r#"section[role="listitem"]"#),
    query("note-item", QueryKind::Class, ".note-item"),
    query("feed-item", QueryKind::Class, ".feed-item"),
    query("note-testid", QueryKind::TestId, r#"[data-testid="note"]"#),
    query("note-container", QueryKind::Class, ".note-container"),
    query("explore-link", QueryKind::LinkPattern, r#"a[href*="/explore/"]"#),
    query("article", QueryKind::Tag, "article"),
    query("card", QueryKind::Class, ".card"),
];

/// Title-bearing elements inside a note container
pub const TITLE_QUERIES: &[QueryDescriptor] = &[
    query("title-testid", QueryKind::TestId, r#"[data-testid="title"]"#),
    query("title-class", QueryKind::Class, ".title"),
    query("h3", QueryKind::Tag, "h3"),
    query("h4", QueryKind::Tag, "h4"),
    query("h5", QueryKind::Tag, "h5"),
    query("h6", QueryKind::Tag, "h6"),
    query("note-title", QueryKind::Class, ".note-title"),
    query("span-title-attr", QueryKind::Attribute, "span[title]"),
    query("div-title-attr", QueryKind::Attribute, "div[title]"),
];

/// Author-bearing elements inside a note container
pub const AUTHOR_QUERIES: &[QueryDescriptor] = &[
    query("author-class", QueryKind::Class, ".author"),
    query("user-name", QueryKind::Class, ".user-name"),
    query("author-testid", QueryKind::TestId, r#"[data-testid="author"]"#),
    query("username", QueryKind::Class, ".username"),
];

/// Search box on the platform landing page
pub const SEARCH_INPUT_QUERIES: &[QueryDescriptor] = &[
    query("search-placeholder", QueryKind::Attribute, r#"input[placeholder*="搜索"]"#),
    query("search-testid", QueryKind::TestId, r#"input[data-testid="search"]"#),
    query("search-input-class", QueryKind::Nested, ".search-input input"),
    query("text-input", QueryKind::Tag, r#"input[type="text"]"#),
    query("searchbar-testid", QueryKind::Nested, r#"[data-testid="searchbar"] input"#),
];

/// A descriptor with its parsed selector
#[derive(Debug, Clone)]
pub struct CompiledQuery {
    pub descriptor: QueryDescriptor,
    selector: Selector,
}

/// Anything a query can be evaluated against: a whole document or one element
///
/// Element scopes follow `querySelectorAll` semantics and never match the
/// scope element itself.
pub trait QueryScope<'a> {
    fn select_all(&self, selector: &Selector) -> Vec<ElementRef<'a>>;
    fn select_first(&self, selector: &Selector) -> Option<ElementRef<'a>>;
}

impl<'a> QueryScope<'a> for &'a Html {
    fn select_all(&self, selector: &Selector) -> Vec<ElementRef<'a>> {
        let document: &'a Html = *self;
        document.select(selector).collect()
    }

    fn select_first(&self, selector: &Selector) -> Option<ElementRef<'a>> {
        let document: &'a Html = *self;
        document.select(selector).next()
    }
}

impl<'a> QueryScope<'a> for ElementRef<'a> {
    fn select_all(&self, selector: &Selector) -> Vec<ElementRef<'a>> {
        self.select(selector).collect()
    }

    fn select_first(&self, selector: &Selector) -> Option<ElementRef<'a>> {
        self.select(selector).next()
    }
}

impl CompiledQuery {
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.descriptor.name
    }

    /// All matches inside `scope`, in document order
    pub fn select_in<'a, S: QueryScope<'a>>(&self, scope: &S) -> Vec<ElementRef<'a>> {
        scope.select_all(&self.selector)
    }

    /// First match inside `scope`
    pub fn first_in<'a, S: QueryScope<'a>>(&self, scope: &S) -> Option<ElementRef<'a>> {
        scope.select_first(&self.selector)
    }
}

/// Parse a descriptor list, dropping (and logging) any entry that fails
#[must_use]
pub fn compile(descriptors: &[QueryDescriptor]) -> Vec<CompiledQuery> {
    descriptors
        .iter()
        .filter_map(|descriptor| match Selector::parse(descriptor.css) {
            Ok(selector) => Some(CompiledQuery {
                descriptor: *descriptor,
                selector,
            }),
            Err(e) => {
                error!(query = descriptor.name, css = descriptor.css, "Invalid selector: {e}");
                None
            }
        })
        .collect()
}

pub static CANDIDATES: LazyLock<Vec<CompiledQuery>> = LazyLock::new(|| compile(CANDIDATE_QUERIES));
pub static TITLES: LazyLock<Vec<CompiledQuery>> = LazyLock::new(|| compile(TITLE_QUERIES));
pub static AUTHORS: LazyLock<Vec<CompiledQuery>> = LazyLock::new(|| compile(AUTHOR_QUERIES));

fn fixed(css: &'static str) -> Selector {
    Selector::parse(css).expect("static selector literal is valid")
}

pub static IMAGE: LazyLock<Selector> = LazyLock::new(|| fixed("img"));
pub static ANCHOR_WITH_HREF: LazyLock<Selector> = LazyLock::new(|| fixed("a[href]"));
pub static ANCHOR: LazyLock<Selector> = LazyLock::new(|| fixed("a"));
pub static TEXT_BEARING: LazyLock<Selector> = LazyLock::new(|| fixed("span, p, div"));
pub static CONTAINER: LazyLock<Selector> = LazyLock::new(|| fixed("div"));

/// The element itself if it is an anchor, otherwise its nearest anchor ancestor
#[must_use]
pub fn closest_anchor(element: ElementRef<'_>) -> Option<ElementRef<'_>> {
    if element.value().name() == "a" {
        return Some(element);
    }
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|ancestor| ancestor.value().name() == "a")
}
