//! Candidate discovery
//!
//! Walks [`CANDIDATES`] in order and stops at the first query that matches
//! anything, even if a later query would match more. When every query comes
//! back empty, a structural scan over `div` containers recovers from total
//! markup drift at the cost of precision.

use scraper::{ElementRef, Html};
use tracing::debug;

use super::selectors::{
    ANCHOR, CANDIDATES, CONTAINER, IMAGE, QueryScope, TEXT_BEARING, closest_anchor,
};
use crate::utils::{MAX_CANDIDATES, char_len};

/// Minimum text length for a structural fallback container
const FALLBACK_MIN_TEXT_CHARS: usize = 10;

/// Which cascade stage produced the candidates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateSource {
    Query(&'static str),
    StructuralFallback,
    Nothing,
}

/// Candidate elements for one page snapshot, capped at [`MAX_CANDIDATES`]
#[derive(Debug)]
pub struct CandidateSet<'a> {
    pub elements: Vec<ElementRef<'a>>,
    pub source: CandidateSource,
}

impl CandidateSet<'_> {
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

/// Run the cascade over a parsed page
#[must_use]
pub fn find_candidates(document: &Html) -> CandidateSet<'_> {
    for query in CANDIDATES.iter() {
        let mut elements = query.select_in(&document);
        debug!(
            stage = "cascade",
            query = query.name(),
            found = elements.len(),
            "Tried candidate query"
        );
        if !elements.is_empty() {
            elements.truncate(MAX_CANDIDATES);
            return CandidateSet {
                elements,
                source: CandidateSource::Query(query.name()),
            };
        }
    }

    let elements = structural_fallback(document);
    debug!(
        stage = "cascade",
        found = elements.len(),
        "All candidate queries empty, used structural fallback"
    );

    let source = if elements.is_empty() {
        CandidateSource::Nothing
    } else {
        CandidateSource::StructuralFallback
    };
    CandidateSet { elements, source }
}

/// Containers holding an image, some text and a link at the same time
fn structural_fallback(document: &Html) -> Vec<ElementRef<'_>> {
    document
        .select_all(&CONTAINER)
        .into_iter()
        .filter(|el| looks_like_note(*el))
        .take(MAX_CANDIDATES)
        .collect()
}

fn looks_like_note(element: ElementRef<'_>) -> bool {
    let has_image = element.select_first(&IMAGE).is_some();
    let has_text = element.select_first(&TEXT_BEARING).is_some();
    let has_link = element.select_first(&ANCHOR).is_some() || closest_anchor(element).is_some();

    has_image
        && has_text
        && has_link
        && char_len(element.text().collect::<String>().trim()) > FALLBACK_MIN_TEXT_CHARS
}
