//! Adaptive extraction pipeline
//!
//! Turns a rendered result page into [`ContentItem`](crate::content::ContentItem)s
//! without knowing its markup in advance: [`cascade`] finds candidates,
//! [`fields`] pulls each item apart and [`orchestrator`] runs the browser
//! attempt around both.

pub mod cascade;
pub mod errors;
pub mod fields;
pub mod orchestrator;
pub mod selectors;

pub use cascade::{CandidateSet, CandidateSource, find_candidates};
pub use errors::{ErrorKind, Result, ScrapeError};
pub use fields::{FieldExtractor, FieldResolution, FieldSource, TitleRejection, extract_from_html};
pub use orchestrator::{ExtractionOrchestrator, ExtractionOutcome};
pub use selectors::{QueryDescriptor, QueryKind};
