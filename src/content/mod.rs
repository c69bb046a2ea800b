//! Content data model and the leaf components that produce it
//!
//! - [`types`]: the `ContentItem` output contract
//! - [`counts`]: parsing, rendering and synthesis of engagement counters
//! - [`mock`]: the synthetic result set used whenever live data is unavailable

pub mod counts;
pub mod mock;
pub mod types;

pub use counts::{CountLabel, SynthesisRanges, format_count, parse_count};
pub use mock::generate_mock_items;
pub use types::ContentItem;
