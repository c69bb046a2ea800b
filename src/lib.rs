pub mod browser_setup;
pub mod config;
pub mod content;
pub mod extraction;
pub mod pipeline;
pub mod server;
pub mod session;
pub mod utils;

pub use browser_setup::{
    LaunchOptions, apply_stealth_measures, download_managed_browser, find_browser_executable,
    launch_browser,
};
pub use config::ScrapeConfig;
pub use content::{ContentItem, generate_mock_items};
pub use extraction::{
    ErrorKind, ExtractionOrchestrator, ExtractionOutcome, FieldExtractor, ScrapeError,
    extract_from_html, find_candidates,
};
pub use pipeline::{
    ExecutionMode, ExecutionPolicy, Provenance, Resolution, RuntimeContext, assemble_fatal,
    assemble_success, validate_keyword,
};
pub use server::{AppState, SCRAPE_ROUTE, ScrapeServer, router};
pub use session::{BrowsingSession, ChromeLauncher, ChromeSession, SessionLauncher};
