//! Live browser tests. They need Chrome (or a download) and network access
//! to the platform, so they only run with `--ignored`.

use notescrape::{
    BrowsingSession, ChromeLauncher, ExtractionOrchestrator, ScrapeConfig, SessionLauncher,
};
use std::time::Duration;

#[tokio::test]
#[ignore] // Requires browser installation
async fn chrome_session_launches_and_closes() {
    let config = ScrapeConfig::default();
    let launcher = ChromeLauncher::new(&config);

    let mut session = launcher.launch().await.expect("launch chrome");
    let html = session.snapshot_html().await.expect("snapshot blank page");
    assert!(html.contains("<html"));
    session.close().await;
}

#[tokio::test]
#[ignore] // Requires browser installation and network access
async fn live_extraction_returns_an_outcome() {
    let config = ScrapeConfig::default();
    let orchestrator =
        ExtractionOrchestrator::new(ChromeLauncher::new(&config), Duration::from_secs(45));

    // Either outcome is acceptable; the platform may require login.
    let outcome = orchestrator.extract("摄影").await;
    println!("{outcome:?}");
}
