//! One extraction attempt, end to end
//!
//! Launch, search, snapshot, close, then parse. The session is owned here,
//! outside the timed future, so `close()` runs whether the attempt
//! succeeded, failed or ran out of time.

use std::time::Duration;

use tokio::time::{Instant, timeout_at};
use tracing::{info, warn};

use super::errors::{ErrorKind, Result, ScrapeError};
use super::fields::extract_from_html;
use crate::content::types::ContentItem;
use crate::session::{BrowsingSession, SessionLauncher};

/// Result of one attempt, consumed immediately by the execution policy
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionOutcome {
    /// Zero or more accepted items, in page order
    Success(Vec<ContentItem>),
    /// A mechanical fault ended the attempt
    Failure { kind: ErrorKind, detail: String },
}

impl ExtractionOutcome {
    fn from_error(error: &ScrapeError) -> Self {
        ExtractionOutcome::Failure {
            kind: error.kind(),
            detail: error.to_string(),
        }
    }
}

/// Drives a single live extraction under an outer wall-clock budget
#[derive(Debug)]
pub struct ExtractionOrchestrator<L> {
    launcher: L,
    attempt_timeout: Duration,
}

impl<L: SessionLauncher> ExtractionOrchestrator<L> {
    pub fn new(launcher: L, attempt_timeout: Duration) -> Self {
        Self {
            launcher,
            attempt_timeout,
        }
    }

    /// Run one attempt for `keyword`
    ///
    /// Never panics on mechanical failure and never retries.
    pub async fn extract(&self, keyword: &str) -> ExtractionOutcome {
        let deadline = Instant::now() + self.attempt_timeout;

        let html = match self.fetch_snapshot(keyword, deadline).await {
            Ok(html) => html,
            Err(e) => {
                warn!(stage = "snapshot", kind = %e.kind(), "Extraction attempt failed: {e}");
                return ExtractionOutcome::from_error(&e);
            }
        };

        let items = extract_from_html(&html, keyword);
        info!(stage = "fields", items = items.len(), "Extraction attempt finished");
        ExtractionOutcome::Success(items)
    }

    async fn fetch_snapshot(&self, keyword: &str, deadline: Instant) -> Result<String> {
        let budget_secs = self.attempt_timeout.as_secs();
        let timed_out = || ScrapeError::AttemptTimeout { secs: budget_secs };

        let mut session = timeout_at(deadline, self.launcher.launch())
            .await
            .map_err(|_| timed_out())??;

        let result = match timeout_at(deadline, drive(&mut session, keyword)).await {
            Ok(result) => result,
            Err(_) => Err(timed_out()),
        };

        session.close().await;
        result
    }
}

async fn drive<S: BrowsingSession>(session: &mut S, keyword: &str) -> Result<String> {
    session.search(keyword).await?;
    session.snapshot_html().await
}
