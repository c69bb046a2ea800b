//! Helpers for chromiumoxide page operations
//!
//! Every browser step runs under its own budget and reports failures as
//! [`ScrapeError`], tagged with the stage it happened in.

use chromiumoxide::element::Element;
use chromiumoxide::page::Page;
use std::future::Future;
use std::time::Duration;
use tokio::time::{Instant, sleep};
use tracing::{debug, trace};

use crate::extraction::errors::{Result, ScrapeError};
use crate::extraction::selectors::QueryDescriptor;

/// Interval between polls of page state
const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Interval between attempts to find an element
const ELEMENT_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Number of resources the page has requested so far
const RESOURCE_COUNT_JS: &str = "performance.getEntriesByType('resource').length";

/// Run a browser step with an explicit timeout
///
/// A timeout becomes a `Browser` error naming `stage`.
pub async fn with_stage_timeout<F, T>(
    operation: F,
    budget: Duration,
    stage: &'static str,
) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match tokio::time::timeout(budget, operation).await {
        Ok(result) => result,
        Err(_) => Err(ScrapeError::Browser {
            stage,
            message: format!("timed out after {}s", budget.as_secs()),
        }),
    }
}

/// Wait until the page stops requesting resources
///
/// Idle means the resource count did not change between two consecutive
/// polls. Gives up quietly after `max_wait`; a busy page is not an error.
pub async fn wait_for_network_idle(page: &Page, max_wait: Duration) {
    let deadline = Instant::now() + max_wait;
    let mut previous: Option<u64> = None;

    while Instant::now() < deadline {
        let current = match page.evaluate(RESOURCE_COUNT_JS).await {
            Ok(result) => result.into_value::<u64>().ok(),
            Err(e) => {
                trace!("Resource count unavailable: {e}");
                None
            }
        };

        if current.is_some() && current == previous {
            debug!(stage = "navigate", resources = current, "Network idle");
            return;
        }
        previous = current;
        sleep(POLL_INTERVAL).await;
    }

    debug!(stage = "navigate", "Network idle wait expired, continuing");
}

/// Try each descriptor in order, polling each for up to `per_query`
///
/// Returns the first element found together with the descriptor name.
pub async fn find_first_element(
    page: &Page,
    queries: &[QueryDescriptor],
    per_query: Duration,
) -> Option<(&'static str, Element)> {
    for query in queries {
        let deadline = Instant::now() + per_query;
        loop {
            match page.find_element(query.css).await {
                Ok(element) => {
                    debug!(stage = "search_input", query = query.name, "Element found");
                    return Some((query.name, element));
                }
                Err(e) => trace!(query = query.name, "Not found yet: {e}"),
            }
            if Instant::now() + ELEMENT_POLL_INTERVAL > deadline {
                break;
            }
            sleep(ELEMENT_POLL_INTERVAL).await;
        }
        debug!(stage = "search_input", query = query.name, "No match within budget");
    }
    None
}

/// Give client-side rendering time to finish
pub async fn settle(stage: &'static str, duration: Duration) {
    trace!(stage, millis = duration.as_millis() as u64, "Settling");
    sleep(duration).await;
}

/// Page URL for diagnostics, `about:blank` when unavailable
pub async fn get_page_url_with_fallback(page: &Page) -> String {
    match page.url().await {
        Ok(Some(url)) => url,
        Ok(None) => "about:blank".to_string(),
        Err(e) => {
            trace!("Failed to get page URL: {e}");
            "about:blank".to_string()
        }
    }
}
