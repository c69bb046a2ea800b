//! Browser sessions
//!
//! One session is one isolated browsing context, launched per extraction
//! attempt and released on every exit path. The traits are the seam the
//! orchestrator is written against; [`chrome`] is the chromiumoxide
//! implementation used in production.

pub mod chrome;
pub mod page_helpers;

use std::future::Future;

use crate::extraction::errors::Result;

pub use chrome::{ChromeLauncher, ChromeSession};

/// Starts fresh browsing sessions
pub trait SessionLauncher: Send + Sync {
    type Session: BrowsingSession;

    /// Launch one isolated session
    ///
    /// Failures map to `SessionLaunchFailure`.
    fn launch(&self) -> impl Future<Output = Result<Self::Session>> + Send;
}

/// One live browsing context
pub trait BrowsingSession: Send {
    /// Load the platform, find its search box and submit `keyword`
    ///
    /// Returns once the result page has settled and been scrolled.
    fn search(&mut self, keyword: &str) -> impl Future<Output = Result<()>> + Send;

    /// Rendered HTML of the current page
    fn snapshot_html(&mut self) -> impl Future<Output = Result<String>> + Send;

    /// Release every resource the session holds
    ///
    /// Never fails; teardown problems are logged.
    fn close(self) -> impl Future<Output = ()> + Send;
}
