//! Error taxonomy for the extraction pipeline
//!
//! `ScrapeError` carries the detail; `ErrorKind` is the classification the
//! execution policy branches on. Only `InvalidInput` and
//! `FatalAssemblyFailure` ever reach the HTTP boundary. Every other kind is
//! mechanical and gets replaced by synthetic data.

use serde::Serialize;
use thiserror::Error;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Classification of a pipeline failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidInput,
    SearchControlNotFound,
    NavigationTimeout,
    SessionLaunchFailure,
    AttemptTimeout,
    Browser,
    FatalAssemblyFailure,
}

impl ErrorKind {
    /// Mechanical failures belong to the live extraction attempt and are
    /// recovered by falling back to synthetic data
    #[must_use]
    pub fn is_mechanical(self) -> bool {
        matches!(
            self,
            ErrorKind::SearchControlNotFound
                | ErrorKind::NavigationTimeout
                | ErrorKind::SessionLaunchFailure
                | ErrorKind::AttemptTimeout
                | ErrorKind::Browser
        )
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::InvalidInput => "invalid_input",
            ErrorKind::SearchControlNotFound => "search_control_not_found",
            ErrorKind::NavigationTimeout => "navigation_timeout",
            ErrorKind::SessionLaunchFailure => "session_launch_failure",
            ErrorKind::AttemptTimeout => "attempt_timeout",
            ErrorKind::Browser => "browser",
            ErrorKind::FatalAssemblyFailure => "fatal_assembly_failure",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised anywhere in the pipeline
#[derive(Debug, Clone, Error)]
pub enum ScrapeError {
    /// Missing, empty or oversized keyword
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// No selector in the search-input cascade matched
    #[error("search input not found after trying {tried} selectors")]
    SearchControlNotFound { tried: usize },

    /// Target origin did not load within its budget
    #[error("navigation to {url} timed out after {secs}s")]
    NavigationTimeout { url: String, secs: u64 },

    /// The browser could not be started
    #[error("browser session failed to launch: {0}")]
    SessionLaunchFailure(String),

    /// The whole attempt exceeded the outer wall-clock budget
    #[error("extraction attempt exceeded its {secs}s budget")]
    AttemptTimeout { secs: u64 },

    /// Any other automation or protocol fault
    #[error("browser automation failed during {stage}: {message}")]
    Browser { stage: &'static str, message: String },

    /// Failure even on the synthetic path
    #[error("fatal assembly failure: {0}")]
    FatalAssemblyFailure(String),
}

impl ScrapeError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            ScrapeError::InvalidInput(_) => ErrorKind::InvalidInput,
            ScrapeError::SearchControlNotFound { .. } => ErrorKind::SearchControlNotFound,
            ScrapeError::NavigationTimeout { .. } => ErrorKind::NavigationTimeout,
            ScrapeError::SessionLaunchFailure(_) => ErrorKind::SessionLaunchFailure,
            ScrapeError::AttemptTimeout { .. } => ErrorKind::AttemptTimeout,
            ScrapeError::Browser { .. } => ErrorKind::Browser,
            ScrapeError::FatalAssemblyFailure(_) => ErrorKind::FatalAssemblyFailure,
        }
    }

    /// Wrap an automation error raised during `stage`
    pub fn browser(stage: &'static str, error: impl std::fmt::Display) -> Self {
        ScrapeError::Browser {
            stage,
            message: error.to_string(),
        }
    }
}

impl From<anyhow::Error> for ScrapeError {
    fn from(error: anyhow::Error) -> Self {
        ScrapeError::SessionLaunchFailure(format!("{error:#}"))
    }
}
