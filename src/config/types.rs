//! Core configuration type

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::pipeline::runtime::ExecutionMode;

/// Default listen address
pub const DEFAULT_BIND: &str = "127.0.0.1:3000";

/// Outer budget for one live extraction attempt
pub const DEFAULT_ATTEMPT_TIMEOUT_SECS: u64 = 45;

/// Budget for a whole request, including the fallback path
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

/// Budget for navigating to the platform origin
pub const DEFAULT_NAVIGATION_TIMEOUT_SECS: u64 = 30;

/// Per-command CDP timeout
pub const DEFAULT_CDP_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeConfig {
    pub(crate) bind: SocketAddr,
    pub(crate) mode: ExecutionMode,

    /// Hosting platform label, e.g. `vercel`
    pub(crate) platform: Option<String>,

    pub(crate) headless: bool,

    /// Explicit Chrome executable, skipping discovery
    pub(crate) chromium_path: Option<PathBuf>,

    pub(crate) attempt_timeout_secs: u64,
    pub(crate) request_timeout_secs: u64,
    pub(crate) navigation_timeout_secs: u64,
    pub(crate) cdp_request_timeout_secs: u64,

    /// Include error detail in fatal responses
    ///
    /// Defaults to on in local mode only.
    pub(crate) expose_debug: bool,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 3000)),
            mode: ExecutionMode::Production,
            platform: None,
            headless: true,
            chromium_path: None,
            attempt_timeout_secs: DEFAULT_ATTEMPT_TIMEOUT_SECS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            navigation_timeout_secs: DEFAULT_NAVIGATION_TIMEOUT_SECS,
            cdp_request_timeout_secs: DEFAULT_CDP_REQUEST_TIMEOUT_SECS,
            expose_debug: false,
        }
    }
}

impl ScrapeConfig {
    #[must_use]
    pub fn with_bind(mut self, bind: SocketAddr) -> Self {
        self.bind = bind;
        self
    }

    /// Switch execution mode; debug exposure follows the mode
    #[must_use]
    pub fn with_mode(mut self, mode: ExecutionMode) -> Self {
        self.mode = mode;
        self.expose_debug = mode == ExecutionMode::Local;
        self
    }

    #[must_use]
    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = Some(platform.into());
        self
    }

    #[must_use]
    pub fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    #[must_use]
    pub fn with_chromium_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.chromium_path = Some(path.into());
        self
    }

    #[must_use]
    pub fn with_attempt_timeout_secs(mut self, secs: u64) -> Self {
        self.attempt_timeout_secs = secs;
        self
    }

    #[must_use]
    pub fn with_request_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout_secs = secs;
        self
    }
}
