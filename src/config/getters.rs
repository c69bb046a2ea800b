//! Getter methods for `ScrapeConfig`

use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use super::types::ScrapeConfig;
use crate::pipeline::runtime::{ExecutionMode, RuntimeContext};

impl ScrapeConfig {
    #[must_use]
    pub fn bind(&self) -> SocketAddr {
        self.bind
    }

    #[must_use]
    pub fn mode(&self) -> ExecutionMode {
        self.mode
    }

    #[must_use]
    pub fn platform(&self) -> Option<&str> {
        self.platform.as_deref()
    }

    #[must_use]
    pub fn headless(&self) -> bool {
        self.headless
    }

    #[must_use]
    pub fn chromium_path(&self) -> Option<&Path> {
        self.chromium_path.as_deref()
    }

    #[must_use]
    pub fn attempt_timeout(&self) -> Duration {
        Duration::from_secs(self.attempt_timeout_secs)
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    #[must_use]
    pub fn navigation_timeout_secs(&self) -> u64 {
        self.navigation_timeout_secs
    }

    #[must_use]
    pub fn cdp_request_timeout(&self) -> Duration {
        Duration::from_secs(self.cdp_request_timeout_secs)
    }

    #[must_use]
    pub fn expose_debug(&self) -> bool {
        self.expose_debug
    }

    /// The runtime signals the execution policy branches on
    #[must_use]
    pub fn runtime_context(&self) -> RuntimeContext {
        RuntimeContext {
            mode: self.mode,
            platform: self.platform.clone(),
        }
    }
}
