//! chromiumoxide-backed sessions
//!
//! Each session owns one Chrome process, its CDP handler task and a
//! uuid-named profile directory under the system temp dir.

use chromiumoxide::browser::Browser;
use chromiumoxide::cdp::browser_protocol::network::SetUserAgentOverrideParams;
use chromiumoxide::page::Page;
use std::path::PathBuf;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::page_helpers::{
    find_first_element, get_page_url_with_fallback, settle, wait_for_network_idle,
    with_stage_timeout,
};
use super::{BrowsingSession, SessionLauncher};
use crate::browser_setup::{LaunchOptions, apply_stealth_measures, launch_browser};
use crate::config::ScrapeConfig;
use crate::extraction::errors::{Result, ScrapeError};
use crate::extraction::selectors::SEARCH_INPUT_QUERIES;
use crate::utils::{CHROME_USER_AGENT, PLATFORM_ORIGIN};

const NETWORK_IDLE_MAX: Duration = Duration::from_secs(10);
const AFTER_NAVIGATION_SETTLE: Duration = Duration::from_secs(3);
const SEARCH_INPUT_POLL: Duration = Duration::from_secs(5);
const AFTER_SUBMIT_SETTLE: Duration = Duration::from_secs(5);
const AFTER_SCROLL_SETTLE: Duration = Duration::from_secs(3);
const INTERACTION_TIMEOUT: Duration = Duration::from_secs(10);

const CLEAR_INPUT_JS: &str = "function() { this.value = ''; }";
const SCROLL_TO_MIDDLE_JS: &str = "window.scrollTo(0, document.body.scrollHeight / 2)";

/// Launches one Chrome per extraction attempt
#[derive(Debug, Clone)]
pub struct ChromeLauncher {
    config: ScrapeConfig,
}

impl ChromeLauncher {
    #[must_use]
    pub fn new(config: &ScrapeConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }
}

impl SessionLauncher for ChromeLauncher {
    type Session = ChromeSession;

    async fn launch(&self) -> Result<ChromeSession> {
        let user_data_dir =
            std::env::temp_dir().join(format!("notescrape_chrome_{}", Uuid::new_v4()));
        let options = LaunchOptions {
            headless: self.config.headless(),
            user_data_dir: user_data_dir.clone(),
            executable: self.config.chromium_path().map(PathBuf::from),
            request_timeout: self.config.cdp_request_timeout(),
        };

        info!(stage = "launch", profile = %user_data_dir.display(), "Launching browser");
        let (browser, handler) = match launch_browser(&options).await {
            Ok(launched) => launched,
            Err(e) => {
                remove_profile_dir(&user_data_dir);
                return Err(e.into());
            }
        };

        let mut session = ChromeSession {
            browser,
            handler,
            page: None,
            user_data_dir: Some(user_data_dir),
            navigation_timeout_secs: self.config.navigation_timeout_secs(),
        };

        if let Err(e) = session.open_page().await {
            session.close().await;
            return Err(e);
        }
        Ok(session)
    }
}

/// One live Chrome browsing context
pub struct ChromeSession {
    browser: Browser,
    handler: JoinHandle<()>,
    page: Option<Page>,
    user_data_dir: Option<PathBuf>,
    navigation_timeout_secs: u64,
}

impl std::fmt::Debug for ChromeSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChromeSession")
            .field("has_page", &self.page.is_some())
            .field("user_data_dir", &self.user_data_dir)
            .finish_non_exhaustive()
    }
}

impl ChromeSession {
    async fn open_page(&mut self) -> Result<()> {
        let page = self
            .browser
            .new_page("about:blank")
            .await
            .map_err(|e| ScrapeError::SessionLaunchFailure(format!("Failed to open page: {e}")))?;

        page.set_user_agent(SetUserAgentOverrideParams::new(CHROME_USER_AGENT))
            .await
            .map_err(|e| {
                ScrapeError::SessionLaunchFailure(format!("Failed to set user agent: {e}"))
            })?;

        if let Err(e) = apply_stealth_measures(&page).await {
            warn!(stage = "launch", "Stealth script not installed: {e:#}");
        }

        self.page = Some(page);
        Ok(())
    }

    fn page(&self) -> Result<&Page> {
        self.page
            .as_ref()
            .ok_or_else(|| ScrapeError::browser("page", "session has no open page"))
    }

    async fn navigate_to_origin(&self) -> Result<()> {
        let page = self.page()?;
        let secs = self.navigation_timeout_secs;

        match tokio::time::timeout(Duration::from_secs(secs), page.goto(PLATFORM_ORIGIN)).await {
            Ok(Ok(_)) => {}
            Ok(Err(e)) => return Err(ScrapeError::browser("navigate", e)),
            Err(_) => {
                return Err(ScrapeError::NavigationTimeout {
                    url: PLATFORM_ORIGIN.to_string(),
                    secs,
                });
            }
        }

        wait_for_network_idle(page, NETWORK_IDLE_MAX).await;
        let url = get_page_url_with_fallback(page).await;
        info!(stage = "navigate", %url, "Platform loaded");
        Ok(())
    }

    async fn submit_keyword(&self, keyword: &str) -> Result<()> {
        let page = self.page()?;

        let Some((query, input)) =
            find_first_element(page, SEARCH_INPUT_QUERIES, SEARCH_INPUT_POLL).await
        else {
            return Err(ScrapeError::SearchControlNotFound {
                tried: SEARCH_INPUT_QUERIES.len(),
            });
        };
        info!(stage = "search_input", query, "Search input located");

        with_stage_timeout(
            async {
                input.click().await.map_err(|e| ScrapeError::browser("submit", e))?;
                input
                    .call_js_fn(CLEAR_INPUT_JS, false)
                    .await
                    .map_err(|e| ScrapeError::browser("submit", e))?;
                input.type_str(keyword).await.map_err(|e| ScrapeError::browser("submit", e))?;
                input.press_key("Enter").await.map_err(|e| ScrapeError::browser("submit", e))?;
                Ok(())
            },
            INTERACTION_TIMEOUT,
            "submit",
        )
        .await?;

        debug!(stage = "submit", "Keyword submitted");
        Ok(())
    }

    async fn scroll_results(&self) -> Result<()> {
        let page = self.page()?;
        with_stage_timeout(
            async {
                page.evaluate(SCROLL_TO_MIDDLE_JS)
                    .await
                    .map(|_| ())
                    .map_err(|e| ScrapeError::browser("scroll", e))
            },
            INTERACTION_TIMEOUT,
            "scroll",
        )
        .await
    }
}

impl BrowsingSession for ChromeSession {
    async fn search(&mut self, keyword: &str) -> Result<()> {
        self.navigate_to_origin().await?;
        settle("navigate", AFTER_NAVIGATION_SETTLE).await;

        self.submit_keyword(keyword).await?;
        settle("submit", AFTER_SUBMIT_SETTLE).await;

        self.scroll_results().await?;
        settle("scroll", AFTER_SCROLL_SETTLE).await;
        Ok(())
    }

    async fn snapshot_html(&mut self) -> Result<String> {
        let page = self.page()?;
        let html = with_stage_timeout(
            async { page.content().await.map_err(|e| ScrapeError::browser("snapshot", e)) },
            INTERACTION_TIMEOUT,
            "snapshot",
        )
        .await?;
        info!(stage = "snapshot", bytes = html.len(), "Captured result page");
        Ok(html)
    }

    async fn close(mut self) {
        if let Some(page) = self.page.take()
            && let Err(e) = page.close().await
        {
            debug!(stage = "close", "Failed to close page: {e}");
        }

        if let Err(e) = self.browser.close().await {
            warn!(stage = "close", "Failed to close browser: {e}");
        }
        if let Err(e) = self.browser.wait().await {
            warn!(stage = "close", "Failed to wait for browser exit: {e}");
        }

        self.handler.abort();
        if let Some(dir) = self.user_data_dir.take() {
            remove_profile_dir(&dir);
        }
        debug!(stage = "close", "Browser session closed");
    }
}

impl Drop for ChromeSession {
    fn drop(&mut self) {
        self.handler.abort();
        if let Some(dir) = self.user_data_dir.take() {
            warn!(stage = "close", "Session dropped without close(), removing profile");
            remove_profile_dir(&dir);
        }
    }
}

fn remove_profile_dir(dir: &std::path::Path) {
    match std::fs::remove_dir_all(dir) {
        Ok(()) => debug!(stage = "close", "Removed profile {}", dir.display()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => warn!(stage = "close", "Failed to remove profile {}: {e}", dir.display()),
    }
}
