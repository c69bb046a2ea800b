//! Chrome discovery, managed download and launch
//!
//! Setup problems surface as `anyhow` errors with context; the session layer
//! turns them into `SessionLaunchFailure`.

use anyhow::{Context, Result};
use chromiumoxide::browser::{Browser, BrowserConfigBuilder, HeadlessMode};
use chromiumoxide::cdp::browser_protocol::page::AddScriptToEvaluateOnNewDocumentParams;
use chromiumoxide::fetcher::{BrowserFetcher, BrowserFetcherOptions};
use chromiumoxide::handler::viewport::Viewport;
use futures::StreamExt;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;
use tokio::task::{self, JoinHandle};
use tracing::{error, info, trace, warn};

use crate::utils::{CHROME_USER_AGENT, VIEWPORT_HEIGHT, VIEWPORT_WIDTH};

/// Everything needed to start one isolated browser
#[derive(Debug, Clone)]
pub struct LaunchOptions {
    pub headless: bool,
    /// Unique profile directory, created here and removed by the session
    pub user_data_dir: PathBuf,
    /// Explicit executable, skipping discovery
    pub executable: Option<PathBuf>,
    /// Per-CDP-command timeout
    pub request_timeout: Duration,
}

/// Find Chrome/Chromium on this machine
///
/// An explicit `preferred` path wins when it exists. Otherwise well-known
/// install locations are checked, then `which` on Unix.
pub fn find_browser_executable(preferred: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = preferred {
        if path.exists() {
            info!(stage = "launch", "Using configured browser: {}", path.display());
            return Ok(path.to_path_buf());
        }
        warn!(
            stage = "launch",
            "Configured browser path does not exist: {}",
            path.display()
        );
    }

    let candidates: &[&str] = if cfg!(target_os = "windows") {
        &[
            r"%PROGRAMFILES%\Google\Chrome\Application\chrome.exe",
            r"%PROGRAMFILES(X86)%\Google\Chrome\Application\chrome.exe",
            r"%LOCALAPPDATA%\Google\Chrome\Application\chrome.exe",
            r"C:\Program Files\Chromium\Application\chrome.exe",
        ]
    } else if cfg!(target_os = "macos") {
        &[
            "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
            "/Applications/Chromium.app/Contents/MacOS/Chromium",
            "~/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
            "/opt/homebrew/bin/chromium",
        ]
    } else {
        &[
            "/usr/bin/google-chrome",
            "/usr/bin/google-chrome-stable",
            "/usr/bin/chromium",
            "/usr/bin/chromium-browser",
            "/snap/bin/chromium",
        ]
    };

    for raw in candidates {
        let path = if let Some(rest) = raw.strip_prefix("~/") {
            match dirs::home_dir() {
                Some(home) => home.join(rest),
                None => continue,
            }
        } else if raw.contains('%') {
            PathBuf::from(expand_windows_env_vars(raw))
        } else {
            PathBuf::from(raw)
        };

        if path.exists() {
            info!(stage = "launch", "Found browser at: {}", path.display());
            return Ok(path);
        }
    }

    if !cfg!(target_os = "windows") {
        for cmd in ["chromium", "chromium-browser", "google-chrome"] {
            if let Ok(output) = Command::new("which").arg(cmd).output()
                && output.status.success()
            {
                let found = String::from_utf8_lossy(&output.stdout).trim().to_string();
                if !found.is_empty() {
                    info!(stage = "launch", "Found browser via which: {found}");
                    return Ok(PathBuf::from(found));
                }
            }
        }
    }

    Err(anyhow::anyhow!("Chrome/Chromium executable not found"))
}

/// Run discovery off the async runtime, since `which` blocks
pub async fn locate_browser(preferred: Option<PathBuf>) -> Result<PathBuf> {
    task::spawn_blocking(move || find_browser_executable(preferred.as_deref()))
        .await
        .context("Browser discovery task failed")?
}

/// Replace `%VAR%` tokens with environment values
///
/// Unknown variables and unterminated tokens are kept as written.
fn expand_windows_env_vars(path: &str) -> String {
    let mut result = String::with_capacity(path.len());
    let mut rest = path;

    while let Some(start) = rest.find('%') {
        result.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        match after.find('%') {
            Some(0) => {
                result.push('%');
                rest = &after[1..];
            }
            Some(end) => {
                let name = &after[..end];
                match std::env::var(name) {
                    Ok(value) => result.push_str(&value),
                    Err(_) => {
                        result.push('%');
                        result.push_str(name);
                        result.push('%');
                    }
                }
                rest = &after[end + 1..];
            }
            None => {
                result.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    result.push_str(rest);
    result
}

/// Download a Chromium build into the user cache directory
pub async fn download_managed_browser() -> Result<PathBuf> {
    info!(stage = "launch", "No local browser, downloading managed Chromium");

    let cache_dir = dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("notescrape")
        .join("chromium");

    tokio::fs::create_dir_all(&cache_dir)
        .await
        .context("Failed to create browser cache directory")?;

    let fetcher = BrowserFetcher::new(
        BrowserFetcherOptions::builder()
            .with_path(&cache_dir)
            .build()
            .context("Failed to build fetcher options")?,
    );
    let revision = fetcher.fetch().await.context("Failed to fetch browser")?;

    info!(
        stage = "launch",
        "Downloaded Chromium to: {}",
        revision.folder_path.display()
    );
    Ok(revision.executable_path)
}

/// Launch Chrome with the fixed desktop identity and spawn its CDP handler
///
/// The returned handler task must be aborted once the browser is closed.
pub async fn launch_browser(options: &LaunchOptions) -> Result<(Browser, JoinHandle<()>)> {
    let executable = match locate_browser(options.executable.clone()).await {
        Ok(path) => path,
        Err(_) => download_managed_browser().await?,
    };

    tokio::fs::create_dir_all(&options.user_data_dir)
        .await
        .context("Failed to create browser profile directory")?;

    let viewport = Viewport {
        width: VIEWPORT_WIDTH,
        height: VIEWPORT_HEIGHT,
        ..Viewport::default()
    };

    let mut builder = BrowserConfigBuilder::default()
        .request_timeout(options.request_timeout)
        .window_size(VIEWPORT_WIDTH, VIEWPORT_HEIGHT)
        .viewport(viewport)
        .user_data_dir(&options.user_data_dir)
        .chrome_executable(executable);

    builder = if options.headless {
        builder.headless_mode(HeadlessMode::default())
    } else {
        builder.with_head()
    };

    let config = builder
        .arg(format!("--user-agent={CHROME_USER_AGENT}"))
        .arg("--lang=zh-CN")
        .arg("--disable-blink-features=AutomationControlled")
        .arg("--disable-infobars")
        .arg("--disable-notifications")
        .arg("--disable-dev-shm-usage")
        .arg("--no-first-run")
        .arg("--no-default-browser-check")
        .arg("--no-sandbox")
        .arg("--disable-setuid-sandbox")
        .arg("--mute-audio")
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build browser config: {e}"))?;

    let (browser, mut handler) = Browser::launch(config)
        .await
        .context("Failed to launch browser")?;

    let handler_task = task::spawn(async move {
        while let Some(event) = handler.next().await {
            if let Err(e) = event {
                let message = e.to_string();
                // chromiumoxide cannot decode every CDP event Chrome emits
                if message.contains("data did not match any variant of untagged enum Message")
                    || message.contains("Failed to deserialize WS response")
                {
                    trace!("Suppressed benign CDP serialization error: {message}");
                } else {
                    error!(stage = "launch", "Browser handler error: {e:?}");
                }
            }
        }
        trace!("Browser handler task completed");
    });

    Ok((browser, handler_task))
}

/// Hide the usual automation fingerprints from every document the page loads
pub async fn apply_stealth_measures(page: &chromiumoxide::Page) -> Result<()> {
    const STEALTH_JS: &str = r"
        Object.defineProperty(navigator, 'webdriver', { get: () => undefined });
        Object.defineProperty(navigator, 'languages', { get: () => ['zh-CN', 'zh', 'en'] });
        window.chrome = window.chrome || { runtime: {} };
    ";

    page.execute(AddScriptToEvaluateOnNewDocumentParams::new(STEALTH_JS))
        .await
        .context("Failed to install stealth script")?;
    Ok(())
}
