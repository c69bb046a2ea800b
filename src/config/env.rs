//! Environment loading for `ScrapeConfig`
//!
//! Variables are read once at startup:
//!
//! | variable | effect |
//! |---|---|
//! | `NOTESCRAPE_BIND` | listen address, default `127.0.0.1:3000` |
//! | `NOTESCRAPE_ENV`, `APP_ENV` | `development`/`dev`/`local` selects local mode |
//! | `VERCEL` | `1` sets the platform to `vercel` |
//! | `NOTESCRAPE_HEADLESS` | `false`/`0` shows the browser window |
//! | `NOTESCRAPE_ATTEMPT_TIMEOUT_SECS` | live attempt budget |
//! | `NOTESCRAPE_REQUEST_TIMEOUT_SECS` | whole-request budget |
//! | `CHROMIUM_PATH` | Chrome executable override |

use anyhow::{Context, Result};
use std::str::FromStr;

use super::types::ScrapeConfig;
use crate::pipeline::runtime::ExecutionMode;

impl ScrapeConfig {
    /// Load from the process environment on top of the defaults
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from any key lookup on top of the defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut config = Self::default();

        if let Some(bind) = var("NOTESCRAPE_BIND") {
            let addr = bind
                .parse()
                .with_context(|| format!("NOTESCRAPE_BIND is not a socket address: {bind}"))?;
            config = config.with_bind(addr);
        }

        let mode = var("NOTESCRAPE_ENV")
            .or_else(|| var("APP_ENV"))
            .map_or(ExecutionMode::Production, |v| ExecutionMode::from_env_value(&v));
        config = config.with_mode(mode);

        if var("VERCEL").as_deref() == Some("1") {
            config = config.with_platform("vercel");
        }

        if let Some(headless) = var("NOTESCRAPE_HEADLESS") {
            let flag = parse_flag(&headless)
                .with_context(|| format!("NOTESCRAPE_HEADLESS is not a boolean: {headless}"))?;
            config = config.with_headless(flag);
        }

        if let Some(secs) = var("NOTESCRAPE_ATTEMPT_TIMEOUT_SECS") {
            let secs = parse_secs("NOTESCRAPE_ATTEMPT_TIMEOUT_SECS", &secs)?;
            config = config.with_attempt_timeout_secs(secs);
        }
        if let Some(secs) = var("NOTESCRAPE_REQUEST_TIMEOUT_SECS") {
            let secs = parse_secs("NOTESCRAPE_REQUEST_TIMEOUT_SECS", &secs)?;
            config = config.with_request_timeout_secs(secs);
        }

        if let Some(path) = var("CHROMIUM_PATH") {
            config = config.with_chromium_path(path);
        }

        Ok(config)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_secs(key: &str, value: &str) -> Result<u64> {
    let secs = u64::from_str(value).with_context(|| format!("{key} is not a number: {value}"))?;
    anyhow::ensure!(secs > 0, "{key} must be positive");
    Ok(secs)
}
