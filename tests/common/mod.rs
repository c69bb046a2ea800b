//! Shared fixtures for the notescrape integration tests

use notescrape::extraction::errors::{Result, ScrapeError};
use notescrape::{BrowsingSession, SessionLauncher};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// What a scripted session does when driven
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub enum Script {
    /// `launch()` fails
    LaunchError,
    /// `search()` fails with the given error
    SearchError(ScrapeError),
    /// `snapshot_html()` fails
    SnapshotError,
    /// Everything succeeds and the snapshot returns this HTML
    Page(String),
    /// `search()` never finishes
    Hang,
}

/// Launch and close counters shared with the test body
#[derive(Debug, Clone, Default)]
pub struct Counters {
    launches: Arc<AtomicUsize>,
    closes: Arc<AtomicUsize>,
}

#[allow(dead_code)]
impl Counters {
    pub fn launches(&self) -> usize {
        self.launches.load(Ordering::SeqCst)
    }

    pub fn closes(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }
}

/// Launcher whose sessions follow a fixed script
#[derive(Debug, Clone)]
pub struct ScriptedLauncher {
    script: Script,
    counters: Counters,
}

#[allow(dead_code)]
impl ScriptedLauncher {
    pub fn new(script: Script) -> (Self, Counters) {
        let counters = Counters::default();
        (
            Self {
                script,
                counters: counters.clone(),
            },
            counters,
        )
    }
}

impl SessionLauncher for ScriptedLauncher {
    type Session = ScriptedSession;

    async fn launch(&self) -> Result<ScriptedSession> {
        self.counters.launches.fetch_add(1, Ordering::SeqCst);
        if matches!(self.script, Script::LaunchError) {
            return Err(ScrapeError::SessionLaunchFailure("no browser".into()));
        }
        Ok(ScriptedSession {
            script: self.script.clone(),
            closes: Arc::clone(&self.counters.closes),
        })
    }
}

#[derive(Debug)]
pub struct ScriptedSession {
    script: Script,
    closes: Arc<AtomicUsize>,
}

impl BrowsingSession for ScriptedSession {
    async fn search(&mut self, _keyword: &str) -> Result<()> {
        match &self.script {
            Script::SearchError(e) => Err(e.clone()),
            Script::Hang => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Ok(())
            }
            _ => Ok(()),
        }
    }

    async fn snapshot_html(&mut self) -> Result<String> {
        match &self.script {
            Script::Page(html) => Ok(html.clone()),
            _ => Err(ScrapeError::browser("snapshot", "target closed")),
        }
    }

    async fn close(self) {
        self.closes.fetch_add(1, Ordering::SeqCst);
    }
}

/// One note card in the platform's current markup
#[allow(dead_code)]
pub fn note_card(title: &str, author: &str, href: &str, img: &str, counters: &str) -> String {
    format!(
        r#"<section role="listitem">
            <a href="{href}"><img src="{img}"></a>
            <div class="footer">
                <span class="title">{title}</span>
                <span class="author">{author}</span>
                <span>{counters}</span>
            </div>
        </section>"#
    )
}

/// Full result page wrapping `cards`
#[allow(dead_code)]
pub fn result_page(cards: &[String]) -> String {
    format!(
        "<!DOCTYPE html><html><head><title>搜索结果</title></head><body><div class=\"feeds\">{}</div></body></html>",
        cards.concat()
    )
}
