//! HTTP boundary
//!
//! A single JSON endpoint, `POST /api/scrape`. The server owns the execution
//! policy and the runtime context; handlers only validate, dispatch and
//! serialize.

mod handlers;

use axum::Router;
use axum::routing::post;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::config::ScrapeConfig;
use crate::extraction::orchestrator::ExtractionOrchestrator;
use crate::pipeline::policy::ExecutionPolicy;
use crate::pipeline::runtime::RuntimeContext;
use crate::session::SessionLauncher;

/// Route serving the scrape endpoint
pub const SCRAPE_ROUTE: &str = "/api/scrape";

/// Shared state for handlers
#[derive(Debug)]
pub struct AppState<L> {
    pub policy: ExecutionPolicy<L>,
    pub runtime: RuntimeContext,
    /// Budget for one whole request
    pub request_timeout: Duration,
    /// Include error detail in fatal responses
    pub expose_debug: bool,
}

impl<L: SessionLauncher> AppState<L> {
    /// Wire a launcher into a full pipeline using `config`
    pub fn from_config(launcher: L, config: &ScrapeConfig) -> Self {
        let orchestrator = ExtractionOrchestrator::new(launcher, config.attempt_timeout());
        Self {
            policy: ExecutionPolicy::new(orchestrator),
            runtime: config.runtime_context(),
            request_timeout: config.request_timeout(),
            expose_debug: config.expose_debug(),
        }
    }
}

/// Build the application router
pub fn router<L: SessionLauncher + 'static>(state: Arc<AppState<L>>) -> Router {
    Router::new()
        .route(SCRAPE_ROUTE, post(handlers::handle_scrape::<L>))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// A running server with graceful shutdown
#[derive(Debug)]
pub struct ScrapeServer {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    handle: JoinHandle<()>,
}

impl ScrapeServer {
    /// Bind `bind` (port `0` picks a free port) and serve in a background task
    pub async fn start<L: SessionLauncher + 'static>(
        state: AppState<L>,
        bind: SocketAddr,
    ) -> std::io::Result<Self> {
        let listener = TcpListener::bind(bind).await?;
        let addr = listener.local_addr()?;
        let app = router(Arc::new(state));
        let (tx, rx) = oneshot::channel::<()>();

        info!("notescrape listening on http://{addr}{SCRAPE_ROUTE}");

        let handle = tokio::spawn(async move {
            let serve = axum::serve(listener, app).with_graceful_shutdown(async {
                let _ = rx.await;
            });
            if let Err(e) = serve.await {
                error!("Server error: {e}");
            }
        });

        Ok(Self {
            addr,
            shutdown: Some(tx),
            handle,
        })
    }

    #[must_use]
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Stop accepting connections and wait for in-flight requests
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Err(e) = (&mut self.handle).await {
            error!("Server task ended abnormally: {e}");
        }
    }
}

impl Drop for ScrapeServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
