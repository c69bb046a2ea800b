//! Live-or-synthetic decision
//!
//! | mode | attempt | non-empty | empty | failure |
//! |---|---|---|---|---|
//! | local | live extraction | live items | mock items | mock items |
//! | production | skipped | | | mock items |
//!
//! Mechanical failures stop here. They are logged and replaced, never
//! retried and never returned to the caller as errors.

use tracing::{info, warn};

use super::runtime::RuntimeContext;
use crate::content::mock::generate_mock_items;
use crate::content::types::ContentItem;
use crate::extraction::errors::ErrorKind;
use crate::extraction::orchestrator::{ExtractionOrchestrator, ExtractionOutcome};
use crate::session::SessionLauncher;

/// Where the items in a response came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    /// Live extraction produced `count` items
    Live { count: usize },
    /// Live extraction ran but accepted nothing
    LiveEmpty,
    /// Live extraction hit a mechanical fault
    LiveFailed { kind: ErrorKind },
    /// Production mode, extraction skipped
    ProductionSynthetic,
    /// The request failed outright
    ServiceUnavailable,
}

impl Provenance {
    #[must_use]
    pub fn is_synthetic(self) -> bool {
        !matches!(self, Provenance::Live { .. })
    }

    /// Human-readable note for a response carrying `total` items
    #[must_use]
    pub fn note(self, total: usize) -> String {
        match self {
            Provenance::Live { count } => format!("本地环境成功抓取到 {count} 条真实数据"),
            Provenance::LiveEmpty => {
                format!("本地环境未获取到有效数据，展示高质量模拟数据 ({total}条)")
            }
            Provenance::LiveFailed { .. } => {
                format!("本地环境真实抓取失败，展示高质量模拟数据 ({total}条)")
            }
            Provenance::ProductionSynthetic => {
                format!("生产环境展示高质量模拟数据 ({total}条) - 本地开发可获取真实数据")
            }
            Provenance::ServiceUnavailable => "服务暂时不可用，展示模拟数据".to_string(),
        }
    }
}

/// Items for one request plus how they were obtained
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub items: Vec<ContentItem>,
    pub provenance: Provenance,
}

impl Resolution {
    fn synthetic(keyword: &str, provenance: Provenance) -> Self {
        Self {
            items: generate_mock_items(keyword),
            provenance,
        }
    }
}

/// Chooses between live extraction and synthetic data per request
#[derive(Debug)]
pub struct ExecutionPolicy<L> {
    orchestrator: ExtractionOrchestrator<L>,
}

impl<L: SessionLauncher> ExecutionPolicy<L> {
    pub fn new(orchestrator: ExtractionOrchestrator<L>) -> Self {
        Self { orchestrator }
    }

    /// Resolve `keyword` to a non-empty item list
    pub async fn resolve(&self, keyword: &str, runtime: &RuntimeContext) -> Resolution {
        if !runtime.is_local() {
            info!(
                stage = "policy",
                platform = runtime.platform.as_deref().unwrap_or("unknown"),
                "Production mode, serving synthetic data"
            );
            return Resolution::synthetic(keyword, Provenance::ProductionSynthetic);
        }

        info!(stage = "policy", "Local mode, attempting live extraction");
        match self.orchestrator.extract(keyword).await {
            ExtractionOutcome::Success(items) if !items.is_empty() => {
                let count = items.len();
                info!(stage = "policy", count, "Serving live data");
                Resolution {
                    items,
                    provenance: Provenance::Live { count },
                }
            }
            ExtractionOutcome::Success(_) => {
                warn!(
                    stage = "policy",
                    "Live extraction accepted no items, serving synthetic data"
                );
                Resolution::synthetic(keyword, Provenance::LiveEmpty)
            }
            ExtractionOutcome::Failure { kind, detail } => {
                warn!(
                    stage = "policy",
                    %kind,
                    "Live extraction failed, serving synthetic data: {detail}"
                );
                Resolution::synthetic(keyword, Provenance::LiveFailed { kind })
            }
        }
    }
}
