//! Response envelopes

use serde::Serialize;
use std::panic::{AssertUnwindSafe, catch_unwind};
use tracing::{error, info};

use super::policy::{Provenance, Resolution};
use super::runtime::RuntimeContext;
use crate::content::mock::generate_mock_items;
use crate::content::types::ContentItem;
use crate::utils::MAX_ITEMS;

/// Body of a successful response
#[derive(Debug, Clone, Serialize)]
pub struct SuccessEnvelope {
    pub success: bool,
    pub data: Vec<ContentItem>,
    pub total: usize,
    pub keyword: String,
    pub note: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<&'static str>,
}

/// Body of a fatal response
#[derive(Debug, Clone, Serialize)]
pub struct ErrorEnvelope {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<ContentItem>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl ErrorEnvelope {
    /// Client error without any payload
    #[must_use]
    pub fn message(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            debug: None,
            data: None,
            keyword: None,
            note: None,
        }
    }
}

/// Cap the items and attach keyword, note and environment
#[must_use]
pub fn assemble_success(
    resolution: Resolution,
    keyword: &str,
    runtime: &RuntimeContext,
) -> SuccessEnvelope {
    let mut data = resolution.items;
    data.truncate(MAX_ITEMS);
    let total = data.len();

    info!(
        stage = "assemble",
        total,
        provenance = ?resolution.provenance,
        "Response assembled"
    );

    SuccessEnvelope {
        success: true,
        data,
        total,
        keyword: keyword.to_string(),
        note: resolution.provenance.note(total),
        environment: Some(runtime.environment_label()),
    }
}

/// Build the fatal envelope, attaching synthetic items when they can be made
///
/// `detail` is only included when `expose_debug` is set.
#[must_use]
pub fn assemble_fatal(keyword: Option<&str>, detail: &str, expose_debug: bool) -> ErrorEnvelope {
    let data = keyword.and_then(|kw| {
        match catch_unwind(AssertUnwindSafe(|| generate_mock_items(kw))) {
            Ok(mut items) => {
                items.truncate(MAX_ITEMS);
                Some(items)
            }
            Err(_) => {
                error!(stage = "assemble", "Synthetic payload generation panicked");
                None
            }
        }
    });

    let note = data
        .as_ref()
        .map(|items| Provenance::ServiceUnavailable.note(items.len()));

    ErrorEnvelope {
        error: format!("后台错误: {detail}"),
        debug: expose_debug.then(|| detail.to_string()),
        data,
        keyword: keyword.map(str::to_string),
        note,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::errors::ErrorKind;

    fn item(n: usize) -> ContentItem {
        ContentItem {
            title: format!("第{n}篇测试笔记标题"),
            author: "作者".into(),
            view_count: "1浏览".into(),
            like_count: "1点赞".into(),
            link: "#".into(),
            thumbnail: None,
        }
    }

    #[test]
    fn success_is_capped_and_counted() {
        let resolution = Resolution {
            items: (0..25).map(item).collect(),
            provenance: Provenance::Live { count: 25 },
        };
        let env = assemble_success(resolution, "摄影", &RuntimeContext::local());
        assert_eq!(env.data.len(), MAX_ITEMS);
        assert_eq!(env.total, MAX_ITEMS);
        assert_eq!(env.environment, Some("local"));
        assert_eq!(env.keyword, "摄影");
    }

    #[test]
    fn success_serializes_expected_fields() {
        let resolution = Resolution {
            items: vec![item(1)],
            provenance: Provenance::LiveFailed {
                kind: ErrorKind::NavigationTimeout,
            },
        };
        let value =
            serde_json::to_value(assemble_success(resolution, "k", &RuntimeContext::production()))
                .unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["total"], 1);
        assert_eq!(value["environment"], "production");
        assert!(value["note"].as_str().unwrap().contains("模拟数据"));
    }

    #[test]
    fn fatal_carries_payload_and_hides_debug() {
        let env = assemble_fatal(Some("副业"), "request timed out", false);
        assert_eq!(env.data.as_ref().map(Vec::len), Some(10));
        assert!(env.debug.is_none());
        assert_eq!(env.keyword.as_deref(), Some("副业"));

        let value = serde_json::to_value(&env).unwrap();
        assert!(value.get("debug").is_none());
        assert!(value["error"].as_str().unwrap().contains("request timed out"));
    }

    #[test]
    fn fatal_without_keyword_has_no_payload() {
        let env = assemble_fatal(None, "boom", true);
        assert!(env.data.is_none());
        assert_eq!(env.debug.as_deref(), Some("boom"));
    }
}
