mod common;

use common::{Counters, Script, ScriptedLauncher};
use notescrape::pipeline::ExecutionMode;
use notescrape::{AppState, SCRAPE_ROUTE, ScrapeConfig, ScrapeError, ScrapeServer};
use serde_json::{Value, json};

async fn start(script: Script, config: ScrapeConfig) -> (ScrapeServer, Counters, String) {
    let (launcher, counters) = ScriptedLauncher::new(script);
    let state = AppState::from_config(launcher, &config);
    let server = ScrapeServer::start(state, "127.0.0.1:0".parse().unwrap())
        .await
        .expect("bind test server");
    let url = format!("http://{}{}", server.addr(), SCRAPE_ROUTE);
    (server, counters, url)
}

fn production() -> ScrapeConfig {
    ScrapeConfig::default().with_mode(ExecutionMode::Production)
}

fn local() -> ScrapeConfig {
    ScrapeConfig::default().with_mode(ExecutionMode::Local)
}

#[tokio::test]
async fn empty_keyword_is_rejected_before_any_launch() {
    let (server, counters, url) = start(Script::Page(String::new()), local()).await;
    let client = reqwest::Client::new();

    for body in [json!({ "keyword": "" }), json!({ "keyword": "   " }), json!({})] {
        let resp = client.post(&url).json(&body).send().await.unwrap();
        assert_eq!(resp.status(), 400, "{body}");
        let value: Value = resp.json().await.unwrap();
        assert_eq!(value["error"], "搜索关键词不能为空");
    }

    assert_eq!(counters.launches(), 0);
    server.shutdown().await;
}

#[tokio::test]
async fn malformed_json_is_a_client_error() {
    let (server, counters, url) = start(Script::Page(String::new()), local()).await;
    let resp = reqwest::Client::new()
        .post(&url)
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 400);
    assert_eq!(counters.launches(), 0);
    server.shutdown().await;
}

#[tokio::test]
async fn production_returns_synthetic_envelope() {
    let (server, counters, url) = start(Script::Page(String::new()), production()).await;
    let resp = reqwest::Client::new()
        .post(&url)
        .json(&json!({ "keyword": " 副业 " }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    let value: Value = resp.json().await.unwrap();
    assert_eq!(value["success"], true);
    assert_eq!(value["keyword"], "副业");
    assert_eq!(value["total"], 10);
    assert_eq!(value["environment"], "production");
    assert_eq!(value["data"].as_array().unwrap().len(), 10);
    assert!(value["note"].as_str().unwrap().contains("模拟数据"));
    assert!(value["data"][0]["viewCount"].as_str().unwrap().ends_with("浏览"));
    assert_eq!(counters.launches(), 0);
    server.shutdown().await;
}

#[tokio::test]
async fn local_search_control_failure_falls_back() {
    let script = Script::SearchError(ScrapeError::SearchControlNotFound { tried: 5 });
    let (server, counters, url) = start(script, local()).await;
    let resp = reqwest::Client::new()
        .post(&url)
        .json(&json!({ "keyword": "摄影" }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    let value: Value = resp.json().await.unwrap();
    assert_eq!(value["total"], 10);
    assert_eq!(value["environment"], "local");
    assert!(value["note"].as_str().unwrap().contains("真实抓取失败"));
    assert_eq!(counters.launches(), 1);
    assert_eq!(counters.closes(), 1);
    server.shutdown().await;
}

#[tokio::test]
async fn request_budget_overrun_is_fatal_with_payload() {
    let config = local().with_request_timeout_secs(1);
    let (server, _counters, url) = start(Script::Hang, config).await;
    let resp = reqwest::Client::new()
        .post(&url)
        .json(&json!({ "keyword": "摄影" }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 500);
    let value: Value = resp.json().await.unwrap();
    assert!(value["error"].as_str().unwrap().contains("budget"));
    assert_eq!(value["keyword"], "摄影");
    assert_eq!(value["data"].as_array().unwrap().len(), 10);
    assert!(
        value["debug"]
            .as_str()
            .unwrap()
            .starts_with("fatal assembly failure: request exceeded")
    );
    server.shutdown().await;
}
