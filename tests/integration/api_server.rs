//! Integration tests for the API Server
//!
//! Tests health, metrics, decision and report endpoints.


use std::sync::Arc;

use portfolio_manager::models::Decision;
use serde_json::{json, Value};

use crate::fixtures::{scenario_state, FailingCompletion, FixedCompletion};
use test_utils::TestApiServer;

#[tokio::test]
async fn health_endpoint_reports_healthy_status() {
    let app = TestApiServer::new(Arc::new(FailingCompletion)).await;
    let response = app.server.get("/health").await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert!(body["uptime_seconds"].as_u64().is_some());
    assert_eq!(body["service"], "portfolio-manager");
    assert_eq!(body["decision_policy"], "PassThrough");
}

#[tokio::test]
async fn decision_endpoint_appends_fallback_when_provider_fails() {
    let app = TestApiServer::new(Arc::new(FailingCompletion)).await;
    let mut request = serde_json::to_value(scenario_state()).unwrap();
    request["data"]["ticker"] = json!("600519");

    let response = app.server.post("/api/decisions").json(&request).await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["source"], "fallback");
    assert!(body["decided_at"].as_str().is_some());
    assert_eq!(body["data"]["ticker"], "600519");

    let messages = body["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 6);
    assert_eq!(messages[5]["name"], "portfolio_management");
    assert_eq!(messages[5]["content"], Decision::fallback_content());
}

#[tokio::test]
async fn decision_endpoint_forwards_live_content() {
    let live = r#"{"action":"hold","quantity":0,"confidence":0.55,"agent_signals":[],"reasoning":"Wait"}"#;
    let app = TestApiServer::new(Arc::new(FixedCompletion(live.to_string()))).await;

    let response = app.server.post("/api/decisions").json(&scenario_state()).await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["source"], "live");
    assert_eq!(body["messages"][5]["content"], live);
}

#[tokio::test]
async fn decision_endpoint_rejects_missing_signal() {
    let app = TestApiServer::new(Arc::new(FailingCompletion)).await;
    let mut state = scenario_state();
    state.messages.retain(|m| m.name != "sentiment_agent");

    let response = app.server.post("/api/decisions").json(&state).expect_failure().await;
    assert_eq!(response.status_code(), 422);

    let body: Value = response.json();
    assert_eq!(body["error"], "missing signal from sentiment_agent");
    assert_eq!(app.metrics.missing_signal_total.get(), 1);
}

#[tokio::test]
async fn report_endpoint_formats_decision() {
    let app = TestApiServer::new(Arc::new(FailingCompletion)).await;
    let response = app
        .server
        .post("/api/reports")
        .json(&json!({
            "action": "buy",
            "quantity": 100,
            "confidence": 0.8,
            "agent_signals": [
                {"agent_name": "sentiment_analysis", "signal": "bullish", "confidence": 0.6, "reasoning": "Upbeat coverage"}
            ],
            "reasoning": "Strong fundamentals"
        }))
        .await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["action"], "buy");
    assert_eq!(body["quantity"], 100);
    let report = body["report"].as_str().unwrap();
    assert!(report.contains("操作建议: 买入"));
    assert!(report.contains("分析: Upbeat coverage"));
    assert!(report.contains("Strong fundamentals"));
}

#[tokio::test]
async fn metrics_endpoint_exposes_decision_metrics() {
    let app = TestApiServer::new(Arc::new(FailingCompletion)).await;
    app.server.post("/api/decisions").json(&scenario_state()).await;

    let response = app.server.get("/metrics").await;
    assert_eq!(response.status_code(), 200);

    let body = response.text();
    assert!(body.contains("decisions_total{source=\"fallback\"} 1"));
    assert!(body.contains("completion_duration_seconds"));
    assert!(body.contains("http_requests_total"));
    assert!(body.contains("http_requests_in_flight"));
}
