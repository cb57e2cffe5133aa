//! Integration tests for the centralpain HTTP API.
//!
//! Uses axum-test to test the API handlers without starting a real server.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum_test::TestServer;
use centralpain::api::{CriteriaResponse, EvaluateResponse, HealthResponse, create_router};
use centralpain::config::ServerConfig;
use serde_json::json;
use tower::ServiceExt;

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Create a test server with rate limiting disabled.
fn create_test_server() -> TestServer {
    let config = ServerConfig {
        rate_limit: 0,
        ..ServerConfig::default()
    };
    TestServer::new(create_router(&config)).unwrap()
}

fn all_affirmed() -> serde_json::Value {
    json!({
        "documented_injury": "yes",
        "chronic_pain": "yes",
        "hypersensitivity": "yes",
        "mood_cognitive": "yes",
    })
}

fn with(mut base: serde_json::Value, key: &str, value: &str) -> serde_json::Value {
    base[key] = json!(value);
    base
}

async fn evaluate(server: &TestServer, body: serde_json::Value) -> EvaluateResponse {
    let response = server.post("/evaluate").json(&body).await;
    response.assert_status_ok();
    response.json()
}

// =============================================================================
// HEALTH ENDPOINT TESTS
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let server = create_test_server();

    let response = server.get("/health").await;

    response.assert_status_ok();
    let health: HealthResponse = response.json();
    assert_eq!(health.status, "ok");
    assert_eq!(health.version, env!("CARGO_PKG_VERSION"));
}

// =============================================================================
// CRITERIA ENDPOINT TESTS
// =============================================================================

#[tokio::test]
async fn test_criteria_lists_five_criteria() {
    let server = create_test_server();

    let response = server.get("/criteria").await;

    response.assert_status_ok();
    let criteria: CriteriaResponse = response.json();
    assert_eq!(criteria.criteria.len(), 5);
    assert_eq!(criteria.criteria[0].key, "documented_injury");
    assert_eq!(criteria.criteria[4].key, "limited_block_response");
}

// =============================================================================
// EVALUATE ENDPOINT TESTS
// =============================================================================

#[tokio::test]
async fn test_evaluate_empty_is_unevaluated() {
    let server = create_test_server();

    let result = evaluate(&server, json!({})).await;

    assert!(result.success);
    assert_eq!(result.diagnosis, "unevaluated");
    assert!(result.recommendations.is_empty());
    assert_eq!(result.criteria_total, None);
    assert_eq!(result.missing_fields.len(), 5);
}

#[tokio::test]
async fn test_evaluate_all_affirmed_no_block() {
    let server = create_test_server();

    let result = evaluate(&server, with(all_affirmed(), "block_performed", "no")).await;

    assert_eq!(result.diagnosis, "centralized_pain");
    assert_eq!(
        result.title,
        "Centralized Pain Following Peripheral Nerve Injury"
    );
    assert_eq!(result.recommendations.len(), 5);
    assert_eq!(result.criteria_satisfied, Some(4));
    assert_eq!(result.criteria_total, Some(4));
    assert!(result.missing_fields.is_empty());
    assert_eq!(result.checklist.len(), 4);
}

#[tokio::test]
async fn test_evaluate_limited_block_response() {
    let server = create_test_server();
    let body = with(
        with(all_affirmed(), "block_performed", "yes"),
        "block_response",
        "limited",
    );

    let result = evaluate(&server, body).await;

    assert_eq!(result.diagnosis, "centralized_pain");
    assert_eq!(result.criteria_satisfied, Some(5));
    assert_eq!(result.criteria_total, Some(5));
    assert!(result.checklist[4].met);
}

#[tokio::test]
async fn test_evaluate_good_block_response() {
    let server = create_test_server();
    let body = with(
        with(all_affirmed(), "block_performed", "yes"),
        "block_response",
        "good",
    );

    let result = evaluate(&server, body).await;

    assert_eq!(result.diagnosis, "criteria_not_met");
    assert_eq!(result.criteria_satisfied, Some(4));
    assert_eq!(result.recommendations.len(), 4);
    assert_eq!(
        result.recommendations[0],
        "Consider further evaluation to confirm diagnosis"
    );
}

#[tokio::test]
async fn test_evaluate_block_pending_response() {
    let server = create_test_server();

    let result = evaluate(&server, with(all_affirmed(), "block_performed", "yes")).await;

    assert_eq!(result.diagnosis, "unevaluated");
    assert_eq!(result.missing_fields, vec!["block_response".to_string()]);
}

#[tokio::test]
async fn test_evaluate_both_axes_denied() {
    let server = create_test_server();
    let body = json!({
        "documented_injury": "yes",
        "chronic_pain": "yes",
        "hypersensitivity": "denied",
        "mood_cognitive": "denied",
        "block_performed": "no",
    });

    let result = evaluate(&server, body).await;

    assert_eq!(result.diagnosis, "criteria_not_met");
    assert_eq!(result.recommendations.len(), 5);
    assert_eq!(
        result.recommendations[0],
        "Peripheral interventions may be appropriate as primary treatment"
    );
}

#[tokio::test]
async fn test_evaluate_stray_block_response_ignored() {
    let server = create_test_server();
    let body = with(
        with(all_affirmed(), "block_performed", "no"),
        "block_response",
        "good",
    );

    let result = evaluate(&server, body).await;

    assert_eq!(result.diagnosis, "centralized_pain");
    assert_eq!(result.criteria_total, Some(4));
}

#[tokio::test]
async fn test_evaluate_null_means_unset() {
    let server = create_test_server();
    let mut body = with(all_affirmed(), "block_performed", "no");
    body["chronic_pain"] = serde_json::Value::Null;

    let result = evaluate(&server, body).await;

    assert_eq!(result.diagnosis, "unevaluated");
    assert_eq!(result.missing_fields, vec!["chronic_pain".to_string()]);
}

#[tokio::test]
async fn test_evaluate_invalid_answer_is_bad_request() {
    let server = create_test_server();

    let response = server
        .post("/evaluate")
        .json(&json!({"documented_injury": "perhaps"}))
        .expect_failure()
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let result: EvaluateResponse = response.json();
    assert!(!result.success);
    assert!(result.error.unwrap().contains("documented_injury"));
}

#[tokio::test]
async fn test_evaluate_bare_yes_block_response_is_bad_request() {
    let server = create_test_server();
    let body = with(
        with(all_affirmed(), "block_performed", "yes"),
        "block_response",
        "yes",
    );

    let response = server.post("/evaluate").json(&body).expect_failure().await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let result: EvaluateResponse = response.json();
    assert!(result.error.unwrap().contains("Ambiguous block response"));
}

#[tokio::test]
async fn test_evaluate_unknown_field_is_rejected() {
    let server = create_test_server();

    let response = server
        .post("/evaluate")
        .json(&json!({"pain_score": "yes"}))
        .expect_failure()
        .await;

    assert!(response.status_code().is_client_error());
}

#[tokio::test]
async fn test_evaluate_is_idempotent() {
    let server = create_test_server();
    let body = with(all_affirmed(), "block_performed", "no");

    let first = serde_json::to_value(evaluate(&server, body.clone()).await).unwrap();
    let second = serde_json::to_value(evaluate(&server, body).await).unwrap();

    assert_eq!(first, second);
}

// =============================================================================
// MIDDLEWARE TESTS
// =============================================================================

#[tokio::test]
async fn test_rate_limit_rejects_burst() {
    let config = ServerConfig {
        rate_limit: 1,
        ..ServerConfig::default()
    };
    let router = create_router(&config);

    let first = router
        .clone()
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::OK);

    let second = router
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::TOO_MANY_REQUESTS);
    assert!(second.headers().contains_key(header::RETRY_AFTER));

    let body = axum::body::to_bytes(second.into_body(), usize::MAX)
        .await
        .unwrap();
    let rejected: EvaluateResponse = serde_json::from_slice(&body).unwrap();
    assert!(!rejected.success);
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let server = create_test_server();

    let response = server.get("/assessments").expect_failure().await;

    response.assert_status(StatusCode::NOT_FOUND);
}
