//! AI assistant integration tests against a mock chat-completion endpoint.

mod common;

use std::time::Duration;

use axum::http::StatusCode;
use common::TestHarness;
use serde_json::{json, Value};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const COMPLETIONS_PATH: &str = "/openai/v1/chat/completions";

async fn harness_for(mock: &MockServer, timeout_seconds: u64) -> TestHarness {
    let api_url = format!("{}{COMPLETIONS_PATH}", mock.uri());
    TestHarness::with_config(move |config| {
        config.groq_api_key = Some("test-groq-key".into());
        config.groq_api_url = api_url;
        config.ai_model = "test-model".into();
        config.ai_timeout_seconds = timeout_seconds;
    })
    .await
}

fn question() -> Value {
    json!({
        "question": "How often should the battery be charged?",
        "card_context": {
            "id": 1,
            "title": "LED Headlamp",
            "category_name": "Lighting",
            "markdown_text": "Charge nightly."
        }
    })
}

#[tokio::test]
async fn answer_is_returned() {
    let mock = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .and(header("authorization", "Bearer test-groq-key"))
        .and(body_partial_json(json!({
            "model": "test-model",
            "max_tokens": 1024
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [
                { "message": { "role": "assistant", "content": "Charge it every night." } }
            ]
        })))
        .expect(1)
        .mount(&mock)
        .await;

    let harness = harness_for(&mock, 5).await;
    let response = harness.server.post("/api/ai/chat").json(&question()).await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["answer"], "Charge it every night.");

    let requests = mock.received_requests().await.unwrap();
    let sent: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(sent["messages"][0]["role"], "system");
    let user_turn = sent["messages"][1]["content"].as_str().unwrap();
    assert!(user_turn.contains("You are answering questions about: LED Headlamp."));
    assert!(user_turn.contains("Target Audience: Healthcare workers"));
}

#[tokio::test]
async fn upstream_failure_is_bad_gateway() {
    let mock = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
        .mount(&mock)
        .await;

    let harness = harness_for(&mock, 5).await;
    let response = harness.server.post("/api/ai/chat").json(&question()).await;

    response.assert_status(StatusCode::BAD_GATEWAY);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "upstream_error");
    assert_eq!(body["error"]["details"]["upstream_status"], 429);
}

#[tokio::test]
async fn malformed_answer_is_bad_gateway() {
    let mock = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
        .mount(&mock)
        .await;

    let harness = harness_for(&mock, 5).await;
    harness
        .server
        .post("/api/ai/chat")
        .json(&question())
        .await
        .assert_status(StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn slow_upstream_is_gateway_timeout() {
    let mock = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "choices": [] }))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&mock)
        .await;

    let harness = harness_for(&mock, 1).await;
    let response = harness.server.post("/api/ai/chat").json(&question()).await;

    response.assert_status(StatusCode::GATEWAY_TIMEOUT);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "upstream_timeout");
}

#[tokio::test]
async fn missing_key_is_not_configured() {
    let mock = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock)
        .await;

    let harness = TestHarness::new().await;
    let response = harness.server.post("/api/ai/chat").json(&question()).await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "not_configured");
}

#[tokio::test]
async fn empty_question_is_rejected() {
    let harness = TestHarness::new().await;

    let response = harness
        .server
        .post("/api/ai/chat")
        .json(&json!({ "question": "", "card_context": {} }))
        .await;

    response.assert_status_bad_request();
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "validation_error");
}
