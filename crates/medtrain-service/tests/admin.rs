//! Admin session integration tests.

mod common;

use axum::http::StatusCode;
use common::{TestHarness, ADMIN_PASSWORD};
use serde_json::{json, Value};

#[tokio::test]
async fn login_issues_token() {
    let harness = TestHarness::new().await;

    let response = harness
        .server
        .post("/api/admin/login")
        .json(&json!({ "password": ADMIN_PASSWORD }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Login successful");
    assert_eq!(body["session_token"].as_str().unwrap().len(), 43);
}

#[tokio::test]
async fn wrong_password_is_rejected() {
    let harness = TestHarness::new().await;

    let response = harness
        .server
        .post("/api/admin/login")
        .json(&json!({ "password": "q1" }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Invalid password");
    assert!(body.get("session_token").is_none());
}

#[tokio::test]
async fn verify_then_logout() {
    let harness = TestHarness::new().await;
    let token = harness.login().await;

    let response = harness
        .server
        .post("/api/admin/verify")
        .json(&json!({ "session_token": token }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["valid"], true);

    let body: Value = harness
        .server
        .post("/api/admin/logout")
        .json(&json!({ "session_token": token }))
        .await
        .json();
    assert_eq!(body["success"], true);

    let response = harness
        .server
        .post("/api/admin/verify")
        .json(&json!({ "session_token": token }))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(body["valid"], false);
}

#[tokio::test]
async fn logout_always_succeeds() {
    let harness = TestHarness::new().await;

    for body in [json!({ "session_token": "never-issued" }), json!({})] {
        let response = harness.server.post("/api/admin/logout").json(&body).await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["success"], true);
    }

    harness
        .server
        .post("/api/admin/logout")
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn verify_without_token_is_invalid() {
    let harness = TestHarness::new().await;

    harness
        .server
        .post("/api/admin/verify")
        .json(&json!({}))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}
