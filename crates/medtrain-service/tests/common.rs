//! Common test utilities for medtrain integration tests.

#![allow(dead_code)] // Some utilities are used by different test files

use std::sync::Arc;

use axum::Router;
use axum_test::TestServer;
use serde_json::{json, Value};
use tempfile::TempDir;

use medtrain_service::{create_router, AppState, ServiceConfig};
use medtrain_store::SqliteStore;

/// Admin password used by every harness.
pub const ADMIN_PASSWORD: &str = "test-password";

/// Test harness containing everything needed for integration tests.
pub struct TestHarness {
    /// The test server for making HTTP requests.
    pub server: TestServer,
    /// Upload root (kept alive for test duration).
    pub upload_dir: TempDir,
}

impl TestHarness {
    /// Create a new test harness with a fresh in-memory database.
    pub async fn new() -> Self {
        Self::with_config(|_| {}).await
    }

    /// Create a harness after adjusting the default test configuration.
    pub async fn with_config(configure: impl FnOnce(&mut ServiceConfig)) -> Self {
        let upload_dir = TempDir::new().expect("Failed to create temp directory");
        let store = SqliteStore::open_in_memory()
            .await
            .expect("Failed to open store");

        let mut config = ServiceConfig {
            listen_addr: "127.0.0.1:0".into(),
            database_path: ":memory:".into(),
            upload_dir: upload_dir.path().to_string_lossy().to_string(),
            admin_password: ADMIN_PASSWORD.into(),
            ..ServiceConfig::default()
        };
        configure(&mut config);

        let state = AppState::new(Arc::new(store), config);
        let router: Router = create_router(state);

        let server = TestServer::new(router).expect("Failed to create test server");

        Self { server, upload_dir }
    }

    /// Log in and return a session token.
    pub async fn login(&self) -> String {
        let response = self
            .server
            .post("/api/admin/login")
            .json(&json!({ "password": ADMIN_PASSWORD }))
            .await;
        response.assert_status_ok();

        let body: Value = response.json();
        body["session_token"]
            .as_str()
            .expect("login returns a token")
            .to_string()
    }

    /// Create a category and return its id.
    pub async fn create_category(&self, name: &str) -> i64 {
        let response = self
            .server
            .post("/api/categories")
            .json(&json!({ "name": name }))
            .await;
        response.assert_status(axum::http::StatusCode::CREATED);

        let body: Value = response.json();
        body["id"].as_i64().expect("category id")
    }

    /// Create a card from a JSON body and return its id.
    pub async fn create_card(&self, card: Value) -> i64 {
        let response = self.server.post("/api/cards").json(&card).await;
        response.assert_status(axum::http::StatusCode::CREATED);

        let body: Value = response.json();
        body["id"].as_i64().expect("card id")
    }
}
