//! Common test utilities for in-process API testing.
//!
//! This module provides a test fixture that builds the router around a
//! catalog store, either a seeded SQLite database or a controllable mock,
//! without binding a socket.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use gamecatalog_core::{
    testing::MockGameCatalog, AssetsConfig, Config, GameCatalog, GameRecord, SqliteGameCatalog,
};

/// Re-export fixtures for test convenience
pub use gamecatalog_core::testing::fixtures;

/// Test fixture for API testing.
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_search() {
///     let fixture = TestFixture::new();
///
///     let response = fixture.get("/videogames?title=mario").await;
///
///     assert_eq!(response.status, 200);
/// }
/// ```
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Mock catalog, when the fixture was built around one
    pub mock: Option<Arc<MockGameCatalog>>,
    /// Directory holding the artwork served under `/images`
    pub assets_dir: TempDir,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
    pub text: String,
    pub content_type: Option<String>,
}

impl TestFixture {
    /// Fixture backed by an in-memory SQLite catalog holding the sample records.
    pub fn new() -> Self {
        Self::with_records(&fixtures::sample_catalog())
    }

    /// Fixture backed by an in-memory SQLite catalog holding `records`.
    pub fn with_records(records: &[GameRecord]) -> Self {
        let catalog = SqliteGameCatalog::in_memory().expect("Failed to open catalog");
        catalog
            .insert_many(records)
            .expect("Failed to insert records");
        Self::with_catalog(Arc::new(catalog), None)
    }

    /// Fixture backed by a mock catalog serving the sample records.
    pub fn with_mock() -> Self {
        let mock = Arc::new(MockGameCatalog::with_records(fixtures::sample_catalog()));
        Self::with_catalog(
            Arc::clone(&mock) as Arc<dyn GameCatalog>,
            Some(mock),
        )
    }

    fn with_catalog(catalog: Arc<dyn GameCatalog>, mock: Option<Arc<MockGameCatalog>>) -> Self {
        let assets_dir = tempfile::tempdir().expect("Failed to create assets dir");
        std::fs::write(assets_dir.path().join("zelda.png"), b"\x89PNG fake image")
            .expect("Failed to write artwork");

        let config = Config {
            assets: AssetsConfig {
                dir: assets_dir.path().to_path_buf(),
                ..AssetsConfig::default()
            },
            ..Config::default()
        };

        let state = Arc::new(gamecatalog_server::state::AppState::new(config, catalog));
        let router = gamecatalog_server::api::create_router(state);

        Self {
            router,
            mock,
            assets_dir,
        }
    }

    /// The mock catalog. Panics if the fixture is SQLite-backed.
    pub fn mock(&self) -> &MockGameCatalog {
        self.mock.as_deref().expect("fixture has no mock catalog")
    }

    /// Send a GET request to the test router.
    pub async fn get(&self, path: &str) -> TestResponse {
        let request = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .unwrap();

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let text = String::from_utf8_lossy(&body_bytes).to_string();
        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
        };

        TestResponse {
            status,
            body,
            text,
            content_type,
        }
    }
}

/// Titles of a JSON array of records, in response order.
pub fn titles(body: &Value) -> Vec<String> {
    body.as_array()
        .expect("expected a JSON array")
        .iter()
        .map(|record| record["title"].as_str().unwrap_or_default().to_string())
        .collect()
}

/// Helper to assert a response has expected status.
#[macro_export]
macro_rules! assert_status {
    ($response:expr, $status:expr) => {
        assert_eq!(
            $response.status, $status,
            "Expected status {:?}, got {:?}. Body: {}",
            $status, $response.status, $response.text
        );
    };
}
