//! Shared test helpers for integration tests.

use axum::body::Body;
use axum::Router;
use http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use calchub_api::{build_router, AppState};
use calchub_core::config::AppConfig;
use calchub_database::StoreManager;

/// Actor header value used by all test mutations.
pub const TEST_ACTOR: &str = "integration-tester";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
}

impl TestApp {
    /// Create a new test application over empty in-memory stores.
    pub fn new() -> Self {
        let config = AppConfig::default();
        let stores = StoreManager::memory();
        let state = AppState::new(config, stores);
        Self {
            router: build_router(state),
        }
    }

    /// Issue a request without a body.
    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    /// Issue a JSON request with the test actor headers.
    pub async fn send_json(&self, method: &str, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .header("x-actor", TEST_ACTOR)
            .header("x-actor-role", "admin")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    /// Issue a JSON request without actor headers.
    pub async fn send_json_anonymous(
        &self,
        method: &str,
        uri: &str,
        body: Value,
    ) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("request failed");
        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("failed to read body")
            .to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("response was not JSON")
        };
        (status, value)
    }
}
