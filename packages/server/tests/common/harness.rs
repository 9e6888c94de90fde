//! Test harness that drives the router in-process.
//!
//! Requests go straight through `tower::ServiceExt::oneshot`, so no socket is
//! bound and tests can run in parallel.

#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use std::sync::Arc;
use server_core::kernel::{create_pii_masker, BasePiiMasker};
use server_core::server::build_app;
use server_core::Config;
use tower::ServiceExt;

/// Status, headers and parsed JSON body of one response
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    /// The `error` message of a failed request
    pub fn error(&self) -> &str {
        self.body["error"].as_str().unwrap_or_default()
    }
}

pub struct TestHarness {
    app: Router,
}

impl TestHarness {
    /// App with default configuration (masking on, no rate limit).
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        let masker = create_pii_masker(config.masking_enabled);
        Self::with_masker(config, masker)
    }

    /// App backed by a caller-supplied masker.
    pub fn with_masker(config: Config, masker: Arc<dyn BasePiiMasker>) -> Self {
        // Run tests with: RUST_LOG=debug cargo test -- --nocapture
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let app = build_app(&config, masker).expect("Failed to build app");
        Self { app }
    }

    pub async fn post_json(&self, path: &str, body: &str) -> TestResponse {
        self.post_json_with_headers(path, body, &[]).await
    }

    pub async fn post_json_with_headers(
        &self,
        path: &str,
        body: &str,
        headers: &[(&str, &str)],
    ) -> TestResponse {
        let mut builder = Request::builder()
            .method(Method::POST)
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json");
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        let request = builder
            .body(Body::from(body.to_string()))
            .expect("Failed to build request");

        self.send(request).await
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        let request = Request::builder()
            .method(Method::GET)
            .uri(path)
            .body(Body::empty())
            .expect("Failed to build request");

        self.send(request).await
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("Router is infallible");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read response body");
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            body,
        }
    }
}
