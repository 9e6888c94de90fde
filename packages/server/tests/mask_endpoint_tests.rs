//! Integration tests for POST /mask and the middleware around it.

mod common;

use axum::http::StatusCode;
use common::TestHarness;
use serde_json::json;
use server_core::{Config, RateLimitConfig};

#[tokio::test]
async fn mask_replaces_pii_with_entity_placeholders() {
    let harness = TestHarness::new();

    let response = harness
        .post_json(
            "/mask",
            r#"{"text": "Contact me at john@example.com or (555) 123-4567"}"#,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body,
        json!({"masked": "Contact me at <EMAIL_ADDRESS> or <PHONE_NUMBER>"})
    );
}

#[tokio::test]
async fn mask_leaves_text_without_pii_alone() {
    let harness = TestHarness::new();

    let response = harness
        .post_json("/mask", r#"{"text": "The weather is lovely today."}"#)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["masked"], "The weather is lovely today.");
}

#[tokio::test]
async fn blank_text_is_echoed_back() {
    let harness = TestHarness::new();

    for text in ["", "   ", "\n\t"] {
        let body = json!({ "text": text }).to_string();
        let response = harness.post_json("/mask", &body).await;

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body["masked"], text);
    }
}

#[tokio::test]
async fn missing_or_null_text_is_treated_as_empty() {
    let harness = TestHarness::new();

    let response = harness.post_json("/mask", r#"{"language": "en"}"#).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!({"masked": ""}));

    let response = harness.post_json("/mask", r#"{"text": null}"#).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!({"masked": ""}));
}

#[tokio::test]
async fn missing_body_is_rejected() {
    let harness = TestHarness::new();

    for body in ["", "not json at all", "null", "{}"] {
        let response = harness.post_json("/mask", body).await;

        assert_eq!(response.status, StatusCode::BAD_REQUEST, "body: {:?}", body);
        assert_eq!(response.body, json!({"error": "No JSON data provided"}));
    }
}

#[tokio::test]
async fn malformed_requests_are_bad_requests() {
    let harness = TestHarness::new();

    let cases = [
        r#"{"text": 42}"#,
        r#"["Contact me at john@example.com"]"#,
        r#"{"text": "hi there", "score_threshold": 2.0}"#,
        r#"{"text": "hi there", "operators": {"DEFAULT": {"type": "encrypt"}}}"#,
    ];
    for body in cases {
        let response = harness.post_json("/mask", body).await;

        assert_eq!(response.status, StatusCode::BAD_REQUEST, "body: {}", body);
        assert!(!response.error().is_empty());
    }
}

#[tokio::test]
async fn unknown_entity_and_language_are_reported() {
    let harness = TestHarness::new();

    let response = harness
        .post_json("/mask", r#"{"text": "hi there", "entities": ["SHOE_SIZE"]}"#)
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error(), "unknown entity type: SHOE_SIZE");

    let response = harness
        .post_json("/mask", r#"{"text": "hi there", "language": "xx"}"#)
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error(), "language not supported: xx");
}

#[tokio::test]
async fn per_request_operators_and_entities_apply() {
    let harness = TestHarness::new();

    let body = json!({
        "text": "Call 555-867-5309 or mail sam@example.net",
        "entities": ["PHONE_NUMBER"],
        "operators": {
            "PHONE_NUMBER": {"type": "mask", "chars_to_mask": 4, "from_end": true}
        }
    })
    .to_string();
    let response = harness.post_json("/mask", &body).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body["masked"],
        "Call 555-867-**** or mail sam@example.net"
    );
}

#[tokio::test]
async fn disabled_masking_passes_text_through() {
    let harness = TestHarness::with_config(Config {
        masking_enabled: false,
        ..Config::default()
    });

    let response = harness
        .post_json("/mask", r#"{"text": "Email john@example.com"}"#)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["masked"], "Email john@example.com");
}

#[tokio::test]
async fn oversized_bodies_are_refused() {
    let harness = TestHarness::with_config(Config {
        max_body_bytes: 64,
        ..Config::default()
    });

    let body = json!({ "text": "a".repeat(200) }).to_string();
    let response = harness.post_json("/mask", &body).await;

    assert_eq!(response.status, StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn cors_allows_any_origin() {
    let harness = TestHarness::new();

    let response = harness
        .post_json_with_headers(
            "/mask",
            r#"{"text": "hello"}"#,
            &[("origin", "chrome-extension://abcdefghijklmnop")],
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.headers["access-control-allow-origin"],
        "*"
    );
}

#[tokio::test]
async fn rate_limit_applies_per_client_but_not_to_health() {
    let harness = TestHarness::with_config(Config {
        rate_limit: Some(RateLimitConfig {
            per_second: 1,
            burst_size: 2,
        }),
        ..Config::default()
    });

    let client = [("x-forwarded-for", "203.0.113.7")];
    let body = r#"{"text": "hello"}"#;

    for _ in 0..2 {
        let response = harness.post_json_with_headers("/mask", body, &client).await;
        assert_eq!(response.status, StatusCode::OK);
    }
    let limited = harness.post_json_with_headers("/mask", body, &client).await;
    assert_eq!(limited.status, StatusCode::TOO_MANY_REQUESTS);
    assert!(limited.error().starts_with("Too many requests"));

    let other_client = [("x-forwarded-for", "198.51.100.2")];
    let response = harness
        .post_json_with_headers("/mask", body, &other_client)
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let health = harness.get("/health").await;
    assert_eq!(health.status, StatusCode::OK);
}

#[tokio::test]
async fn health_reports_ok() {
    let harness = TestHarness::new();

    let response = harness.get("/health").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!({"status": "ok"}));
}
