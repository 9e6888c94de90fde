//! Application setup and server configuration.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::{
    extract::DefaultBodyLimit,
    http::{header::CONTENT_TYPE, Method},
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::kernel::BasePiiMasker;
use crate::server::middleware::{apply_rate_limit, extract_client_ip};
use crate::server::routes::{
    analyze_handler, health_handler, mask_handler, supported_entities_handler,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub masker: Arc<dyn BasePiiMasker>,
    pub default_language: String,
    pub score_threshold: f64,
}

impl AppState {
    pub fn new(config: &Config, masker: Arc<dyn BasePiiMasker>) -> Self {
        Self {
            masker,
            default_language: config.default_language.clone(),
            score_threshold: config.score_threshold,
        }
    }
}

/// Build the Axum application router
///
/// Fails when the configured default language has no recognizers, so a bad
/// `PII_DEFAULT_LANGUAGE` stops startup instead of failing every request.
pub fn build_app(config: &Config, masker: Arc<dyn BasePiiMasker>) -> Result<Router> {
    masker
        .supported_entities(&config.default_language)
        .with_context(|| {
            format!(
                "PII_DEFAULT_LANGUAGE {:?} is not supported",
                config.default_language
            )
        })?;

    let state = AppState::new(config, masker);

    // CORS configuration - the browser extension calls from its own origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE]);

    let mut router = Router::new()
        .route("/mask", post(mask_handler))
        .route("/analyze", post(analyze_handler))
        .route("/supported-entities", get(supported_entities_handler));

    if let Some(rate_limit) = &config.rate_limit {
        router = apply_rate_limit(router, rate_limit)?;
    }

    let app = router
        // Health check (no rate limit)
        .route("/health", get(health_handler))
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(middleware::from_fn(extract_client_ip))
        .layer(DefaultBodyLimit::max(config.max_body_bytes))
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.request_timeout_secs,
        )))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(app)
}
