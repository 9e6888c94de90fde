// Rate limiting middleware using tower-governor
//
// Keyed per client IP (X-Forwarded-For, X-Real-IP, then the socket address).
// Applied in app.rs to the masking routes only; /health is never limited.

use anyhow::{Context, Result};
use axum::{
    response::{IntoResponse, Response},
    Router,
};
use std::sync::Arc;
use tower_governor::{
    governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor, GovernorError,
    GovernorLayer,
};

use crate::config::RateLimitConfig;
use crate::server::error::ApiError;

/// Wrap every route currently on `router` with the per-IP limiter.
///
/// `per_second` is a request rate, so it is turned into the interval after
/// which one unit of quota is replenished.
pub fn apply_rate_limit<S>(router: Router<S>, config: &RateLimitConfig) -> Result<Router<S>>
where
    S: Clone + Send + Sync + 'static,
{
    let replenish_ms = (1000 / config.per_second).max(1);

    let governor_config = Arc::new(
        GovernorConfigBuilder::default()
            .key_extractor(SmartIpKeyExtractor)
            .per_millisecond(replenish_ms)
            .burst_size(config.burst_size)
            .use_headers() // Adds x-ratelimit-* headers to responses
            .error_handler(rate_limit_error)
            .finish()
            .context("Invalid rate limiter configuration")?,
    );

    tracing::info!(
        per_second = config.per_second,
        burst_size = config.burst_size,
        "Rate limiting enabled"
    );

    Ok(router.layer(GovernorLayer {
        config: governor_config,
    }))
}

/// Rejections from the limiter use the same JSON error body as the routes.
fn rate_limit_error(err: GovernorError) -> Response {
    match err {
        GovernorError::TooManyRequests { wait_time, headers } => {
            let mut response = ApiError::TooManyRequests { wait_time }.into_response();
            if let Some(headers) = headers {
                response.headers_mut().extend(headers);
            }
            response
        }
        GovernorError::UnableToExtractKey => {
            ApiError::BadRequest("Unable to determine client address".to_string()).into_response()
        }
        other => ApiError::Internal(format!("Rate limiter failed: {}", other)).into_response(),
    }
}
