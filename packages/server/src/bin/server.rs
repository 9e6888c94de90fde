//! PII Masking Server
//!
//! Serves `/mask`, `/analyze`, `/supported-entities` and `/health` on the
//! configured address (127.0.0.1:5000 by default).

use std::net::SocketAddr;

use anyhow::{Context, Result};
use server_core::kernel::create_pii_masker;
use server_core::server::build_app;
use server_core::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,server_core=debug,pii=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_line_number(true),
        )
        .init();

    tracing::info!("Starting PII Masking Server");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(
        masking_enabled = config.masking_enabled,
        default_language = %config.default_language,
        score_threshold = config.score_threshold,
        rate_limited = config.rate_limit.is_some(),
        "Configuration loaded"
    );

    let masker = create_pii_masker(config.masking_enabled);
    let app = build_app(&config, masker).context("Failed to build application")?;

    // Start server
    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    tracing::info!("Listening on http://{}", addr);
    tracing::info!("Health check: http://{}/health", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("Server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
