//! Skin-Type Classification Service
//!
//! Classifies facial photos into five skin-type categories with a
//! pre-trained model served through OpenVINO, behind a REST (Axum) API.

use std::sync::atomic::AtomicU64;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use dermaclass::api::rest::{create_rest_router, AppState};
use dermaclass::config::Config;
use dermaclass::engine::ModelProvider;
use dermaclass::service::ClassifyService;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .init();

    info!(
        "Starting Skin-Type Classification Service v{}",
        env!("CARGO_PKG_VERSION")
    );

    // Load configuration
    let config = Config::load(Config::default_path()).unwrap_or_else(|e| {
        info!("Using default config ({})", e);
        Config::default()
    });

    info!("Configuration loaded:");
    info!("  Port: {}", config.server.port);
    info!("  Device: {}", config.inference.device);
    info!("  Model: {}", config.model.path.display());

    // Load the classifier eagerly. The service is useless without it, so a
    // missing or corrupt artifact aborts startup with the path named.
    let provider = Arc::new(ModelProvider::new(
        config.model.path.clone(),
        &config.inference.device,
    )?);
    provider.get().with_context(|| {
        format!(
            "cannot start without a classifier model at {}",
            config.model.path.display()
        )
    })?;

    // Create classification service
    let service = Arc::new(ClassifyService::new(provider));

    let app_state = Arc::new(AppState {
        service,
        start_time: Instant::now(),
        classify_count: AtomicU64::new(0),
    });

    let router = create_rest_router(app_state);

    let addr = format!("0.0.0.0:{}", config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("REST API listening on http://{}", addr);
    info!("Upload page: http://localhost:{}/", config.server.port);

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutdown signal received, cleaning up...");
        })
        .await?;

    info!("Goodbye!");
    Ok(())
}
