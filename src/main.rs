//! Foresight Dashboard Server
//!
//! Run with: cargo run --bin foresight
//!
//! # Configuration
//!
//! Read from `config.toml` in the usual locations (see `foresight-cli config`
//! for a template); a file that fails to parse stops startup. Then
//! overridden by environment variables:
//! - `FORESIGHT_API_URL`: News backend URL (default: http://localhost:8000)
//! - `FORESIGHT_HOST`: Host to bind to (default: 0.0.0.0)
//! - `FORESIGHT_PORT`: Port to listen on (default: 8084)
//! - `FORESIGHT_LOG_LEVEL`, `FORESIGHT_LOG_FORMAT`: Logging (default: info, pretty)
//! - `RUST_LOG`: Overrides the log filter entirely

use foresight::config::Config;
use foresight::dashboard::{serve, AppState};
use foresight::gateway::{HttpGateway, NewsGateway};
use foresight::logging::init_logging;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (config, source) = Config::load_default()?;
    init_logging(&config.logging)?;

    match source {
        Some(path) => tracing::info!("Loaded config from {:?}", path),
        None => tracing::info!("No config file found, using defaults with environment overrides"),
    }

    tracing::info!("Starting Foresight dashboard v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("News backend: {}", config.gateway.base_url);

    let gateway = Arc::new(HttpGateway::new(config.gateway.clone())?);

    // Only informational: every dashboard refresh checks health again
    if gateway.check_health().await {
        tracing::info!("News backend connection verified");
    } else {
        tracing::warn!("News backend not available (dashboard will serve mock data)");
    }

    let state = AppState::new(gateway, config.pipeline.clone(), config.dashboard.clone());

    tracing::info!(
        "Starting server on {}:{}",
        config.dashboard.host,
        config.dashboard.port
    );
    serve(state, &config.dashboard).await?;

    tracing::info!("Foresight dashboard stopped");
    Ok(())
}
