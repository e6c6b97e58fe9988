//! Application State
//!
//! Shared state accessible by all dashboard handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use serde::Deserialize;
use std::sync::Arc;
use std::time::Instant;

use crate::gateway::NewsGateway;
use crate::pipeline::{PipelineConfig, RetrievalPipeline};
use crate::render::{MemorySurface, Renderer};

/// Shared application state for all handlers
///
/// Holds no rendered content. Every panel request draws on a surface of its
/// own, see [`AppState::request_pipeline`].
#[derive(Clone)]
pub struct AppState {
    /// Backend gateway
    pub gateway: Arc<dyn NewsGateway>,
    /// Renderer shared by all requests
    pub renderer: Arc<Renderer>,
    /// Limits and mock delays for pipeline runs
    pub pipeline_config: PipelineConfig,
    /// Dashboard configuration
    pub config: Arc<DashboardConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    /// Create state with an entropy-seeded renderer
    pub fn new(
        gateway: Arc<dyn NewsGateway>,
        pipeline_config: PipelineConfig,
        config: DashboardConfig,
    ) -> Self {
        Self::with_renderer(gateway, Renderer::new(), pipeline_config, config)
    }

    /// Create state with a specific renderer
    pub fn with_renderer(
        gateway: Arc<dyn NewsGateway>,
        renderer: Renderer,
        pipeline_config: PipelineConfig,
        config: DashboardConfig,
    ) -> Self {
        Self {
            gateway,
            renderer: Arc::new(renderer),
            pipeline_config,
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }

    /// Pipeline drawing on a fresh surface owned by a single request
    pub fn request_pipeline(&self) -> RetrievalPipeline {
        RetrievalPipeline::new(
            Arc::clone(&self.gateway),
            Arc::new(MemorySurface::new()),
            Arc::clone(&self.renderer),
            self.pipeline_config.clone(),
        )
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

/// Dashboard server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8084
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl DashboardConfig {
    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
