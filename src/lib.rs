//! # Foresight
//!
//! A news dashboard that shows current headlines next to projected ones,
//! falling back to canned data when the news backend is offline.
//!
//! ## Features
//!
//! - **Offline fallback**: every refresh re-checks backend health and swaps in
//!   mock data after a simulated delay when it is down
//! - **Headless rendering**: regions are written to a `Surface`, so the whole
//!   pipeline runs without a browser
//! - **Retry controls**: failed fetches leave an error panel that re-issues the
//!   original request
//!
//! ## Modules
//!
//! - [`news`]: News records and the mock provider
//! - [`gateway`]: HTTP client for the news backend
//! - [`render`]: Surface abstraction, card markup and renderer
//! - [`pipeline`]: Health check, fetch or fallback, render
//! - [`dashboard`]: Dashboard server with Axum
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use foresight::gateway::{GatewayConfig, HttpGateway};
//! use foresight::pipeline::{PipelineConfig, RetrievalPipeline};
//! use foresight::render::{MemorySurface, Region, Renderer};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let gateway = Arc::new(HttpGateway::new(GatewayConfig::new("http://localhost:8000"))?);
//!     let surface = Arc::new(MemorySurface::new());
//!
//!     let pipeline = RetrievalPipeline::new(
//!         gateway,
//!         surface.clone(),
//!         Arc::new(Renderer::new()),
//!         PipelineConfig::default(),
//!     );
//!
//!     // Live data if the backend is healthy, mock headlines otherwise
//!     let outcome = pipeline.fetch_current_news(10).await;
//!     println!("{:?}", outcome);
//!     println!("{}", surface.markup(Region::CurrentNews));
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod dashboard;
pub mod gateway;
pub mod logging;
pub mod news;
pub mod pipeline;
pub mod render;

// Re-export top-level types for convenience
pub use news::{Feed, FutureNewsItem, GenerationRequest, NewsItem, Timeframe};

pub use gateway::{GatewayConfig, GatewayError, GatewayResult, HttpGateway, NewsGateway};

pub use render::{Card, MemorySurface, Panel, Region, Renderer, Surface};

pub use pipeline::{Outcome, PipelineConfig, RetrievalPipeline, RetryAction};

pub use dashboard::{build_router, serve, AppState, DashboardConfig, DashboardError};

pub use config::{Config, ConfigError, LoggingConfig};

pub use logging::init_logging;
