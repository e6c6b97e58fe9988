//! Retrieval Pipeline
//!
//! Orchestrates one dashboard refresh:
//!
//! ```text
//!   show loading ─▶ health check ─┬─ offline ─▶ sleep(mock delay) ─▶ mock records ─▶ render
//!                                 └─ online ──▶ fetch / generate ─┬─ ok ─▶ render
//!                                                                 └─ err ▶ error panel + retry
//! ```
//!
//! Health is re-checked on every run. Runs are independent: two concurrent
//! runs for the same feed both write to the same region and the last write
//! wins.

use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

use crate::gateway::NewsGateway;
use crate::news::{current_mocks, future_mocks, Feed, GenerationRequest};
use crate::render::{Panel, Region, Renderer, Surface};

/// Re-runs a failed request with its original arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryAction {
    Current { limit: u32 },
    Future(GenerationRequest),
}

impl RetryAction {
    pub fn feed(&self) -> Feed {
        match self {
            RetryAction::Current { .. } => Feed::Current,
            RetryAction::Future(_) => Feed::Future,
        }
    }
}

/// How a pipeline run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Backend data rendered, with the number of cards
    Live(usize),
    /// Backend offline, mock data rendered
    Mock(usize),
    /// Fetch failed, error panel shown
    Failed(RetryAction),
}

/// Pipeline configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    /// Headlines requested on the dashboard's first load
    #[serde(default = "default_current_limit")]
    pub current_limit: u32,

    /// Projections requested per generation
    #[serde(default = "default_future_limit")]
    pub future_limit: u32,

    /// Simulated latency before mock headlines appear
    #[serde(default = "default_current_mock_delay")]
    pub current_mock_delay_ms: u64,

    /// Simulated latency before mock projections appear
    #[serde(default = "default_future_mock_delay")]
    pub future_mock_delay_ms: u64,
}

fn default_current_limit() -> u32 {
    10
}

fn default_future_limit() -> u32 {
    GenerationRequest::DEFAULT_LIMIT
}

fn default_current_mock_delay() -> u64 {
    1500
}

fn default_future_mock_delay() -> u64 {
    2000
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            current_limit: default_current_limit(),
            future_limit: default_future_limit(),
            current_mock_delay_ms: default_current_mock_delay(),
            future_mock_delay_ms: default_future_mock_delay(),
        }
    }
}

/// Fetches news from the gateway, or mocks when offline, and renders it
#[derive(Clone)]
pub struct RetrievalPipeline {
    gateway: Arc<dyn NewsGateway>,
    surface: Arc<dyn Surface>,
    renderer: Arc<Renderer>,
    config: PipelineConfig,
}

impl RetrievalPipeline {
    pub fn new(
        gateway: Arc<dyn NewsGateway>,
        surface: Arc<dyn Surface>,
        renderer: Arc<Renderer>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            gateway,
            surface,
            renderer,
            config,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn surface(&self) -> &Arc<dyn Surface> {
        &self.surface
    }

    /// What the last run left in the feed's region
    pub fn rendered(&self, feed: Feed) -> Panel {
        self.surface
            .panel(Region::for_feed(feed))
            .unwrap_or_default()
    }

    /// Refresh the current-news region
    pub async fn fetch_current_news(&self, limit: u32) -> Outcome {
        let surface = self.surface.as_ref();
        self.renderer.show_loading(surface, Feed::Current);

        if !self.gateway.check_health().await {
            tracing::info!("News backend offline, using mock data for current news");
            tokio::time::sleep(Duration::from_millis(self.config.current_mock_delay_ms)).await;
            let count = self.renderer.render_current(surface, &current_mocks());
            return Outcome::Mock(count);
        }

        match self.gateway.fetch_current(limit).await {
            Ok(items) => {
                tracing::debug!(limit, count = items.len(), "Fetched current news");
                Outcome::Live(self.renderer.render_current(surface, &items))
            }
            Err(e) => {
                tracing::error!(limit, error = %e, "Error fetching current news");
                let retry = RetryAction::Current { limit };
                self.renderer.show_error(surface, retry.clone());
                Outcome::Failed(retry)
            }
        }
    }

    /// Refresh the future-news region
    pub async fn generate_future_news(&self, request: GenerationRequest) -> Outcome {
        let surface = self.surface.as_ref();
        self.renderer.show_loading(surface, Feed::Future);

        if !self.gateway.check_health().await {
            tracing::info!("News backend offline, using mock data for future news");
            tokio::time::sleep(Duration::from_millis(self.config.future_mock_delay_ms)).await;
            let items = future_mocks(request.time_frame);
            let count = self.renderer.render_future(surface, &items, request.time_frame);
            return Outcome::Mock(count);
        }

        match self.gateway.generate_future(&request).await {
            Ok(items) => {
                tracing::debug!(
                    time_frame = %request.time_frame,
                    style = %request.style,
                    count = items.len(),
                    "Generated future news"
                );
                Outcome::Live(self.renderer.render_future(surface, &items, request.time_frame))
            }
            Err(e) => {
                tracing::error!(
                    time_frame = %request.time_frame,
                    style = %request.style,
                    error = %e,
                    "Error generating future news"
                );
                let retry = RetryAction::Future(request);
                self.renderer.show_error(surface, retry.clone());
                Outcome::Failed(retry)
            }
        }
    }

    /// Re-run a request exactly as it was first issued
    pub async fn retry(&self, action: RetryAction) -> Outcome {
        tracing::info!(feed = %action.feed(), "Retrying request");
        match action {
            RetryAction::Current { limit } => self.fetch_current_news(limit).await,
            RetryAction::Future(request) => self.generate_future_news(request).await,
        }
    }

    /// Invoke the retry control of the error panel currently shown for `feed`
    ///
    /// Returns `None` if the feed is not showing an error panel.
    pub async fn retry_pending(&self, feed: Feed) -> Option<Outcome> {
        let action = self.surface.panel(Region::for_feed(feed))?.retry?;
        Some(self.retry(action).await)
    }

    /// Open the detail view for a rendered card
    pub fn show_detail(&self, feed: Feed, id: i64) -> Option<String> {
        self.renderer.show_detail(self.surface.as_ref(), feed, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::testing::{spawn_backend, Call, Scripted, StubGateway};
    use crate::gateway::{GatewayConfig, GatewayResult, HttpGateway};
    use crate::news::{FutureNewsItem, NewsItem, Timeframe};
    use crate::render::MemorySurface;
    use async_trait::async_trait;
    use axum::{
        routing::{get, post},
        Json, Router,
    };
    use chrono::Utc;
    use regex::Regex;
    use std::sync::Mutex;
    use tokio::time::Instant;

    fn pipeline(gateway: Arc<StubGateway>, surface: Arc<MemorySurface>) -> RetrievalPipeline {
        RetrievalPipeline::new(
            gateway,
            surface,
            Arc::new(Renderer::seeded(11)),
            PipelineConfig::default(),
        )
    }

    fn headline(id: i64, title: &str) -> NewsItem {
        NewsItem {
            id,
            title: title.to_string(),
            source: "Wire".to_string(),
            published_at: Utc::now(),
            description: Some(format!("about {title}")),
        }
    }

    #[test]
    fn test_default_config() {
        let config = PipelineConfig::default();
        assert_eq!(config.current_limit, 10);
        assert_eq!(config.future_limit, 5);
        assert_eq!(config.current_mock_delay_ms, 1500);
        assert_eq!(config.future_mock_delay_ms, 2000);
    }

    #[tokio::test(start_paused = true)]
    async fn test_offline_current_uses_mocks_after_delay() {
        let gateway = Arc::new(
            StubGateway::new(false).with_current(Scripted::Items(vec![headline(77, "live")])),
        );
        let surface = Arc::new(MemorySurface::new());
        let pipeline = pipeline(gateway.clone(), surface.clone());

        let wall_before = Utc::now();
        let started = Instant::now();
        let outcome = pipeline.fetch_current_news(10).await;
        let wall_after = Utc::now();

        assert_eq!(outcome, Outcome::Mock(5));
        assert!(started.elapsed() >= Duration::from_millis(1500));
        assert_eq!(gateway.calls(), vec![Call::Health]);

        let panel = surface.panel(Region::CurrentNews).unwrap();
        let ids: Vec<i64> = panel.cards.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
        assert!(!panel.markup.contains("live"));
        for card in &panel.cards {
            match &card.record {
                crate::render::Record::Current(item) => {
                    assert!(item.published_at >= wall_before && item.published_at <= wall_after);
                }
                other => panic!("unexpected record {other:?}"),
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_offline_future_uses_mocks_after_delay() {
        let gateway = Arc::new(StubGateway::new(false));
        let surface = Arc::new(MemorySurface::new());
        let pipeline = pipeline(gateway.clone(), surface.clone());

        let started = Instant::now();
        let outcome = pipeline
            .generate_future_news(GenerationRequest::new(Timeframe::Month, "neutral"))
            .await;

        assert_eq!(outcome, Outcome::Mock(5));
        assert!(started.elapsed() >= Duration::from_millis(2000));
        assert_eq!(gateway.calls(), vec![Call::Health]);

        let panel = surface.panel(Region::FutureNews).unwrap();
        let expected: Vec<i64> = future_mocks(Timeframe::Month).iter().map(|i| i.id).collect();
        assert_eq!(panel.cards.iter().map(|c| c.id).collect::<Vec<_>>(), expected);
        assert!(panel.cards.iter().all(|c| c.label == "Projected +30 days"));
    }

    #[tokio::test]
    async fn test_online_renders_gateway_items_unchanged() {
        let items = vec![headline(3, "c"), headline(1, "a"), headline(2, "b")];
        let gateway =
            Arc::new(StubGateway::new(true).with_current(Scripted::Items(items.clone())));
        let surface = Arc::new(MemorySurface::new());
        let pipeline = pipeline(gateway.clone(), surface.clone());

        let outcome = pipeline.fetch_current_news(3).await;

        assert_eq!(outcome, Outcome::Live(3));
        assert_eq!(gateway.calls(), vec![Call::Health, Call::Current(3)]);

        let records: Vec<crate::render::Record> = surface
            .panel(Region::CurrentNews)
            .unwrap()
            .cards
            .into_iter()
            .map(|c| c.record)
            .collect();
        let expected: Vec<crate::render::Record> = items
            .into_iter()
            .map(crate::render::Record::Current)
            .collect();
        assert_eq!(records, expected);
    }

    #[tokio::test]
    async fn test_online_empty_future_shows_no_projections() {
        let gateway = Arc::new(StubGateway::new(true).with_future(Scripted::Items(Vec::new())));
        let surface = Arc::new(MemorySurface::new());
        let pipeline = pipeline(gateway, surface.clone());

        let outcome = pipeline
            .generate_future_news(GenerationRequest::new(Timeframe::Day, "neutral"))
            .await;

        assert_eq!(outcome, Outcome::Live(0));
        let panel = surface.panel(Region::FutureNews).unwrap();
        assert!(panel.cards.is_empty());
        assert!(panel.markup.contains("No future projections available."));
    }

    #[tokio::test]
    async fn test_failed_fetch_retry_reissues_same_request() {
        let gateway = Arc::new(StubGateway::new(true).with_current(Scripted::Status(500)));
        let surface = Arc::new(MemorySurface::new());
        let pipeline = pipeline(gateway.clone(), surface.clone());

        let outcome = pipeline.fetch_current_news(8).await;
        assert_eq!(outcome, Outcome::Failed(RetryAction::Current { limit: 8 }));

        let panel = surface.panel(Region::CurrentNews).unwrap();
        assert!(panel.markup.contains("error-message"));
        assert!(panel.markup.contains("Retry Access"));
        assert_eq!(pipeline.rendered(Feed::Current), panel);
        assert_eq!(pipeline.rendered(Feed::Future), Panel::default());

        let retried = pipeline.retry_pending(Feed::Current).await;
        assert_eq!(
            retried,
            Some(Outcome::Failed(RetryAction::Current { limit: 8 }))
        );
        assert_eq!(
            gateway.calls(),
            vec![
                Call::Health,
                Call::Current(8),
                Call::Health,
                Call::Current(8)
            ]
        );
    }

    #[tokio::test]
    async fn test_failed_generation_retry_keeps_request() {
        let gateway = Arc::new(StubGateway::new(true).with_future(Scripted::Status(502)));
        let surface = Arc::new(MemorySurface::new());
        let pipeline = pipeline(gateway.clone(), surface.clone());
        let request = GenerationRequest::new(Timeframe::Week, "sensational").limit(2);

        let outcome = pipeline.generate_future_news(request.clone()).await;
        assert_eq!(outcome, Outcome::Failed(RetryAction::Future(request.clone())));
        assert!(surface.markup(Region::FutureNews).contains("Recalibrate"));

        pipeline.retry_pending(Feed::Future).await;
        let futures: Vec<Call> = gateway
            .calls()
            .into_iter()
            .filter(|c| matches!(c, Call::Future(_)))
            .collect();
        assert_eq!(
            futures,
            vec![Call::Future(request.clone()), Call::Future(request)]
        );
    }

    #[tokio::test]
    async fn test_retry_pending_without_error_panel() {
        let gateway = Arc::new(StubGateway::new(true));
        let surface = Arc::new(MemorySurface::new());
        let pipeline = pipeline(gateway.clone(), surface);

        assert!(pipeline.retry_pending(Feed::Current).await.is_none());

        pipeline.fetch_current_news(10).await;
        assert!(pipeline.retry_pending(Feed::Current).await.is_none());
        assert_eq!(gateway.calls().len(), 2);
    }

    /// Gateway that records what the surface showed when health was probed
    struct ProbeGateway {
        surface: Arc<MemorySurface>,
        seen: Mutex<Option<String>>,
    }

    #[async_trait]
    impl NewsGateway for ProbeGateway {
        async fn check_health(&self) -> bool {
            *self.seen.lock().unwrap() = Some(self.surface.markup(Region::CurrentNews));
            true
        }

        async fn fetch_current(&self, _limit: u32) -> GatewayResult<Vec<NewsItem>> {
            Ok(Vec::new())
        }

        async fn generate_future(
            &self,
            _request: &GenerationRequest,
        ) -> GatewayResult<Vec<FutureNewsItem>> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn test_loading_shown_before_health_check() {
        let surface = Arc::new(MemorySurface::new());
        let gateway = Arc::new(ProbeGateway {
            surface: surface.clone(),
            seen: Mutex::new(None),
        });
        let pipeline = RetrievalPipeline::new(
            gateway.clone(),
            surface.clone(),
            Arc::new(Renderer::seeded(1)),
            PipelineConfig::default(),
        );

        pipeline.fetch_current_news(10).await;

        let seen = gateway.seen.lock().unwrap().clone().unwrap();
        assert!(seen.contains("Accessing classified information..."));
        assert!(surface
            .markup(Region::CurrentNews)
            .contains("No current intelligence available."));
    }

    #[tokio::test]
    async fn test_week_generation_against_http_backend() {
        let base = spawn_backend(
            Router::new()
                .route(
                    "/api/health",
                    get(|| async { Json(serde_json::json!({"status": "healthy"})) }),
                )
                .route(
                    "/api/generation/future-news",
                    post(|Json(request): Json<GenerationRequest>| async move {
                        assert_eq!(request.time_frame, Timeframe::Week);
                        Json(serde_json::json!([{"id": 9, "title": "T", "content": "C"}]))
                    }),
                ),
        )
        .await;
        let gateway = Arc::new(HttpGateway::new(GatewayConfig::new(base)).unwrap());
        let surface = Arc::new(MemorySurface::new());
        let pipeline = RetrievalPipeline::new(
            gateway,
            surface.clone(),
            Arc::new(Renderer::new()),
            PipelineConfig::default(),
        );

        let outcome = pipeline
            .generate_future_news(GenerationRequest::new(Timeframe::Week, "neutral"))
            .await;
        assert_eq!(outcome, Outcome::Live(1));

        let panel = surface.panel(Region::FutureNews).unwrap();
        let card = &panel.cards[0];
        assert_eq!(card.id, 9);
        assert!(panel.markup.contains("Projected +7 days"));
        assert!(Regex::new(r"ID: FE-\d{4}").unwrap().is_match(&panel.markup));
        let p = card.probability.unwrap();
        assert!((60..=90).contains(&p));
        assert!(panel.markup.contains(&format!("Probability: {p}%")));
    }

    #[tokio::test]
    async fn test_detail_after_render() {
        let gateway = Arc::new(
            StubGateway::new(true).with_current(Scripted::Items(vec![headline(4, "Four")])),
        );
        let surface = Arc::new(MemorySurface::new());
        let pipeline = pipeline(gateway.clone(), surface);

        pipeline.fetch_current_news(10).await;
        let html = pipeline.show_detail(Feed::Current, 4).unwrap();

        assert!(html.contains("Four"));
        assert!(html.contains("CONFIDENTIAL - INTELLIGENCE REPORT"));
        // Detail view never goes back to the backend
        assert_eq!(gateway.calls().len(), 2);
    }
}
