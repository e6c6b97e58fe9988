//! Foresight Dashboard Server
//!
//! Serves the dashboard page and binds its controls to the retrieval
//! pipeline, built with Axum.
//!
//! # Endpoints
//!
//! ## Page
//! - `GET /` - Dashboard shell
//!
//! ## Panels
//! - `GET /panels/current?limit=N` - Refresh current headlines
//! - `POST /panels/future` - Generate projections (`{"time_frame": "WEEK", "style": "neutral"}`)
//!
//! Panels are rendered per request and the server keeps none of them. Each
//! card embeds its own detail view and each error panel embeds the request
//! its retry control re-issues.
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health` - Status including backend reachability
//!
//! # Example
//!
//! ```rust,ignore
//! use foresight::dashboard::{serve, AppState, DashboardConfig};
//! use foresight::gateway::{GatewayConfig, HttpGateway};
//! use foresight::pipeline::PipelineConfig;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let gateway = Arc::new(HttpGateway::new(GatewayConfig::default())?);
//!     let config = DashboardConfig::default();
//!
//!     let state = AppState::new(gateway, PipelineConfig::default(), config.clone());
//!     serve(state, &config).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod routes;
pub mod state;

pub use error::{DashboardError, DashboardResult};
pub use state::{AppState, DashboardConfig};

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Build the dashboard router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let panel_routes = Router::new()
        .route("/current", get(routes::panels::current_panel))
        .route("/future", post(routes::panels::future_panel));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/", get(routes::health::full_health));

    let shared_state = Arc::new(state);

    Router::new()
        .route("/", get(routes::page::index))
        .nest("/panels", panel_routes)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(shared_state)
}

/// Start the dashboard server
pub async fn serve(state: AppState, config: &DashboardConfig) -> Result<(), DashboardError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Foresight dashboard listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| DashboardError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Foresight dashboard shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::testing::{Call, Scripted, StubGateway};
    use crate::news::NewsItem;
    use crate::pipeline::PipelineConfig;
    use crate::render::Renderer;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use chrono::Utc;
    use regex::Regex;
    use tower::util::ServiceExt;

    fn create_test_app(gateway: StubGateway) -> Router {
        create_test_app_with(Arc::new(gateway))
    }

    fn create_test_app_with(gateway: Arc<StubGateway>) -> Router {
        let pipeline_config = PipelineConfig {
            current_mock_delay_ms: 0,
            future_mock_delay_ms: 0,
            ..Default::default()
        };
        let state = AppState::with_renderer(
            gateway,
            Renderer::seeded(5),
            pipeline_config,
            DashboardConfig::default(),
        );
        build_router(state)
    }

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health_live() {
        let app = create_test_app(StubGateway::new(true));
        let response = app.oneshot(get("/health/live")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_reports_offline_backend() {
        let app = create_test_app(StubGateway::new(false));
        let response = app.oneshot(get("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(body["status"], "degraded");
        assert_eq!(body["backend"], "offline");
    }

    #[tokio::test]
    async fn test_index_page() {
        let app = create_test_app(StubGateway::new(true));
        let response = app.oneshot(get("/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("generate-btn"));
    }

    #[tokio::test]
    async fn test_current_panel_offline_serves_mocks() {
        let app = create_test_app(StubGateway::new(false));
        let response = app.oneshot(get("/panels/current")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_text(response).await;
        assert_eq!(html.matches("class=\"news-card\"").count(), 5);
        assert!(html.contains("Global Leaders Gather for Climate Summit"));
    }

    #[tokio::test]
    async fn test_current_panel_rejects_zero_limit() {
        let app = create_test_app(StubGateway::new(true));
        let response = app.oneshot(get("/panels/current?limit=0")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_future_panel_live() {
        let gateway = StubGateway::new(true).with_future(Scripted::Items(vec![
            crate::news::FutureNewsItem {
                id: 9,
                title: "T".to_string(),
                content: Some("C".to_string()),
            },
        ]));
        let app = create_test_app(gateway);

        let response = app
            .oneshot(post_json(
                "/panels/future",
                r#"{"time_frame": "WEEK", "style": "neutral"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_text(response).await;
        assert!(html.contains("Projected +7 days"));
        assert!(html.contains(r#"data-id="9""#));
    }

    #[tokio::test]
    async fn test_future_panel_rejects_unknown_timeframe() {
        let app = create_test_app(StubGateway::new(true));
        let response = app
            .oneshot(post_json("/panels/future", r#"{"time_frame": "YEAR"}"#))
            .await
            .unwrap();
        assert!(response.status().is_client_error());
    }

    #[tokio::test]
    async fn test_failed_panel_retry_carries_request() {
        let gateway = Arc::new(StubGateway::new(true).with_current(Scripted::Status(500)));
        let app = create_test_app_with(gateway.clone());

        let response = app.clone().oneshot(get("/panels/current?limit=4")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains(r#"data-retry="current" data-limit="4""#));
        assert!(html.contains("Retry Access"));

        // The retry control re-issues the same request against the same route
        app.oneshot(get("/panels/current?limit=4")).await.unwrap();
        let limits: Vec<Call> = gateway
            .calls()
            .into_iter()
            .filter(|c| matches!(c, Call::Current(_)))
            .collect();
        assert_eq!(limits, vec![Call::Current(4), Call::Current(4)]);
    }

    #[tokio::test]
    async fn test_current_cards_embed_detail() {
        let gateway = StubGateway::new(true).with_current(Scripted::Items(vec![NewsItem {
            id: 12,
            title: "Harbour reopens".to_string(),
            source: "Coast Gazette".to_string(),
            published_at: Utc::now(),
            description: None,
        }]));
        let app = create_test_app(gateway);

        let html = body_text(app.oneshot(get("/panels/current")).await.unwrap()).await;
        let detail = detail_of(&html, 12);
        assert!(detail.contains("Harbour reopens"));
        assert!(detail.contains("Coast Gazette"));
        assert!(detail.contains("No description available."));
        assert!(detail.contains("CONFIDENTIAL - INTELLIGENCE REPORT"));
    }

    /// Card block for `id`: its own markup up to the next card
    fn card_block(html: &str, id: i64) -> &str {
        let start = html.find(&format!(r#"data-id="{id}" data-feed"#)).unwrap();
        let rest = &html[start..];
        match rest[1..].find("<div class=\"news-card") {
            Some(end) => &rest[..end + 1],
            None => rest,
        }
    }

    /// Detail template embedded in the card for `id`
    fn detail_of(html: &str, id: i64) -> String {
        card_block(html, id)
            .split(r#"<template class="card-detail">"#)
            .nth(1)
            .and_then(|rest| rest.split("</template>").next())
            .unwrap()
            .to_string()
    }

    #[tokio::test]
    async fn test_interleaved_generations_keep_own_details() {
        let app = create_test_app(StubGateway::new(false));
        let id_pattern = Regex::new(r"ID: FE-\d{4}").unwrap();
        let probability_pattern = Regex::new(r"Probability: \d+%").unwrap();

        let (week, day) = tokio::join!(
            app.clone().oneshot(post_json("/panels/future", r#"{"time_frame": "WEEK"}"#)),
            app.clone().oneshot(post_json("/panels/future", r#"{"time_frame": "DAY"}"#)),
        );
        let week = body_text(week.unwrap()).await;
        let day = body_text(day.unwrap()).await;

        for (html, label, other) in [
            (&week, "Projected +7 days", "Projected +24 hours"),
            (&day, "Projected +24 hours", "Projected +7 days"),
        ] {
            assert!(!html.contains(r#"class="loading""#));
            assert!(!html.contains(other));

            for id in 101..=105 {
                let block = card_block(html, id);
                let (card, _) = block.split_once("<template").unwrap();
                let detail = detail_of(html, id);

                let card_id = id_pattern.find(card).unwrap().as_str();
                let card_probability = probability_pattern.find(card).unwrap().as_str();
                assert!(detail.contains(card_id));
                assert!(detail.contains(card_probability));
                assert!(detail.contains(label));
            }
        }
    }
}
