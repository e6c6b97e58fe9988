//! Panel Routes
//!
//! Each handler runs one pipeline pass on its own surface and answers with
//! the markup that pass rendered.
//!
//! - GET  /panels/current?limit=N - refresh current headlines
//! - POST /panels/future - generate projections
//!
//! Retry controls in error panels carry the failed request's parameters and
//! post them back to these same routes.

use axum::{
    extract::{Query, State},
    response::Html,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::dashboard::error::{DashboardError, DashboardResult};
use crate::dashboard::state::AppState;
use crate::news::{Feed, GenerationRequest, Timeframe};

/// Query parameters for the current-news panel
#[derive(Debug, Deserialize)]
pub struct CurrentParams {
    pub limit: Option<u32>,
}

/// Body of a generation request from the dashboard form
#[derive(Debug, Deserialize)]
pub struct FutureParams {
    pub time_frame: Timeframe,
    #[serde(default)]
    pub style: Option<String>,
    #[serde(default)]
    pub limit: Option<u32>,
}

/// GET /panels/current
pub async fn current_panel(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CurrentParams>,
) -> DashboardResult<Html<String>> {
    let limit = params.limit.unwrap_or(state.pipeline_config.current_limit);
    validate_limit(limit)?;

    let pipeline = state.request_pipeline();
    let outcome = pipeline.fetch_current_news(limit).await;
    tracing::debug!(?outcome, "Current news panel refreshed");

    Ok(Html(pipeline.rendered(Feed::Current).markup))
}

/// POST /panels/future
pub async fn future_panel(
    State(state): State<Arc<AppState>>,
    Json(params): Json<FutureParams>,
) -> DashboardResult<Html<String>> {
    let limit = params.limit.unwrap_or(state.pipeline_config.future_limit);
    validate_limit(limit)?;

    let style = params
        .style
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| "neutral".to_string());
    let request = GenerationRequest::new(params.time_frame, style).limit(limit);

    let pipeline = state.request_pipeline();
    let outcome = pipeline.generate_future_news(request).await;
    tracing::debug!(?outcome, "Future news panel refreshed");

    Ok(Html(pipeline.rendered(Feed::Future).markup))
}

fn validate_limit(limit: u32) -> DashboardResult<()> {
    if (1..=100).contains(&limit) {
        Ok(())
    } else {
        Err(DashboardError::Validation(format!(
            "limit must be between 1 and 100, got {limit}"
        )))
    }
}
