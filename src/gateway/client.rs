//! News Backend REST Client
//!
//! HTTP client for the news backend's health, current-news and generation
//! endpoints.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::error::{GatewayError, GatewayResult};
use super::NewsGateway;
use crate::news::{FutureNewsItem, GenerationRequest, NewsItem};

/// News backend REST client
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    config: GatewayConfig,
}

/// Configuration for the news backend client
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    /// Base URL of the backend (e.g., "http://localhost:8000")
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in milliseconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_ms: u64,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_request_timeout() -> u64 {
    10_000
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_ms: default_request_timeout(),
        }
    }
}

impl GatewayConfig {
    /// Create config pointing at a backend, with the default timeout
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }
}

impl HttpGateway {
    /// Create a new client with the given configuration
    pub fn new(config: GatewayConfig) -> GatewayResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_millis(config.request_timeout_ms))
            .build()?;

        Ok(Self { client, config })
    }

    /// Get the current configuration
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// List the news categories known to the backend
    pub async fn list_categories(&self) -> GatewayResult<Vec<String>> {
        self.get_json(&self.url("/api/news/categories")).await
    }

    /// List the news sources known to the backend
    pub async fn list_sources(&self) -> GatewayResult<Vec<String>> {
        self.get_json(&self.url("/api/news/sources")).await
    }

    /// List the generation models the backend can use
    pub async fn list_models(&self) -> GatewayResult<Vec<String>> {
        self.get_json(&self.url("/api/generation/models")).await
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> GatewayResult<T> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(GatewayError::from_transport)?;

        decode(response).await
    }
}

#[async_trait]
impl NewsGateway for HttpGateway {
    async fn check_health(&self) -> bool {
        let url = self.url("/api/health");

        let response = match self.client.get(&url).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %GatewayError::from_transport(e), "Health check failed");
                return false;
            }
        };

        if !response.status().is_success() {
            tracing::debug!(status = %response.status(), "Health check returned non-success status");
            return false;
        }

        match response.json::<HealthResponse>().await {
            Ok(health) => health.status == "healthy",
            Err(e) => {
                tracing::warn!(error = %e, "Health check body could not be decoded");
                false
            }
        }
    }

    async fn fetch_current(&self, limit: u32) -> GatewayResult<Vec<NewsItem>> {
        let url = self.url("/api/news/current");

        let response = self
            .client
            .get(&url)
            .query(&[("limit", limit)])
            .send()
            .await
            .map_err(GatewayError::from_transport)?;

        decode_listing(response).await
    }

    async fn generate_future(
        &self,
        request: &GenerationRequest,
    ) -> GatewayResult<Vec<FutureNewsItem>> {
        let url = self.url("/api/generation/future-news");

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(GatewayError::from_transport)?;

        decode_listing(response).await
    }
}

/// Check the status, then parse the body
async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> GatewayResult<T> {
    let text = read_body(response).await?;
    Ok(serde_json::from_str(&text)?)
}

/// Check the status, then parse a list body
async fn decode_listing<T: DeserializeOwned>(response: reqwest::Response) -> GatewayResult<Vec<T>> {
    let text = read_body(response).await?;
    parse_listing(&text)
}

async fn read_body(response: reqwest::Response) -> GatewayResult<String> {
    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(GatewayError::from_transport)?;

    if !status.is_success() {
        return Err(GatewayError::ApiError {
            status: status.as_u16(),
            message: text,
        });
    }

    Ok(text)
}

/// A list body is either a bare array or the backend's envelope object,
/// told apart by the first token
fn parse_listing<T: DeserializeOwned>(text: &str) -> GatewayResult<Vec<T>> {
    if text.trim_start().starts_with('{') {
        let envelope: Envelope<T> = serde_json::from_str(text)?;
        Ok(envelope.news)
    } else {
        Ok(serde_json::from_str(text)?)
    }
}

// ============================================
// Response DTOs
// ============================================

#[derive(Debug, Deserialize)]
struct HealthResponse {
    status: String,
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    #[serde(alias = "generated_news")]
    news: Vec<T>,
}
