//! News Backend Gateway
//!
//! The backend is an opaque HTTP collaborator. The pipeline only sees the
//! [`NewsGateway`] trait, so it can run against the real client or a stub.
//!
//! ## Endpoints
//!
//! - `GET /api/health` - liveness, `{"status": "healthy"}` when online
//! - `GET /api/news/current?limit=N` - current headlines
//! - `POST /api/generation/future-news` - projected headlines
//! - `GET /api/news/categories`, `GET /api/news/sources`,
//!   `GET /api/generation/models` - listings

mod client;
mod error;

pub use client::{GatewayConfig, HttpGateway};
pub use error::{GatewayError, GatewayResult};

use async_trait::async_trait;

use crate::news::{FutureNewsItem, GenerationRequest, NewsItem};

/// Access to the news backend
#[async_trait]
pub trait NewsGateway: Send + Sync {
    /// Probe the backend. Failures are logged and reported as `false`.
    async fn check_health(&self) -> bool;

    /// Fetch up to `limit` current headlines
    async fn fetch_current(&self, limit: u32) -> GatewayResult<Vec<NewsItem>>;

    /// Ask the backend to generate projections
    async fn generate_future(&self, request: &GenerationRequest)
        -> GatewayResult<Vec<FutureNewsItem>>;
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::sync::Mutex;

    /// Serve `router` on an ephemeral local port and return its base URL
    pub(crate) async fn spawn_backend(router: axum::Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    /// Canned answer for a stubbed fetch
    #[derive(Debug, Clone)]
    pub(crate) enum Scripted<T> {
        Items(Vec<T>),
        Status(u16),
    }

    impl<T: Clone> Scripted<T> {
        fn play(&self) -> GatewayResult<Vec<T>> {
            match self {
                Scripted::Items(items) => Ok(items.clone()),
                Scripted::Status(status) => Err(GatewayError::ApiError {
                    status: *status,
                    message: "scripted failure".to_string(),
                }),
            }
        }
    }

    /// Calls observed by [`StubGateway`]
    #[derive(Debug, Clone, PartialEq)]
    pub(crate) enum Call {
        Health,
        Current(u32),
        Future(GenerationRequest),
    }

    /// In-memory gateway with scripted answers
    pub(crate) struct StubGateway {
        pub healthy: bool,
        pub current: Scripted<NewsItem>,
        pub future: Scripted<FutureNewsItem>,
        pub calls: Mutex<Vec<Call>>,
    }

    impl StubGateway {
        pub(crate) fn new(healthy: bool) -> Self {
            Self {
                healthy,
                current: Scripted::Items(Vec::new()),
                future: Scripted::Items(Vec::new()),
                calls: Mutex::new(Vec::new()),
            }
        }

        pub(crate) fn with_current(mut self, current: Scripted<NewsItem>) -> Self {
            self.current = current;
            self
        }

        pub(crate) fn with_future(mut self, future: Scripted<FutureNewsItem>) -> Self {
            self.future = future;
            self
        }

        pub(crate) fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl NewsGateway for StubGateway {
        async fn check_health(&self) -> bool {
            self.calls.lock().unwrap().push(Call::Health);
            self.healthy
        }

        async fn fetch_current(&self, limit: u32) -> GatewayResult<Vec<NewsItem>> {
            self.calls.lock().unwrap().push(Call::Current(limit));
            self.current.play()
        }

        async fn generate_future(
            &self,
            request: &GenerationRequest,
        ) -> GatewayResult<Vec<FutureNewsItem>> {
            self.calls
                .lock()
                .unwrap()
                .push(Call::Future(request.clone()));
            self.future.play()
        }
    }
}
