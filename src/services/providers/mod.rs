/// Recommendation service abstraction
///
/// The controllers only ever talk to the remote service through this trait, so the
/// reqwest-backed client can be swapped for a mock in tests. Every operation is a
/// single round trip; any transport-level failure comes back as an `Err` and is
/// treated by callers as "service unreachable".
use crate::{
    error::AppResult,
    models::{HealthResponse, RecommendResponse, SearchResponse},
};

pub mod http;

pub use http::HttpRecommendationClient;

/// Trait for the remote movie recommendation service
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RecommendationService: Send + Sync {
    /// Search the catalogue by (partial) title
    ///
    /// `query` is passed through as typed; the service applies its own matching.
    async fn search(&self, query: &str, limit: u32) -> AppResult<SearchResponse>;

    /// Fetch the `top_n` movies most similar to `title`
    ///
    /// A completed call may still carry `success: false`; that is a decline, not an error.
    async fn recommend(&self, title: &str, top_n: u32) -> AppResult<RecommendResponse>;

    /// Liveness probe
    async fn health_check(&self) -> AppResult<HealthResponse>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
