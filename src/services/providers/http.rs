/// HTTP provider for the recommendation service
///
/// Endpoints, relative to the configured base URL:
/// 1. Search: `GET /search?q=..&limit=..`
/// 2. Recommend: `POST /recommend` with `{title, top_n}`
/// 3. Health: `GET /health`
///
/// Non-2xx statuses are errors even when the body carries a `success: false`
/// envelope, so a decline only surfaces when the service answers 2xx.
use crate::{
    config::Config,
    error::{AppError, AppResult},
    middleware::request_id::{make_span_with_request_id, with_request_id},
    models::{HealthResponse, RecommendRequest, RecommendResponse, SearchResponse},
    services::providers::RecommendationService,
};
use reqwest::{Client as HttpClient, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::Instrument;

#[derive(Clone)]
pub struct HttpRecommendationClient {
    http_client: HttpClient,
    api_url: String,
}

impl HttpRecommendationClient {
    /// Creates a client for the service at `config.api_base_url`
    pub fn new(config: &Config) -> AppResult<Self> {
        let http_client = HttpClient::builder()
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self::with_client(http_client, config.base_url()))
    }

    pub fn with_client(http_client: HttpClient, api_url: impl Into<String>) -> Self {
        let api_url = api_url.into();
        Self {
            http_client,
            api_url: api_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.api_url, path.trim_start_matches('/'))
    }

    /// Sends a tagged request and decodes a 2xx JSON body
    async fn execute<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        builder: RequestBuilder,
    ) -> AppResult<T> {
        let (builder, request_id) = with_request_id(builder);
        let span = make_span_with_request_id(operation, &request_id);

        async move {
            let response = builder.send().await.map_err(|e| {
                tracing::warn!(error = %e, "Recommendation service request failed");
                AppError::from(e)
            })?;

            if !response.status().is_success() {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                tracing::warn!(status = status.as_u16(), "Recommendation service returned error status");
                return Err(AppError::UnexpectedStatus {
                    status: status.as_u16(),
                    body,
                });
            }

            let response_text = response.text().await?;
            tracing::debug!(response = %response_text, "Raw recommendation service response");

            serde_json::from_str(&response_text).map_err(|e| {
                tracing::error!(
                    error = %e,
                    response = %response_text,
                    "Failed to deserialize recommendation service response"
                );
                AppError::MalformedResponse(format!("Failed to parse {} response: {}", operation, e))
            })
        }
        .instrument(span)
        .await
    }
}

#[async_trait::async_trait]
impl RecommendationService for HttpRecommendationClient {
    async fn search(&self, query: &str, limit: u32) -> AppResult<SearchResponse> {
        let limit = limit.to_string();
        let builder = self
            .http_client
            .get(self.url("search"))
            .query(&[("q", query), ("limit", limit.as_str())]);

        let response: SearchResponse = self.execute("search", builder).await?;

        tracing::info!(
            query = %query,
            success = response.success,
            results = response.results.len(),
            provider = self.name(),
            "Title search completed"
        );

        Ok(response)
    }

    async fn recommend(&self, title: &str, top_n: u32) -> AppResult<RecommendResponse> {
        let request = RecommendRequest {
            title: title.to_string(),
            top_n,
        };
        let builder = self.http_client.post(self.url("recommend")).json(&request);

        let response: RecommendResponse = self.execute("recommend", builder).await?;

        tracing::info!(
            title = %title,
            success = response.success,
            recommendations = response.recommendations.len(),
            provider = self.name(),
            "Recommendations fetched"
        );

        Ok(response)
    }

    async fn health_check(&self) -> AppResult<HealthResponse> {
        let builder = self.http_client.get(self.url("health"));
        let response: HealthResponse = self.execute("health", builder).await?;

        tracing::info!(
            status = %response.status,
            total_movies = ?response.total_movies,
            "Health check completed"
        );

        Ok(response)
    }

    fn name(&self) -> &'static str {
        "http"
    }
}
