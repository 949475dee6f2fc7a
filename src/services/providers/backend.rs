/// Recommendation backend provider
///
/// Talks to the external recommendation service over HTTP. The service owns
/// all ranking and storage; this side only posts the query and maps the
/// returned list.
///
/// API Flow:
/// 1. Recommendations: POST /api/recommendations {"movie_name": ...} → array of movies
/// 2. Health: GET /api/health → {"status", "movies_count"}
use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::{ApiMovie, BackendHealth, MovieSummary, RecommendationRequest},
    services::providers::RecommendationProvider,
};
use reqwest::{Client as HttpClient, StatusCode};
use std::time::Duration;

#[derive(Clone)]
pub struct BackendProvider {
    http_client: HttpClient,
    api_url: String,
}

impl BackendProvider {
    pub fn new(api_url: impl Into<String>, timeout: Duration) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;
        let api_url = api_url.into().trim_end_matches('/').to_string();

        Ok(Self {
            http_client,
            api_url,
        })
    }

    pub fn from_config(config: &Config) -> AppResult<Self> {
        Self::new(config.backend_base_url.clone(), config.request_timeout())
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Probes the backend health endpoint
    pub async fn health(&self) -> AppResult<BackendHealth> {
        let url = format!("{}/api/health", self.api_url);

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(AppError::from_transport)?;

        if !response.status().is_success() {
            return Err(AppError::Server {
                status: response.status().as_u16(),
            });
        }

        Ok(response.json().await?)
    }
}

/// Maps a non-success status to the user-facing error for `query`
fn classify_status(status: StatusCode, query: &str) -> AppError {
    if status == StatusCode::NOT_FOUND {
        AppError::NotFound {
            query: query.to_string(),
        }
    } else {
        AppError::Server {
            status: status.as_u16(),
        }
    }
}

#[async_trait::async_trait]
impl RecommendationProvider for BackendProvider {
    async fn fetch_recommendations(&self, query: &str) -> AppResult<Vec<MovieSummary>> {
        let url = format!("{}/api/recommendations", self.api_url);
        let request = RecommendationRequest {
            movie_name: query.to_string(),
        };

        let response = self
            .http_client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, query = %query, "Recommendation request failed");
                AppError::from_transport(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(
                status = status.as_u16(),
                query = %query,
                "Recommendation backend returned error status"
            );
            return Err(classify_status(status, query));
        }

        let movies: Vec<ApiMovie> = response.json().await?;
        let movies: Vec<MovieSummary> = movies.into_iter().map(MovieSummary::from).collect();

        tracing::info!(
            query = %query,
            results = movies.len(),
            provider = self.name(),
            "Recommendations fetched"
        );

        Ok(movies)
    }

    fn name(&self) -> &'static str {
        "backend"
    }
}
