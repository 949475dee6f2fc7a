/// Locally synthesized movie details
///
/// Stand-in for a detail endpoint the backend does not have yet. It keeps the
/// remote contract (async, latency, failable signature) so the real call can
/// replace it behind `DetailProvider`.
use crate::{
    error::AppResult,
    models::{MovieDetail, MovieSummary},
    services::providers::DetailProvider,
};
use std::time::Duration;

const PLACEHOLDER_GENRES: [&str; 2] = ["Drama", "Thriller"];

#[derive(Debug, Clone)]
pub struct SynthesizedDetailProvider {
    latency: Duration,
}

impl SynthesizedDetailProvider {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }

    fn synthesize(movie: &MovieSummary) -> MovieDetail {
        MovieDetail {
            summary: format!(
                "{} is a compelling film directed by {}. Released in {}, this movie offers an engaging story that has captivated audiences.",
                movie.title,
                movie.director,
                movie.release_year()
            ),
            genres: PLACEHOLDER_GENRES.iter().map(|g| g.to_string()).collect(),
        }
    }
}

impl Default for SynthesizedDetailProvider {
    fn default() -> Self {
        Self::new(Duration::from_millis(500))
    }
}

#[async_trait::async_trait]
impl DetailProvider for SynthesizedDetailProvider {
    async fn fetch_details(&self, movie: &MovieSummary) -> AppResult<MovieDetail> {
        tokio::time::sleep(self.latency).await;

        tracing::debug!(title = %movie.title, provider = self.name(), "Details synthesized");

        Ok(Self::synthesize(movie))
    }

    fn name(&self) -> &'static str {
        "synthesized"
    }
}
