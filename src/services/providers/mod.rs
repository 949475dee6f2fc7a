/// Recommendation and detail data providers
///
/// The application loop only ever talks to these traits, so a provider can be
/// swapped (a real detail endpoint replacing the local synthesis, a fake in
/// tests) without touching the orchestration.
use crate::{
    error::AppResult,
    models::{MovieDetail, MovieSummary},
};

pub mod backend;
pub mod synthesized;

pub use backend::BackendProvider;
pub use synthesized::SynthesizedDetailProvider;

/// Source of movie recommendations
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RecommendationProvider: Send + Sync {
    /// Fetch recommendations similar to `query`
    ///
    /// The query is sent as given; callers reject blank queries beforehand.
    async fn fetch_recommendations(&self, query: &str) -> AppResult<Vec<MovieSummary>>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Source of detail information for a selected movie
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait DetailProvider: Send + Sync {
    async fn fetch_details(&self, movie: &MovieSummary) -> AppResult<MovieDetail>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
