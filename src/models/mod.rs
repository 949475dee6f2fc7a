use serde::{Deserialize, Serialize};

pub mod movie;
pub mod theme;

pub use movie::{MovieDetail, MovieSummary};
pub use theme::ThemePreference;

const DIRECTOR_PREFIX: &str = "Directed by ";

// ============================================================================
// Recommendation Backend API Types
// ============================================================================

/// Request body for `POST /api/recommendations`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecommendationRequest {
    pub movie_name: String,
}

/// Raw recommendation entry returned by the backend
///
/// The backend also sends `poster_path` and `vote_average`; they carry no
/// information (empty / constant) and are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiMovie {
    pub title: String,
    /// Of the form `"Directed by <name>"`
    pub overview: String,
    pub release_date: String,
}

impl From<ApiMovie> for MovieSummary {
    fn from(movie: ApiMovie) -> Self {
        let director = match movie.overview.strip_prefix(DIRECTOR_PREFIX) {
            Some(name) => name.to_string(),
            None => movie.overview,
        };

        MovieSummary {
            title: movie.title,
            director,
            release_date: movie.release_date,
        }
    }
}

/// Response of `GET /api/health`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BackendHealth {
    pub status: String,
    pub movies_count: u64,
}
