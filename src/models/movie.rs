use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

const WEB_SEARCH_URL: &str = "https://www.google.com/search";

/// A recommended movie as shown on a result card
///
/// Has no stable external ID; within a result list it is identified by its
/// title together with its position.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MovieSummary {
    pub title: String,
    pub director: String,
    /// ISO date, `YYYY-MM-DD`
    pub release_date: String,
}

impl MovieSummary {
    pub fn new(
        title: impl Into<String>,
        director: impl Into<String>,
        release_date: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            director: director.into(),
            release_date: release_date.into(),
        }
    }

    /// Year portion of the release date (everything before the first `-`)
    pub fn release_year(&self) -> &str {
        self.release_date
            .split('-')
            .next()
            .unwrap_or(&self.release_date)
    }

    /// Outbound web search link for this movie
    pub fn web_search_url(&self) -> AppResult<String> {
        let text = format!("{} movie {}", self.title, self.director);
        Url::parse_with_params(WEB_SEARCH_URL, &[("q", text.as_str())])
            .map(String::from)
            .map_err(|e| AppError::Internal(format!("Invalid search URL: {}", e)))
    }
}

/// Enriched information shown in the detail view
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MovieDetail {
    pub summary: String,
    pub genres: Vec<String>,
}
