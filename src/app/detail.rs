//! Detail view for a selected movie.
//!
//! Independent of the search state. Nothing is cached: each open starts a
//! fresh fetch, and closing throws the view away.

use crate::models::{MovieDetail, MovieSummary};

pub const DETAIL_ERROR_MESSAGE: &str = "Could not load movie details.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailStatus {
    Loading,
    Loaded(MovieDetail),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub movie: MovieSummary,
    pub status: DetailStatus,
}

#[derive(Debug, Default)]
pub struct DetailPanel {
    view: Option<DetailView>,
    ticket: u64,
}

impl DetailPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> Option<&DetailView> {
        self.view.as_ref()
    }

    /// Opens `movie` in the loading state; returns the ticket for its fetch
    pub fn open(&mut self, movie: MovieSummary) -> u64 {
        self.ticket += 1;
        self.view = Some(DetailView {
            movie,
            status: DetailStatus::Loading,
        });
        self.ticket
    }

    /// Applies a fetch result; returns whether the view changed
    pub fn resolve<E>(&mut self, ticket: u64, result: Result<MovieDetail, E>) -> bool {
        if ticket != self.ticket {
            return false;
        }

        let Some(view) = self.view.as_mut() else {
            return false;
        };

        view.status = match result {
            Ok(detail) => DetailStatus::Loaded(detail),
            Err(_) => DetailStatus::Failed(DETAIL_ERROR_MESSAGE.to_string()),
        };
        true
    }

    pub fn close(&mut self) {
        self.ticket += 1;
        self.view = None;
    }
}
