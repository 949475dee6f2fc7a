//! Search orchestration state machine.
//!
//! Pure transitions: the machine never touches the network or the clock. The
//! caller passes the current instant in and performs the returned
//! [`SearchEffect`]s (notifications, fetches, holds).
//!
//! ```text
//! Idle ──submit──▶ Searching ──complete+settle──▶ Succeeded | Empty | Failed
//!                     ▲                                    │
//!                     └───────────────submit───────────────┘
//! ```
//!
//! Every accepted submission gets a new generation. Completions and settles
//! carrying an older generation are dropped, so a slow response to a
//! superseded query can never overwrite newer state.

use std::time::Duration;
use tokio::time::Instant;

use crate::error::{AppError, AppResult};
use crate::models::MovieSummary;

pub const EMPTY_QUERY_MESSAGE: &str = "Please enter a movie title.";
pub const SEARCHING_MESSAGE: &str = "Finding recommendations…";

/// Result of one recommendation fetch, with errors reduced to their message
pub type SearchOutcome = Result<Vec<MovieSummary>, String>;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SearchState {
    #[default]
    Idle,
    Searching,
    Succeeded(Vec<MovieSummary>),
    Empty,
    Failed(String),
}

impl SearchState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SearchState::Succeeded(_) | SearchState::Empty | SearchState::Failed(_)
        )
    }

    pub fn results(&self) -> &[MovieSummary] {
        match self {
            SearchState::Succeeded(movies) => movies,
            _ => &[],
        }
    }
}

/// Work requested by a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchEffect {
    /// Show a user-facing notification
    Notify(String),
    /// Fetch recommendations for `query`, tagged with `generation`
    Fetch { generation: u64, query: String },
    /// Call [`SearchMachine::settle`] for `generation` once `remaining` has passed
    Hold { generation: u64, remaining: Duration },
}

/// Rejects queries that are empty after trimming
pub fn validate_query(query: &str) -> AppResult<()> {
    if query.trim().is_empty() {
        return Err(AppError::Validation(EMPTY_QUERY_MESSAGE.to_string()));
    }
    Ok(())
}

#[derive(Debug)]
pub struct SearchMachine {
    state: SearchState,
    generation: u64,
    started_at: Option<Instant>,
    pending: Option<SearchOutcome>,
    min_loading: Duration,
}

impl SearchMachine {
    pub fn new(min_loading: Duration) -> Self {
        Self {
            state: SearchState::Idle,
            generation: 0,
            started_at: None,
            pending: None,
            min_loading,
        }
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Starts a search for `query` unless it is blank
    pub fn submit(&mut self, query: &str, now: Instant) -> Vec<SearchEffect> {
        if let Err(e) = validate_query(query) {
            return vec![SearchEffect::Notify(e.to_string())];
        }

        self.generation += 1;
        self.pending = None;
        self.started_at = Some(now);
        self.state = SearchState::Searching;

        vec![
            SearchEffect::Notify(SEARCHING_MESSAGE.to_string()),
            SearchEffect::Fetch {
                generation: self.generation,
                query: query.to_string(),
            },
        ]
    }

    /// Records the outcome of the fetch tagged `generation`
    ///
    /// The outcome settles right away when the minimum loading time has
    /// already passed; otherwise it is held and a [`SearchEffect::Hold`] is
    /// returned.
    pub fn complete(
        &mut self,
        generation: u64,
        outcome: SearchOutcome,
        now: Instant,
    ) -> Vec<SearchEffect> {
        if !self.is_current(generation) || self.state != SearchState::Searching {
            return Vec::new();
        }

        let mut effects = Vec::new();
        match &outcome {
            Ok(movies) if !movies.is_empty() => {
                effects.push(SearchEffect::Notify(format!("{} movies found!", movies.len())));
            }
            Ok(_) => {}
            Err(message) => effects.push(SearchEffect::Notify(format!("Error: {}", message))),
        }

        let elapsed = self
            .started_at
            .map(|started| now.saturating_duration_since(started))
            .unwrap_or(self.min_loading);

        self.pending = Some(outcome);
        if elapsed >= self.min_loading {
            self.settle(generation);
        } else {
            effects.push(SearchEffect::Hold {
                generation,
                remaining: self.min_loading - elapsed,
            });
        }

        effects
    }

    /// Applies the held outcome of `generation`; returns whether state changed
    pub fn settle(&mut self, generation: u64) -> bool {
        if !self.is_current(generation) {
            return false;
        }

        let Some(outcome) = self.pending.take() else {
            return false;
        };

        self.started_at = None;
        self.state = match outcome {
            Ok(movies) if movies.is_empty() => SearchState::Empty,
            Ok(movies) => SearchState::Succeeded(movies),
            Err(message) => SearchState::Failed(message),
        };
        true
    }

    fn is_current(&self, generation: u64) -> bool {
        generation != 0 && generation == self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FLOOR: Duration = Duration::from_millis(1500);

    fn inception() -> MovieSummary {
        MovieSummary::new("Inception", "Christopher Nolan", "2010-07-16")
    }

    fn fetch_generation(effects: &[SearchEffect]) -> u64 {
        effects
            .iter()
            .find_map(|e| match e {
                SearchEffect::Fetch { generation, .. } => Some(*generation),
                _ => None,
            })
            .unwrap()
    }

    #[test]
    fn test_validate_query() {
        assert!(validate_query("Inception").is_ok());
        assert!(matches!(
            validate_query(" \t "),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_blank_query_stays_idle() {
        let mut machine = SearchMachine::new(FLOOR);
        let now = Instant::now();

        for query in ["", "   ", "\t\n"] {
            let effects = machine.submit(query, now);
            assert_eq!(
                effects,
                vec![SearchEffect::Notify("Please enter a movie title.".to_string())]
            );
            assert_eq!(machine.state(), &SearchState::Idle);
        }
        assert_eq!(machine.generation(), 0);
    }

    #[test]
    fn test_submit_enters_searching_immediately() {
        let mut machine = SearchMachine::new(FLOOR);
        let effects = machine.submit(" Inception ", Instant::now());

        assert_eq!(machine.state(), &SearchState::Searching);
        assert_eq!(
            effects,
            vec![
                SearchEffect::Notify("Finding recommendations…".to_string()),
                SearchEffect::Fetch {
                    generation: 1,
                    query: " Inception ".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_fast_completion_is_held_until_floor() {
        let mut machine = SearchMachine::new(FLOOR);
        let start = Instant::now();
        let generation = fetch_generation(&machine.submit("Inception", start));

        let effects = machine.complete(
            generation,
            Ok(vec![inception()]),
            start + Duration::from_millis(10),
        );

        assert_eq!(
            effects,
            vec![
                SearchEffect::Notify("1 movies found!".to_string()),
                SearchEffect::Hold {
                    generation,
                    remaining: Duration::from_millis(1490)
                },
            ]
        );
        assert_eq!(machine.state(), &SearchState::Searching);

        assert!(machine.settle(generation));
        assert_eq!(machine.state(), &SearchState::Succeeded(vec![inception()]));
    }

    #[test]
    fn test_slow_completion_settles_immediately() {
        let mut machine = SearchMachine::new(FLOOR);
        let start = Instant::now();
        let generation = fetch_generation(&machine.submit("Inception", start));

        let effects = machine.complete(
            generation,
            Ok(vec![inception()]),
            start + Duration::from_millis(2000),
        );

        assert_eq!(
            effects,
            vec![SearchEffect::Notify("1 movies found!".to_string())]
        );
        assert_eq!(machine.state(), &SearchState::Succeeded(vec![inception()]));
    }

    #[test]
    fn test_empty_results_settle_to_empty_without_notification() {
        let mut machine = SearchMachine::new(FLOOR);
        let start = Instant::now();
        let generation = fetch_generation(&machine.submit("Obscure", start));

        let effects = machine.complete(generation, Ok(Vec::new()), start + FLOOR);

        assert!(effects.is_empty());
        assert_eq!(machine.state(), &SearchState::Empty);
    }

    #[test]
    fn test_failure_settles_to_failed_message() {
        let mut machine = SearchMachine::new(FLOOR);
        let start = Instant::now();
        let generation = fetch_generation(&machine.submit("Inception", start));

        let effects = machine.complete(
            generation,
            Err("Server error: 500".to_string()),
            start + FLOOR,
        );

        assert_eq!(
            effects,
            vec![SearchEffect::Notify("Error: Server error: 500".to_string())]
        );
        assert_eq!(
            machine.state(),
            &SearchState::Failed("Server error: 500".to_string())
        );
    }

    #[test]
    fn test_stale_completion_is_discarded() {
        let mut machine = SearchMachine::new(FLOOR);
        let start = Instant::now();
        let first = fetch_generation(&machine.submit("Slow", start));
        let second = fetch_generation(&machine.submit("Fast", start));
        assert!(second > first);

        let late = start + Duration::from_millis(3000);
        let fast = MovieSummary::new("Heat", "Michael Mann", "1995-12-15");
        machine.complete(second, Ok(vec![fast.clone()]), late);
        assert_eq!(machine.state(), &SearchState::Succeeded(vec![fast.clone()]));

        let effects = machine.complete(first, Ok(vec![inception()]), late);
        assert!(effects.is_empty());
        assert!(!machine.settle(first));
        assert_eq!(machine.state(), &SearchState::Succeeded(vec![fast]));
    }

    #[test]
    fn test_stale_settle_does_not_apply_newer_pending_outcome() {
        let mut machine = SearchMachine::new(FLOOR);
        let start = Instant::now();
        let first = fetch_generation(&machine.submit("First", start));
        let second = fetch_generation(&machine.submit("Second", start));

        machine.complete(second, Ok(vec![inception()]), start);

        assert!(!machine.settle(first));
        assert_eq!(machine.state(), &SearchState::Searching);
        assert!(machine.settle(second));
    }

    #[test]
    fn test_resubmit_clears_previous_results() {
        let mut machine = SearchMachine::new(FLOOR);
        let start = Instant::now();
        let generation = fetch_generation(&machine.submit("Inception", start));
        machine.complete(generation, Ok(vec![inception()]), start + FLOOR);
        assert_eq!(machine.state().results().len(), 1);

        machine.submit("Heat", start + FLOOR);
        assert_eq!(machine.state(), &SearchState::Searching);
        assert!(machine.state().results().is_empty());
    }

    #[test]
    fn test_blank_resubmit_keeps_terminal_state() {
        let mut machine = SearchMachine::new(FLOOR);
        let start = Instant::now();
        let generation = fetch_generation(&machine.submit("Inception", start));
        machine.complete(generation, Err("boom".to_string()), start + FLOOR);

        machine.submit("  ", start + FLOOR);
        assert_eq!(machine.state(), &SearchState::Failed("boom".to_string()));
    }

    #[test]
    fn test_duplicate_completion_is_ignored() {
        let mut machine = SearchMachine::new(FLOOR);
        let start = Instant::now();
        let generation = fetch_generation(&machine.submit("Inception", start));
        machine.complete(generation, Ok(vec![inception()]), start + FLOOR);

        let effects = machine.complete(generation, Err("late".to_string()), start + FLOOR);
        assert!(effects.is_empty());
        assert!(matches!(machine.state(), SearchState::Succeeded(_)));
    }
}
