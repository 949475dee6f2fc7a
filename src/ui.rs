//! Plain-text rendering of the view state and parsing of input lines for the
//! terminal host.

use std::fmt::Write;

use crate::app::{Command, DetailStatus, DetailView, SearchState, ViewState};
use crate::models::ThemePreference;

/// What a line typed by the user asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Command(Command),
    Help,
    Quit,
    /// A slash command that was not understood
    Unknown(String),
}

/// Parses one input line
///
/// Anything that is not a slash command is submitted as a search query,
/// including blank lines (the application answers those with a notification).
pub fn parse_input(line: &str) -> Input {
    let trimmed = line.trim();
    let Some(rest) = trimmed.strip_prefix('/') else {
        return Input::Command(Command::Submit(line.to_string()));
    };

    let mut parts = rest.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some("open"), Some(n)) => match n.parse::<usize>() {
            Ok(n) if n >= 1 => Input::Command(Command::OpenDetail(n - 1)),
            _ => Input::Unknown(trimmed.to_string()),
        },
        (Some("close"), None) => Input::Command(Command::CloseDetail),
        (Some("theme"), None) => Input::Command(Command::ToggleTheme),
        (Some("theme"), Some("light")) => Input::Command(Command::SetTheme(ThemePreference::Light)),
        (Some("theme"), Some("dark")) => Input::Command(Command::SetTheme(ThemePreference::Dark)),
        (Some("dismiss"), None) => Input::Command(Command::DismissNotification),
        (Some("help"), None) => Input::Help,
        (Some("quit"), None) | (Some("exit"), None) => Input::Quit,
        _ => Input::Unknown(trimmed.to_string()),
    }
}

pub const HELP: &str = "\
Type a movie title and press Enter to get recommendations.
  /open <n>            show details for result n
  /close               close the detail view
  /theme [light|dark]  switch theme
  /dismiss             hide the current notification
  /quit                exit";

/// Renders a full frame for `view`
pub fn render(view: &ViewState) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "=== Movie Recommendation System [{}] ===", view.theme);

    match &view.search {
        SearchState::Idle => {
            let _ = writeln!(out, "Ready to find some movies?");
            let _ = writeln!(out, "Enter a movie you like and we'll suggest others!");
        }
        SearchState::Searching => {
            let _ = writeln!(out, "Searching...");
        }
        SearchState::Succeeded(movies) => {
            for (i, movie) in movies.iter().enumerate() {
                let _ = writeln!(
                    out,
                    "{:>2}. {} | {} | {}",
                    i + 1,
                    movie.title,
                    movie.director,
                    movie.release_date
                );
            }
        }
        SearchState::Empty => {
            let _ = writeln!(out, "No movies found.");
            let _ = writeln!(out, "Try a different movie title or check for typos.");
        }
        SearchState::Failed(message) => {
            let _ = writeln!(out, "! {}", message);
        }
    }

    if let Some(detail) = &view.detail {
        render_detail(&mut out, detail);
    }

    if view.notification.visible {
        let _ = writeln!(out, ">> {}", view.notification.message);
    }

    out
}

fn render_detail(out: &mut String, detail: &DetailView) {
    let movie = &detail.movie;
    let _ = writeln!(out);
    let _ = writeln!(out, "--- {} ---", movie.title);
    let _ = writeln!(out, "Directed by {} | {}", movie.director, movie.release_date);

    match &detail.status {
        DetailStatus::Loading => {
            let _ = writeln!(out, "Fetching details...");
        }
        DetailStatus::Failed(message) => {
            let _ = writeln!(out, "! {}", message);
        }
        DetailStatus::Loaded(info) => {
            let _ = writeln!(out, "{}", info.summary);
            let _ = writeln!(out, "Genres: {}", info.genres.join(", "));
        }
    }

    if let Ok(url) = movie.web_search_url() {
        let _ = writeln!(out, "Search: {}", url);
    }
}
