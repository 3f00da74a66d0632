//! Plain-text projection of the client state for the terminal front end.

use std::fmt::Write as _;

use crate::{
    models::{ConnectionStatus, MovieRecommendation, MovieSummary},
    services::{RecommendationSession, SearchSession},
    view::state::ViewState,
};

pub const NO_RESULTS_TEXT: &str = "No movies found";

/// Everything needed to draw one frame
#[derive(Debug, Clone)]
pub struct Screen<'a> {
    pub connection: ConnectionStatus,
    pub search: &'a SearchSession,
    pub shows_no_results: bool,
    pub recommendations: &'a RecommendationSession,
    pub view: ViewState,
}

pub fn connection_badge(status: ConnectionStatus) -> &'static str {
    match status {
        ConnectionStatus::Connected => "✓ API Connected",
        ConnectionStatus::Disconnected => "✗ API Offline",
        ConnectionStatus::Checking => "⟳ Checking...",
    }
}

/// One dropdown row, e.g. `Inception ⭐8.8`
pub fn search_row(movie: &MovieSummary) -> String {
    match movie.rating_label() {
        Some(rating) => format!("{} {}", movie.title, rating),
        None => movie.title.clone(),
    }
}

/// Lines of a recommendation card; `rank` is 1-based
pub fn recommendation_card(rank: usize, movie: &MovieRecommendation) -> Vec<String> {
    let mut lines = vec![format!("#{} {}", rank, movie.title)];
    let details: Vec<String> = [movie.rating_label(), movie.match_label(), movie.votes_label()]
        .into_iter()
        .flatten()
        .collect();
    if !details.is_empty() {
        lines.push(format!("   {}", details.join(" | ")));
    }
    lines
}

impl Screen<'_> {
    pub fn render(&self) -> String {
        let mut out = String::new();

        let _ = writeln!(out, "MovieRec [{}]", connection_badge(self.connection));
        let spinner = if self.search.is_loading { " ⟳" } else { "" };
        let _ = writeln!(out, "Search: {}{}", self.search.query_text, spinner);

        if self.search.is_dropdown_visible && !self.search.results.is_empty() {
            for (i, movie) in self.search.results.iter().enumerate() {
                let _ = writeln!(out, "  {}. {}", i + 1, search_row(movie));
            }
        } else if self.shows_no_results {
            let _ = writeln!(out, "  {}", NO_RESULTS_TEXT);
        }

        if let Some(movie) = &self.recommendations.selected_movie {
            let _ = writeln!(out, "Getting recommendations for: {}", movie.title);
        }

        match &self.view {
            ViewState::CheckingConnection => {
                let _ = writeln!(out, "Connecting to the recommendation service...");
            }
            ViewState::Empty => {
                let _ = writeln!(out, "Heyaa! Search for a movie above to get recommendations.");
            }
            ViewState::Searching => {
                let _ = writeln!(out, "Searching...");
            }
            ViewState::LoadingRecommendations => {
                let _ = writeln!(out, "Finding similar movies...");
            }
            ViewState::Error(message) => {
                let _ = writeln!(out, "Oops! {}", message);
                let _ = writeln!(out, "Type :reset to try again.");
            }
            ViewState::Results => {
                let recommendations = &self.recommendations.recommendations;
                let _ = writeln!(out, "{} movies perfectly matched", recommendations.len());
                for (i, movie) in recommendations.iter().enumerate() {
                    for line in recommendation_card(i + 1, movie) {
                        let _ = writeln!(out, "{}", line);
                    }
                }
            }
        }

        out
    }
}
