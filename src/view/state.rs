use crate::{
    models::ConnectionStatus,
    services::{RecommendationSession, SearchSession},
};

/// The single mode deciding what the main area shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    /// Startup health probe has not answered yet and nothing else is going on
    CheckingConnection,
    /// No movie selected
    Empty,
    /// No movie selected and a search is in flight
    Searching,
    LoadingRecommendations,
    Error(String),
    /// A movie is selected and its fetch completed without error
    Results,
}

/// Derives the view state from the current sessions.
///
/// First match wins: a running fetch hides stale errors or results, an error
/// hides results, and only with nothing selected do the search and connection
/// states come into play.
pub fn compose(
    connection: ConnectionStatus,
    search: &SearchSession,
    recommendations: &RecommendationSession,
) -> ViewState {
    if recommendations.is_loading {
        return ViewState::LoadingRecommendations;
    }
    if let Some(message) = &recommendations.error_message {
        return ViewState::Error(message.clone());
    }
    if !recommendations.recommendations.is_empty() {
        return ViewState::Results;
    }
    if recommendations.selected_movie.is_none() {
        if search.is_loading {
            return ViewState::Searching;
        }
        if connection == ConnectionStatus::Checking {
            return ViewState::CheckingConnection;
        }
        return ViewState::Empty;
    }
    // Selected, finished, nothing came back
    ViewState::Results
}
