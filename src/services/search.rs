use std::time::Duration;

use crate::{
    config::Config,
    error::AppResult,
    models::{MovieSummary, SearchResponse},
};

/// Observable state of the search box and its dropdown
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchSession {
    pub query_text: String,
    pub results: Vec<MovieSummary>,
    pub is_loading: bool,
    pub is_dropdown_visible: bool,
}

/// Work the search controller asks its owner to carry out
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchEffect {
    /// Start the debounce timer, replacing any timer that has not fired yet
    ScheduleDebounce { generation: u64, delay: Duration },
    /// Drop any timer that has not fired yet
    CancelDebounce,
    /// Call the remote search operation
    IssueSearch {
        generation: u64,
        query: String,
        limit: u32,
    },
}

/// Debounced search over the recommendation service's catalogue
///
/// Every text change bumps a generation counter. Timers and responses carry the
/// generation they were started for, and anything tagged with an older generation
/// is discarded, so only the latest keystroke can ever populate `results`.
#[derive(Debug, Clone)]
pub struct SearchController {
    session: SearchSession,
    generation: u64,
    in_flight: Option<u64>,
    debounce: Duration,
    min_query_len: usize,
    limit: u32,
}

impl SearchController {
    pub fn new(config: &Config) -> Self {
        Self {
            session: SearchSession::default(),
            generation: 0,
            in_flight: None,
            debounce: config.debounce(),
            min_query_len: config.min_query_len,
            limit: config.search_limit,
        }
    }

    pub fn session(&self) -> &SearchSession {
        &self.session
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Handles a new value of the search box
    ///
    /// Returns `None` when the text did not actually change.
    pub fn on_text_changed(&mut self, text: impl Into<String>) -> Option<SearchEffect> {
        let text = text.into();
        if text == self.session.query_text {
            return None;
        }

        self.session.query_text = text;
        self.invalidate();

        if self.session.query_text.chars().count() < self.min_query_len {
            self.session.results.clear();
            self.session.is_dropdown_visible = false;
            return Some(SearchEffect::CancelDebounce);
        }

        Some(SearchEffect::ScheduleDebounce {
            generation: self.generation,
            delay: self.debounce,
        })
    }

    /// Handles a debounce timer firing; stale timers yield nothing
    pub fn on_debounce_elapsed(&mut self, generation: u64) -> Option<SearchEffect> {
        if generation != self.generation {
            tracing::debug!(
                generation,
                current = self.generation,
                "Ignoring superseded debounce timer"
            );
            return None;
        }

        self.in_flight = Some(generation);
        self.session.is_loading = true;

        Some(SearchEffect::IssueSearch {
            generation,
            query: self.session.query_text.clone(),
            limit: self.limit,
        })
    }

    /// Applies a search outcome if it still belongs to the current query
    ///
    /// Declines and transport failures both degrade to an empty result list;
    /// search never surfaces an error to the user. Returns whether the
    /// outcome was applied.
    pub fn on_search_finished(
        &mut self,
        generation: u64,
        outcome: AppResult<SearchResponse>,
    ) -> bool {
        if self.in_flight != Some(generation) {
            tracing::debug!(generation, "Discarding stale search response");
            return false;
        }

        self.in_flight = None;
        self.session.is_loading = false;

        match outcome {
            Ok(response) if response.success => {
                self.session.results = response.results;
                if !self.session.results.is_empty() {
                    self.session.is_dropdown_visible = true;
                }
            }
            Ok(response) => {
                tracing::warn!(
                    query = %self.session.query_text,
                    error = ?response.error,
                    "Search declined by service"
                );
                self.session.results.clear();
            }
            Err(e) => {
                tracing::warn!(
                    query = %self.session.query_text,
                    error = %e,
                    "Search error"
                );
                self.session.results.clear();
            }
        }

        true
    }

    /// Re-reveals a still-valid result list without querying again
    pub fn on_focus(&mut self) {
        if !self.session.results.is_empty() {
            self.session.is_dropdown_visible = true;
        }
    }

    /// Accepts `movie` as the user's choice and hands it back for recommendation
    ///
    /// Any pending timer or in-flight search is invalidated so it cannot reopen
    /// the dropdown afterwards.
    pub fn on_select(&mut self, movie: MovieSummary) -> MovieSummary {
        self.session.query_text = movie.title.clone();
        self.session.is_dropdown_visible = false;
        if self.session.query_text.chars().count() < self.min_query_len {
            self.session.results.clear();
        }
        self.invalidate();
        movie
    }

    /// Selects the row at `index` (0-based) of the current result list
    pub fn select_index(&mut self, index: usize) -> Option<MovieSummary> {
        let movie = self.session.results.get(index).cloned()?;
        Some(self.on_select(movie))
    }

    /// Whether the dropdown should show the "no results" indicator
    pub fn shows_no_results(&self) -> bool {
        self.session.is_dropdown_visible
            && self.session.results.is_empty()
            && self.session.query_text.chars().count() >= self.min_query_len
            && !self.session.is_loading
    }

    fn invalidate(&mut self) {
        self.generation += 1;
        self.in_flight = None;
        self.session.is_loading = false;
    }
}
