use crate::{
    error::{AppError, AppResult, DECLINED_FALLBACK_MESSAGE},
    models::{MovieRecommendation, MovieSummary, RecommendResponse},
};

/// What the user currently sees for the selected movie
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecommendationSession {
    pub selected_movie: Option<MovieSummary>,
    pub recommendations: Vec<MovieRecommendation>,
    pub is_loading: bool,
    pub error_message: Option<String>,
}

/// A recommendation fetch the controller wants issued
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecommendRequestTicket {
    pub generation: u64,
    pub title: String,
    pub top_n: u32,
}

/// Owns the recommendation session for the selected movie
///
/// Each selection or reset starts a new generation; a response is applied only
/// if it was requested for the current one, so a late answer can never bring
/// back state the user has moved on from.
#[derive(Debug, Clone)]
pub struct RecommendationController {
    session: RecommendationSession,
    generation: u64,
    top_n: u32,
}

impl RecommendationController {
    pub fn new(top_n: u32) -> Self {
        Self {
            session: RecommendationSession::default(),
            generation: 0,
            top_n,
        }
    }

    pub fn session(&self) -> &RecommendationSession {
        &self.session
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Starts a fresh session for `movie` and returns the fetch to issue
    pub fn on_select(&mut self, movie: MovieSummary) -> RecommendRequestTicket {
        self.generation += 1;

        let title = movie.title.clone();
        self.session = RecommendationSession {
            selected_movie: Some(movie),
            recommendations: vec![],
            is_loading: true,
            error_message: None,
        };

        tracing::info!(
            title = %title,
            generation = self.generation,
            "Fetching recommendations"
        );

        RecommendRequestTicket {
            generation: self.generation,
            title,
            top_n: self.top_n,
        }
    }

    /// Applies the outcome of a fetch; returns whether it was still current
    pub fn on_recommendations_finished(
        &mut self,
        generation: u64,
        outcome: AppResult<RecommendResponse>,
    ) -> bool {
        if generation != self.generation {
            tracing::debug!(
                generation,
                current = self.generation,
                "Discarding stale recommendation response"
            );
            return false;
        }

        match outcome.and_then(accept) {
            Ok(recommendations) => {
                self.session.recommendations = recommendations;
                self.session.error_message = None;
            }
            Err(e) => {
                tracing::warn!(error = %e, kind = ?e.kind(), "Recommendation fetch failed");
                self.session.recommendations.clear();
                self.session.error_message = Some(e.user_message());
            }
        }
        self.session.is_loading = false;

        true
    }

    /// Clears the session; any response still in flight is ignored on arrival
    pub fn reset(&mut self) {
        self.generation += 1;
        self.session = RecommendationSession::default();
    }
}

/// Turns a declined envelope into an error; order is kept as ranked by the service
fn accept(response: RecommendResponse) -> AppResult<Vec<MovieRecommendation>> {
    if response.success {
        Ok(response.recommendations)
    } else {
        Err(AppError::Declined(
            response
                .error
                .unwrap_or_else(|| DECLINED_FALLBACK_MESSAGE.to_string()),
        ))
    }
}
