use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::{
    config::Config,
    models::{ConnectionStatus, MovieSummary},
    services::{
        recommendations::RecommendRequestTicket, RecommendationController,
        RecommendationService, RecommendationSession, SearchController, SearchEffect,
        SearchSession,
    },
    view::{compose, Screen, ViewState},
};

use super::events::{Event, Flow};

/// Client application state and its event loop
///
/// All state lives on the task that calls [`App::handle`]. Debounce timers and
/// network calls run as spawned tasks that only ever post an [`Event`] back, so
/// mutations happen one event at a time without locking.
pub struct App {
    service: Arc<dyn RecommendationService>,
    search: SearchController,
    recommendations: RecommendationController,
    connection: ConnectionStatus,
    events: mpsc::UnboundedSender<Event>,
    /// The one debounce timer that may still fire
    debounce_timer: Option<JoinHandle<()>>,
}

impl App {
    /// Creates the app and the receiving end of its event channel
    pub fn new(
        service: Arc<dyn RecommendationService>,
        config: &Config,
    ) -> (Self, mpsc::UnboundedReceiver<Event>) {
        let (events, receiver) = mpsc::unbounded_channel();
        let app = Self {
            service,
            search: SearchController::new(config),
            recommendations: RecommendationController::new(config.top_n),
            connection: ConnectionStatus::Checking,
            events,
            debounce_timer: None,
        };
        (app, receiver)
    }

    /// Handle for feeding user input into the loop
    pub fn sender(&self) -> mpsc::UnboundedSender<Event> {
        self.events.clone()
    }

    pub fn connection(&self) -> ConnectionStatus {
        self.connection
    }

    pub fn search_session(&self) -> &SearchSession {
        self.search.session()
    }

    pub fn recommendation_session(&self) -> &RecommendationSession {
        self.recommendations.session()
    }

    pub fn view_state(&self) -> ViewState {
        compose(
            self.connection,
            self.search.session(),
            self.recommendations.session(),
        )
    }

    pub fn screen(&self) -> Screen<'_> {
        Screen {
            connection: self.connection,
            search: self.search.session(),
            shows_no_results: self.search.shows_no_results(),
            recommendations: self.recommendations.session(),
            view: self.view_state(),
        }
    }

    /// Fires the one-shot startup health probe
    pub fn start(&self) {
        let service = Arc::clone(&self.service);
        let events = self.events.clone();
        tokio::spawn(async move {
            let status = match service.health_check().await {
                Ok(_) => ConnectionStatus::Connected,
                Err(e) => {
                    tracing::warn!(error = %e, provider = service.name(), "API health check failed");
                    ConnectionStatus::Disconnected
                }
            };
            let _ = events.send(Event::HealthChecked(status));
        });
    }

    /// Applies one event to the state
    pub fn handle(&mut self, event: Event) -> Flow {
        match event {
            Event::TextChanged(text) => {
                if let Some(effect) = self.search.on_text_changed(text) {
                    self.apply_search_effect(effect);
                }
            }
            Event::Focus => self.search.on_focus(),
            Event::Select(index) => match self.search.select_index(index) {
                Some(movie) => {
                    self.cancel_debounce();
                    self.select(movie);
                }
                None => tracing::debug!(index, "No search result at selected row"),
            },
            Event::SelectMovie(movie) => {
                self.cancel_debounce();
                let movie = self.search.on_select(movie);
                self.select(movie);
            }
            Event::Reset => self.recommendations.reset(),
            Event::Quit => {
                self.cancel_debounce();
                return Flow::Quit;
            }
            Event::DebounceElapsed { generation } => {
                self.debounce_timer = None;
                if let Some(effect) = self.search.on_debounce_elapsed(generation) {
                    self.apply_search_effect(effect);
                }
            }
            Event::SearchFinished {
                generation,
                outcome,
            } => {
                self.search.on_search_finished(generation, outcome);
            }
            Event::RecommendationsFinished {
                generation,
                outcome,
            } => {
                self.recommendations
                    .on_recommendations_finished(generation, outcome);
            }
            Event::HealthChecked(status) => {
                tracing::info!(status = %status, "Connection status determined");
                self.connection = status;
            }
        }
        Flow::Continue
    }

    /// Waits for and handles the next event; `None` once the channel is closed
    pub async fn step(&mut self, events: &mut mpsc::UnboundedReceiver<Event>) -> Option<Flow> {
        let event = events.recv().await?;
        Some(self.handle(event))
    }

    /// Runs until [`Event::Quit`], calling `on_frame` whenever the rendered view changes
    pub async fn run(
        mut self,
        mut events: mpsc::UnboundedReceiver<Event>,
        mut on_frame: impl FnMut(&str),
    ) {
        self.start();

        let mut last_frame = self.screen().render();
        on_frame(&last_frame);

        while let Some(flow) = self.step(&mut events).await {
            if flow == Flow::Quit {
                break;
            }
            let frame = self.screen().render();
            if frame != last_frame {
                on_frame(&frame);
                last_frame = frame;
            }
        }

        self.cancel_debounce();
    }

    fn select(&mut self, movie: MovieSummary) {
        let ticket = self.recommendations.on_select(movie);
        self.spawn_recommend(ticket);
    }

    fn apply_search_effect(&mut self, effect: SearchEffect) {
        match effect {
            SearchEffect::ScheduleDebounce { generation, delay } => {
                self.schedule_debounce(generation, delay)
            }
            SearchEffect::CancelDebounce => self.cancel_debounce(),
            SearchEffect::IssueSearch {
                generation,
                query,
                limit,
            } => self.spawn_search(generation, query, limit),
        }
    }

    fn schedule_debounce(&mut self, generation: u64, delay: Duration) {
        self.cancel_debounce();
        let events = self.events.clone();
        self.debounce_timer = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = events.send(Event::DebounceElapsed { generation });
        }));
    }

    fn cancel_debounce(&mut self) {
        if let Some(timer) = self.debounce_timer.take() {
            timer.abort();
        }
    }

    fn spawn_search(&self, generation: u64, query: String, limit: u32) {
        let service = Arc::clone(&self.service);
        let events = self.events.clone();
        tokio::spawn(async move {
            let outcome = service.search(&query, limit).await;
            let _ = events.send(Event::SearchFinished {
                generation,
                outcome,
            });
        });
    }

    fn spawn_recommend(&self, ticket: RecommendRequestTicket) {
        let service = Arc::clone(&self.service);
        let events = self.events.clone();
        tokio::spawn(async move {
            let outcome = service.recommend(&ticket.title, ticket.top_n).await;
            let _ = events.send(Event::RecommendationsFinished {
                generation: ticket.generation,
                outcome,
            });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AppError, UNREACHABLE_MESSAGE};
    use crate::models::{HealthResponse, MovieRecommendation, RecommendResponse, SearchResponse};
    use crate::services::providers::MockRecommendationService;

    fn inception() -> MovieSummary {
        MovieSummary::new(1, "Inception", Some(8.8))
    }

    fn interstellar() -> MovieRecommendation {
        MovieRecommendation {
            id: 2,
            title: "Interstellar".to_string(),
            rating: Some(8.6),
            similarity_score: Some(0.92),
            vote_count: None,
        }
    }

    fn app_with(
        mock: MockRecommendationService,
    ) -> (App, mpsc::UnboundedReceiver<Event>) {
        App::new(Arc::new(mock), &Config::default())
    }

    #[tokio::test(start_paused = true)]
    async fn test_keystrokes_within_window_issue_one_search() {
        let mut mock = MockRecommendationService::new();
        mock.expect_search()
            .withf(|query, limit| query == "Ince" && *limit == 20)
            .times(1)
            .returning(|_, _| Ok(SearchResponse::ok(vec![inception()])));
        let (mut app, mut events) = app_with(mock);

        for text in ["In", "Inc", "Ince"] {
            app.handle(Event::TextChanged(text.to_string()));
        }

        // Timer fires, then the search completes
        app.step(&mut events).await;
        assert!(app.search_session().is_loading);
        app.step(&mut events).await;

        let session = app.search_session();
        assert!(!session.is_loading);
        assert!(session.is_dropdown_visible);
        assert_eq!(session.results, vec![inception()]);
        assert!(app.screen().render().contains("1. Inception ⭐8.8"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_deleting_below_minimum_inside_window_never_searches() {
        let mut mock = MockRecommendationService::new();
        mock.expect_search().times(0);
        let (mut app, mut events) = app_with(mock);

        app.handle(Event::TextChanged("In".to_string()));
        app.handle(Event::TextChanged("I".to_string()));

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(events.try_recv().is_err());
        assert!(app.search_session().results.is_empty());
        assert!(!app.search_session().is_dropdown_visible);
    }

    #[tokio::test(start_paused = true)]
    async fn test_select_fetches_ranked_recommendations() {
        let mut mock = MockRecommendationService::new();
        mock.expect_recommend()
            .withf(|title, top_n| title == "Inception" && *top_n == 10)
            .times(1)
            .returning(|_, _| Ok(RecommendResponse::ok(vec![interstellar()])));
        let (mut app, mut events) = app_with(mock);
        app.handle(Event::HealthChecked(ConnectionStatus::Connected));

        app.handle(Event::SelectMovie(inception()));
        assert_eq!(app.view_state(), ViewState::LoadingRecommendations);

        app.step(&mut events).await;
        assert_eq!(app.view_state(), ViewState::Results);
        assert_eq!(app.search_session().query_text, "Inception");
        let frame = app.screen().render();
        assert!(frame.contains("#1 Interstellar"));
        assert!(frame.contains("Match: 92%"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_unreachable_then_reset_returns_to_empty() {
        let mut mock = MockRecommendationService::new();
        mock.expect_recommend().times(1).returning(|_, _| {
            Err(AppError::UnexpectedStatus {
                status: 502,
                body: String::new(),
            })
        });
        let (mut app, mut events) = app_with(mock);
        app.handle(Event::HealthChecked(ConnectionStatus::Connected));

        app.handle(Event::SelectMovie(inception()));
        app.step(&mut events).await;
        assert_eq!(
            app.view_state(),
            ViewState::Error(UNREACHABLE_MESSAGE.to_string())
        );
        assert!(!app.recommendation_session().is_loading);

        app.handle(Event::Reset);
        assert_eq!(app.view_state(), ViewState::Empty);
    }

    #[tokio::test(start_paused = true)]
    async fn test_response_after_reset_does_not_resurrect_results() {
        let mut mock = MockRecommendationService::new();
        mock.expect_recommend()
            .returning(|_, _| Ok(RecommendResponse::ok(vec![interstellar()])));
        let (mut app, mut events) = app_with(mock);
        app.handle(Event::HealthChecked(ConnectionStatus::Connected));

        app.handle(Event::SelectMovie(inception()));
        app.handle(Event::Reset);
        app.step(&mut events).await;

        assert_eq!(app.view_state(), ViewState::Empty);
        assert!(app.recommendation_session().recommendations.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_health_probe_sets_connection_status() {
        let mut mock = MockRecommendationService::new();
        mock.expect_health_check().times(1).returning(|| {
            Ok(HealthResponse {
                status: "healthy".to_string(),
                total_movies: Some(4803),
            })
        });
        let (mut app, mut events) = app_with(mock);
        assert_eq!(app.view_state(), ViewState::CheckingConnection);

        app.start();
        app.step(&mut events).await;
        assert_eq!(app.connection(), ConnectionStatus::Connected);
        assert_eq!(app.view_state(), ViewState::Empty);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_health_probe_is_disconnected() {
        let mut mock = MockRecommendationService::new();
        mock.expect_health_check()
            .returning(|| Err(AppError::MalformedResponse("eof".to_string())));
        mock.expect_name().return_const("mock");
        let (mut app, mut events) = app_with(mock);

        app.start();
        app.step(&mut events).await;
        assert_eq!(app.connection(), ConnectionStatus::Disconnected);
    }

    #[tokio::test(start_paused = true)]
    async fn test_quit_stops_the_loop() {
        let (mut app, _events) = app_with(MockRecommendationService::new());
        assert_eq!(app.handle(Event::Quit), Flow::Quit);
    }
}
