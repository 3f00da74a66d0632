use crate::{
    error::AppResult,
    models::{ConnectionStatus, MovieSummary, RecommendResponse, SearchResponse},
};

/// Everything the event loop reacts to
///
/// The first group comes from the user; the rest is posted back by timers
/// and network tasks spawned by the loop itself.
#[derive(Debug)]
pub enum Event {
    TextChanged(String),
    Focus,
    /// Pick the dropdown row at this 0-based index
    Select(usize),
    /// Pick a movie directly, bypassing the dropdown
    SelectMovie(MovieSummary),
    Reset,
    Quit,

    DebounceElapsed {
        generation: u64,
    },
    SearchFinished {
        generation: u64,
        outcome: AppResult<SearchResponse>,
    },
    RecommendationsFinished {
        generation: u64,
        outcome: AppResult<RecommendResponse>,
    },
    HealthChecked(ConnectionStatus),
}

/// Whether the loop should keep going after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

impl Event {
    /// Parses a line typed into the terminal front end.
    ///
    /// Lines starting with `:` are commands (`:focus`, `:select <n>` with a
    /// 1-based row, `:reset`, `:quit`); anything else becomes the new query text.
    pub fn from_line(line: &str) -> Option<Event> {
        let Some(command) = line.strip_prefix(':') else {
            return Some(Event::TextChanged(line.to_string()));
        };

        let mut parts = command.split_whitespace();
        match (parts.next(), parts.next()) {
            (Some("focus"), None) => Some(Event::Focus),
            (Some("reset"), None) => Some(Event::Reset),
            (Some("quit") | Some("q"), None) => Some(Event::Quit),
            (Some("select"), Some(row)) => match row.parse::<usize>() {
                Ok(row) if row >= 1 => Some(Event::Select(row - 1)),
                _ => None,
            },
            _ => None,
        }
    }
}
