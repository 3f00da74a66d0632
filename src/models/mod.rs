use serde::{Deserialize, Serialize};
use std::fmt::Display;

pub mod movie;

pub use movie::{MovieId, MovieRecommendation, MovieSummary};

/// Liveness of the recommendation service, probed once at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionStatus {
    #[default]
    Checking,
    Connected,
    Disconnected,
}

impl Display for ConnectionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConnectionStatus::Checking => write!(f, "checking"),
            ConnectionStatus::Connected => write!(f, "connected"),
            ConnectionStatus::Disconnected => write!(f, "disconnected"),
        }
    }
}

// ============================================================================
// Recommendation Service Wire Types
// ============================================================================

/// Body of `GET /search`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResponse {
    pub success: bool,
    #[serde(default)]
    pub results: Vec<MovieSummary>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub count: Option<usize>,
}

/// Body of `POST /recommend`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendRequest {
    pub title: String,
    pub top_n: u32,
}

/// Response of `POST /recommend`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendResponse {
    pub success: bool,
    #[serde(default)]
    pub recommendations: Vec<MovieRecommendation>,
    #[serde(default)]
    pub error: Option<String>,
    /// Title the service matched the request against
    #[serde(default)]
    pub movie: Option<String>,
    #[serde(default)]
    pub count: Option<usize>,
}

/// Body of `GET /health`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthResponse {
    pub status: String,
    #[serde(default)]
    pub total_movies: Option<u64>,
}

impl SearchResponse {
    pub fn ok(results: Vec<MovieSummary>) -> Self {
        Self {
            success: true,
            count: Some(results.len()),
            results,
            error: None,
            query: None,
        }
    }

    pub fn declined(message: impl Into<String>) -> Self {
        Self {
            success: false,
            results: vec![],
            error: Some(message.into()),
            query: None,
            count: None,
        }
    }
}

impl RecommendResponse {
    pub fn ok(recommendations: Vec<MovieRecommendation>) -> Self {
        Self {
            success: true,
            count: Some(recommendations.len()),
            recommendations,
            error: None,
            movie: None,
        }
    }

    pub fn declined(message: impl Into<String>) -> Self {
        Self {
            success: false,
            recommendations: vec![],
            error: Some(message.into()),
            movie: None,
            count: None,
        }
    }
}
