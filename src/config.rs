use serde::Deserialize;
use std::time::Duration;

use crate::error::{AppError, AppResult};

/// Prefix for every environment variable read by [`Config::from_env`]
pub const ENV_PREFIX: &str = "MOVIEREC_";

/// Client configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Base URL of the recommendation service, without trailing slash
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Maximum number of search results requested per query
    #[serde(default = "default_search_limit")]
    pub search_limit: u32,

    /// Number of recommendations requested per selected movie
    #[serde(default = "default_top_n")]
    pub top_n: u32,

    /// Quiet period after the last keystroke before a search is issued
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Queries shorter than this (in characters) never reach the service
    #[serde(default = "default_min_query_len")]
    pub min_query_len: usize,

    /// Whole-request timeout for every call to the service
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_api_base_url() -> String {
    "http://localhost:5000/api".to_string()
}

fn default_search_limit() -> u32 {
    20
}

fn default_top_n() -> u32 {
    10
}

fn default_debounce_ms() -> u64 {
    300
}

fn default_min_query_len() -> usize {
    2
}

fn default_request_timeout_secs() -> u64 {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            search_limit: default_search_limit(),
            top_n: default_top_n(),
            debounce_ms: default_debounce_ms(),
            min_query_len: default_min_query_len(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables (and an optional `.env` file)
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let config = envy::prefixed(ENV_PREFIX)
            .from_env::<Config>()
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values the client cannot work with
    pub fn validate(&self) -> AppResult<()> {
        if self.api_base_url.trim().is_empty() {
            return Err(AppError::Config("api_base_url cannot be empty".to_string()));
        }
        if self.search_limit == 0 {
            return Err(AppError::Config("search_limit must be positive".to_string()));
        }
        if self.top_n == 0 {
            return Err(AppError::Config("top_n must be positive".to_string()));
        }
        Ok(())
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Base URL with any trailing slash removed
    pub fn base_url(&self) -> &str {
        self.api_base_url.trim_end_matches('/')
    }
}
