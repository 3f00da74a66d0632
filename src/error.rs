/// Fixed message shown when the recommendation service cannot be reached
pub const UNREACHABLE_MESSAGE: &str =
    "Failed to connect to the recommendation service. Make sure it is running!";

/// Fallback shown when the service declines a request without saying why
pub const DECLINED_FALLBACK_MESSAGE: &str = "The recommendation service declined the request";

/// Client-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Recommendation service returned status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Declined: {0}")]
    Declined(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// The two ways a remote operation can fail, as far as callers care
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The round trip completed but the service reported `success: false`
    Declined,
    /// Anything else: connection, timeout, non-2xx, undecodable body
    Unreachable,
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Declined(_) => ErrorKind::Declined,
            _ => ErrorKind::Unreachable,
        }
    }

    /// Message suitable for showing to the user
    ///
    /// Declined errors carry the server's text verbatim; everything else
    /// collapses to [`UNREACHABLE_MESSAGE`].
    pub fn user_message(&self) -> String {
        match self {
            AppError::Declined(msg) => msg.clone(),
            _ => UNREACHABLE_MESSAGE.to_string(),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
