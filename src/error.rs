use thiserror::Error;

/// Ways a news request can fail. Every variant ends up as a user-visible message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// No response at all (DNS, connect, reset).
    #[error("{0}")]
    Transport(String),
    #[error("HTTP error! Status: {0}")]
    HttpStatus(u16),
    /// The API answered with `{"status": "error", "message": ...}`.
    #[error("{0}")]
    Api(String),
    #[error("Invalid data format: {0}")]
    Format(String),
}

impl FetchError {
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Transport(_) => "transport",
            FetchError::HttpStatus(_) => "http_status",
            FetchError::Api(_) => "api",
            FetchError::Format(_) => "format",
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Transport(err.to_string())
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
    #[error("invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}
