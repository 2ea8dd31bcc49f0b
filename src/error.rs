//! Typed failures for each layer of the assistant.
//!
//! Only [`ConfigError`] is fatal. The knowledge, weather and completion errors are
//! converted into user-facing text before they reach a transcript or API response.

/// Startup configuration problems. These halt the process before serving.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("API key '{0}' not found; set it in the environment or under [credentials] in the config file")]
    MissingCredential(&'static str),
}

/// Knowledge store failures other than a duplicate question.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("database lock poisoned")]
    Poisoned,
}

/// Weather provider failures.
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    /// Transport failure, HTTP error status, or an undecodable body.
    #[error("{0}")]
    Http(#[from] reqwest::Error),
    /// A success body that lacks the expected fields.
    #[error("malformed weather data: missing {0}")]
    MalformedBody(&'static str),
    /// A success body whose fields are present but not in the expected shape.
    #[error("{0}")]
    UnexpectedShape(String),
}

/// Completion provider failures.
#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("provider returned {status}: {message}")]
    Provider { status: u16, message: String },
    #[error("malformed completion response: {0}")]
    MalformedResponse(String),
}
