//! Error types shared across the Findash crates

use thiserror::Error;

/// Crate-wide error type
#[derive(Error, Debug)]
pub enum FindashError {
    #[error("API error: {0}")]
    Api(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Stream error: {0}")]
    Stream(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl FindashError {
    pub fn api(msg: impl Into<String>) -> Self {
        FindashError::Api(msg.into())
    }

    pub fn network(msg: impl Into<String>) -> Self {
        FindashError::Network(msg.into())
    }

    pub fn auth(msg: impl Into<String>) -> Self {
        FindashError::Auth(msg.into())
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        FindashError::Parse(msg.into())
    }

    pub fn stream(msg: impl Into<String>) -> Self {
        FindashError::Stream(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        FindashError::Config(msg.into())
    }
}

/// Result type alias for Findash operations
pub type FindashResult<T> = Result<T, FindashError>;
