//! Error types for the scoring service
//!
//! Configuration errors are fatal at startup. Advisory errors are always
//! recovered by the request handler and never reach the HTTP caller.

use thiserror::Error;

/// Startup configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("GEMINI_API_KEY is required when the gemini advisory is enabled")]
    MissingApiKey,

    #[error("Invalid bind address '{addr}': {source}")]
    InvalidBindAddr {
        addr: String,
        #[source]
        source: std::net::AddrParseError,
    },

    #[error("Unknown advisory mode '{0}', expected 'gemini' or 'off'")]
    UnknownAdvisoryMode(String),
}

/// Failures talking to the external advisory service
#[derive(Error, Debug)]
pub enum AdvisoryError {
    #[error("Advisory API key is empty")]
    MissingApiKey,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Advisory API returned HTTP {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Invalid advisory response: {0}")]
    InvalidResponse(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AdvisoryError {
    /// True when the underlying transport gave up waiting
    pub fn is_timeout(&self) -> bool {
        matches!(self, AdvisoryError::Http(e) if e.is_timeout())
    }
}

pub type AdvisoryResult<T> = Result<T, AdvisoryError>;
