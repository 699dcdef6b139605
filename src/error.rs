//! Error types for research parsing and generation
//!
//! This module defines the error taxonomy of the crate: parse failures that
//! are fatal to a single parse attempt, upstream generation failures, and the
//! crate-level error that wraps both.

use thiserror::Error;

/// Main error type for research operations
#[derive(Error, Debug)]
pub enum ResearchError {
    /// The generated text could not be interpreted
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// The upstream text generator failed
    #[error("Upstream error: {0}")]
    Upstream(#[from] UpstreamError),

    /// A selection referenced an unknown session or an out-of-range option
    #[error("Invalid selection: option {index} of session {session_id}")]
    InvalidSelection { session_id: String, index: usize },

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Serialization/Deserialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Generic error with context
    #[error("Error: {0}")]
    Other(String),
}

/// Result type alias for research operations
pub type Result<T> = std::result::Result<T, ResearchError>;

impl From<String> for ResearchError {
    fn from(s: String) -> Self {
        ResearchError::Other(s)
    }
}

impl From<&str> for ResearchError {
    fn from(s: &str) -> Self {
        ResearchError::Other(s.to_string())
    }
}

impl From<serde_json::Error> for ResearchError {
    fn from(e: serde_json::Error) -> Self {
        ResearchError::SerializationError(e.to_string())
    }
}

/// Failure to turn a generated response into research options
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Fewer than three domain markers under every marker pattern
    #[error("expected 3 research domains, found {found}; text: {excerpt}...")]
    InsufficientDomains { found: usize, excerpt: String },

    /// More domain markers than options the response is supposed to carry
    #[error("expected 3 research domains, found {found}")]
    UnexpectedDomainCount { found: usize },

    /// A mandatory field of one domain block could not be extracted
    #[error("failed to parse research domain {index}: {source}; block: {excerpt}...")]
    Block {
        /// 1-based block index
        index: usize,
        #[source]
        source: FieldError,
        excerpt: String,
    },
}

/// Failure of a single field extraction inside a domain block
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("domain title is empty")]
    EmptyTitle,

    #[error("match score '{0}' is not a valid integer")]
    InvalidScore(String),
}

/// Failure reported by the upstream text generator
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UpstreamError {
    /// Credentials were rejected; retrying cannot help
    #[error("invalid credentials: {0}")]
    InvalidCredentials(String),

    /// Quota or rate limit hit
    #[error("rate limited: {0}")]
    RateLimited(String),

    /// A single request failed
    #[error("request failed: {0}")]
    Request(String),

    /// Every attempt failed
    #[error("generation failed after {attempts} attempts: {last_error}")]
    Exhausted { attempts: u32, last_error: String },
}

impl UpstreamError {
    /// Whether another attempt may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, UpstreamError::Request(_))
    }
}

/// First `max_chars` characters of `text`, never splitting a code point
pub(crate) fn excerpt(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
