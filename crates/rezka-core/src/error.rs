//! Error types for the HDRezka client
//!
//! Every operation boundary converts network and parsing failures into
//! one of these user-visible kinds; nothing else propagates.

use thiserror::Error;

/// Error type for all HDRezka client operations
#[derive(Error, Debug)]
pub enum RezkaError {
    /// Every mirror in the candidate list failed its liveness probe
    #[error("all mirrors are unreachable")]
    DomainsUnavailable,

    /// Login failed — wrong credentials, network failure and a missing
    /// session cookie are deliberately indistinguishable to the caller
    #[error("authentication failed")]
    Auth,

    /// An authenticated request was answered with the login form
    #[error("session expired, authentication required")]
    SessionExpired,

    /// Server answered HTTP 403
    #[error("access denied by the server")]
    AccessDenied,

    /// Search produced zero results (not an error in transport or parsing)
    #[error("nothing found for: {0}")]
    NotFound(String),

    /// Video URL resolution failed
    #[error("video resolution failed: {0}")]
    Resolution(String),

    /// Search query was empty or whitespace only
    #[error("search query cannot be empty")]
    EmptyQuery,

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Failed to parse HTML content
    #[error("failed to parse HTML: {0}")]
    Parse(String),

    /// Relay service returned a malformed envelope
    #[error("relay returned an invalid envelope: {0}")]
    Relay(String),
}

/// Result type alias for HDRezka client operations
pub type Result<T> = std::result::Result<T, RezkaError>;
