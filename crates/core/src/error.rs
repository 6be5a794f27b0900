//! Unified error types for pagenav.
//!
//! Every failure a navigation can hit is one of these. None of them are fatal:
//! the controller reports them and keeps the previously displayed page.

/// Unified error type for the navigation layer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The request never completed (connection refused, reset, timeout).
    #[error("TRANSPORT_ERROR: {0}")]
    Transport(String),

    /// The server answered with a status outside the success range.
    #[error("SERVER_ERROR: status {status} for {url}")]
    ServerStatus { url: String, status: u16 },

    /// The response body lacks the title or content markers.
    #[error("MALFORMED_RESPONSE: {0}")]
    MalformedResponse(String),

    /// No cache entry exists for the given URL.
    #[error("NOT_FOUND: {0}")]
    NotFound(String),

    /// Link target could not be resolved to a same-origin path.
    #[error("INVALID_URL: {0}")]
    InvalidUrl(String),

    /// Response body exceeds the configured limit.
    #[error("FETCH_TOO_LARGE: {0}")]
    FetchTooLarge(String),
}

impl Error {
    /// Stable machine-readable code, matching the display prefix.
    pub fn code(&self) -> &'static str {
        match self {
            Error::Transport(_) => "TRANSPORT_ERROR",
            Error::ServerStatus { .. } => "SERVER_ERROR",
            Error::MalformedResponse(_) => "MALFORMED_RESPONSE",
            Error::NotFound(_) => "NOT_FOUND",
            Error::InvalidUrl(_) => "INVALID_URL",
            Error::FetchTooLarge(_) => "FETCH_TOO_LARGE",
        }
    }

    /// Whether this error aborted a fetch (as opposed to a local lookup or input problem).
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            Error::Transport(_) | Error::ServerStatus { .. } | Error::MalformedResponse(_) | Error::FetchTooLarge(_)
        )
    }
}
