use thiserror::Error;

/// Top-level error type for the `onos-api` crate.
///
/// Transport failures and non-2xx statuses are both client-level
/// failures here -- callers never need status-specific handling beyond
/// what the helper predicates expose. A response body that is not valid
/// JSON is NOT an error (it is kept as raw text by the client).
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP transport error (connection refused, DNS failure, timeout).
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Controller answered with a non-success status.
    #[error("Controller returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// An expected JSON shape could not be decoded.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String },

    /// Verb rejected by the passthrough accessor before dispatch.
    #[error("Unsupported method: {0}")]
    UnsupportedMethod(String),
}

impl Error {
    /// Returns `true` if this is a transient failure worth retrying.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Status { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// The HTTP status code, if the controller answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}
