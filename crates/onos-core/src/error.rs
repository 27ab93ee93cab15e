// ── Core error types ──
//
// User-facing errors from onos-core. Consumers never see reqwest
// internals directly; the `From<onos_api::Error>` impl translates
// transport-layer failures into domain-appropriate variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Cannot connect to controller at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Controller request timed out")]
    Timeout,

    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Unsupported method: {method}")]
    UnsupportedMethod { method: String },

    #[error("API error: {message}")]
    Api {
        message: String,
        status: Option<u16>,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Collection import failed: {message}")]
    Import { message: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<onos_api::Error> for CoreError {
    fn from(err: onos_api::Error) -> Self {
        match err {
            onos_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            onos_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            onos_api::Error::Status { status: 404, body } => CoreError::NotFound { message: body },
            onos_api::Error::Status { status, body } => CoreError::Api {
                message: body,
                status: Some(status),
            },
            onos_api::Error::Deserialization { message } => CoreError::Internal(message),
            onos_api::Error::UnsupportedMethod(method) => CoreError::UnsupportedMethod { method },
        }
    }
}
