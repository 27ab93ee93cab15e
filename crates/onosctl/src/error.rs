//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` variants into user-facing errors with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use onos_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const UNSUPPORTED: i32 = 5;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    #[error("Could not connect to controller at {url}")]
    #[diagnostic(
        code(onosctl::connection_failed),
        help(
            "Check that the controller is running and reachable.\n\
             Try: onosctl ping, or onosctl config set --host <HOST> --port <PORT>.\n\
             Use --demo-fallback to work with canned data while offline."
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Request timed out")]
    #[diagnostic(
        code(onosctl::timeout),
        help("Increase the timeout with --timeout or check controller responsiveness.")
    )]
    Timeout,

    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(onosctl::not_found),
        help("Run: onosctl {list_command} to see what is available")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    #[error("API error{}: {message}", .status.map_or_else(String::new, |s| format!(" (HTTP {s})")))]
    #[diagnostic(code(onosctl::api_error))]
    ApiError {
        message: String,
        status: Option<u16>,
    },

    #[error("HTTP method '{method}' is not supported")]
    #[diagnostic(
        code(onosctl::unsupported_method),
        help("Supported methods: GET, POST, PUT, DELETE. PATCH is rejected before dispatch.")
    )]
    UnsupportedMethod { method: String },

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(onosctl::validation))]
    Validation { field: String, reason: String },

    #[error("Could not import collection file: {message}")]
    #[diagnostic(
        code(onosctl::bad_collection),
        help("Collection files are JSON objects as written by `onosctl collections create`.")
    )]
    ImportFailed { message: String },

    #[error("Configuration error: {message}")]
    #[diagnostic(
        code(onosctl::config),
        help("Inspect the file at `onosctl config path` or override with ONOS_* variables.")
    )]
    Config { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON payload: {0}")]
    #[diagnostic(code(onosctl::json), help("Check the JSON contents and try again."))]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout => exit_code::TIMEOUT,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::UnsupportedMethod { .. } => exit_code::UNSUPPORTED,
            Self::Validation { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => CliError::ConnectionFailed {
                url,
                source: reason.into(),
            },

            CoreError::Timeout => CliError::Timeout,

            CoreError::NotFound { message } => CliError::NotFound {
                resource_type: "resource".into(),
                identifier: message,
                list_command: "devices list".into(),
            },

            CoreError::UnsupportedMethod { method } => CliError::UnsupportedMethod { method },

            CoreError::Api { message, status } => CliError::ApiError { message, status },

            CoreError::Config { message } => CliError::Config { message },

            CoreError::Import { message } => CliError::ImportFailed { message },

            CoreError::Internal(message) => CliError::ApiError {
                message,
                status: None,
            },
        }
    }
}

impl From<onos_config::ConfigError> for CliError {
    fn from(err: onos_config::ConfigError) -> Self {
        CliError::Config {
            message: err.to_string(),
        }
    }
}
