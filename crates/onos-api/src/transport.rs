// Shared transport configuration for building reqwest::Client instances.
//
// ONOS speaks plain HTTP with Basic auth, so there is no TLS story
// here -- just the fixed JSON headers and the request timeout that
// bounds every call.

use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::SecretString;

/// Default request timeout. Bounds every call the client issues.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP Basic credentials for the controller.
///
/// `Default` is the ONOS factory pair (`onos`/`rocks`). Deployments
/// override it through the config layer -- nothing above this crate
/// hardcodes credentials.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: SecretString,
}

impl Default for Credentials {
    fn default() -> Self {
        Self {
            username: "onos".into(),
            password: SecretString::from("rocks".to_owned()),
        }
    }
}

/// Transport tuning for the HTTP client.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` from this config.
    ///
    /// Installs the fixed `Accept`/`Content-Type` JSON headers as
    /// defaults on every request.
    pub fn build_client(&self) -> Result<reqwest::Client, crate::Error> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent("onosctl/0.1.0")
            .default_headers(headers)
            .build()?;
        Ok(client)
    }
}
