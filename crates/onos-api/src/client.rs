// Async HTTP client for the ONOS REST API (base path /onos/v1/).
//
// Every accessor normalizes its outcome into an `ApiResponse` envelope.
// Failure handling is decided once, at construction, by `FetchPolicy`:
// strict propagation or silent degradation to canned demo data. No
// accessor mixes the two.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::Utc;
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::demo;
use crate::error::Error;
use crate::models::{Device, Flow, Host, Link, Stamp, Topology};
use crate::transport::{Credentials, TransportConfig};

// ── Envelope ─────────────────────────────────────────────────────────

/// Uniform wrapper every accessor returns, whether the underlying call
/// succeeded, failed, or fell back to demo data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub data: T,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            data,
            success: true,
            error: None,
        }
    }

    /// A fallback envelope: usable data, but the live call failed.
    pub fn degraded(data: T, error: String) -> Self {
        Self {
            data,
            success: false,
            error: Some(error),
        }
    }
}

// ── Fetch policy ─────────────────────────────────────────────────────

/// What an accessor does when the live call fails.
///
/// Injected at client construction -- never varies per accessor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FetchPolicy {
    /// Propagate the failure to the caller.
    #[default]
    Strict,
    /// Degrade silently to canned demo data with `success: false`.
    DemoFallback,
}

// ── HTTP method ──────────────────────────────────────────────────────

/// Verbs the passthrough accessor understands.
///
/// `Patch` is modeled (saved requests may carry it) but rejected at
/// dispatch time with [`Error::UnsupportedMethod`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl HttpMethod {
    /// The dispatchable `reqwest` method, or `None` for PATCH.
    fn as_reqwest(self) -> Option<reqwest::Method> {
        match self {
            Self::Get => Some(reqwest::Method::GET),
            Self::Post => Some(reqwest::Method::POST),
            Self::Put => Some(reqwest::Method::PUT),
            Self::Delete => Some(reqwest::Method::DELETE),
            Self::Patch => None,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Patch => "PATCH",
        };
        f.write_str(s)
    }
}

impl FromStr for HttpMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "DELETE" => Ok(Self::Delete),
            "PATCH" => Ok(Self::Patch),
            other => Err(Error::UnsupportedMethod(other.to_owned())),
        }
    }
}

// ── Placeholder substitution ─────────────────────────────────────────

/// Substitute every `{key}` placeholder with the matching params entry.
///
/// Exact-match and case-sensitive; no escaping beyond direct string
/// substitution. Unresolved placeholders are left verbatim.
pub fn substitute_placeholders(template: &str, params: &BTreeMap<String, String>) -> String {
    let mut out = template.to_owned();
    for (key, value) in params {
        out = out.replace(&format!("{{{key}}}"), value);
    }
    out
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for one ONOS controller.
///
/// Immutable once built: a settings change means building a new client
/// (in-flight calls on the old one simply complete against the old
/// base URL).
pub struct OnosClient {
    http: reqwest::Client,
    base_url: Url,
    credentials: Credentials,
    policy: FetchPolicy,
}

impl OnosClient {
    /// Build a client for `http://{host}:{port}/onos/v1/`.
    pub fn new(
        host: &str,
        port: &str,
        credentials: Credentials,
        transport: &TransportConfig,
        policy: FetchPolicy,
    ) -> Result<Self, Error> {
        let base_url = Url::parse(&format!("http://{host}:{port}/onos/v1/"))?;
        let http = transport.build_client()?;
        debug!(%base_url, ?policy, "built ONOS client");

        Ok(Self {
            http,
            base_url,
            credentials,
            policy,
        })
    }

    /// The effective base URL (always ends with `/onos/v1/`).
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn policy(&self) -> FetchPolicy {
        self.policy
    }

    // ── Request plumbing ─────────────────────────────────────────────

    fn endpoint_url(&self, path: &str) -> Result<Url, Error> {
        let relative = path.trim_start_matches('/');
        let url = Url::parse(&format!("{}{relative}", self.base_url))?;
        Ok(url)
    }

    async fn dispatch(
        &self,
        method: reqwest::Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Value, Error> {
        let url = self.endpoint_url(path)?;
        debug!(%method, %url, "dispatching request");

        let mut req = self.http.request(method, url).basic_auth(
            &self.credentials.username,
            Some(self.credentials.password.expose_secret()),
        );
        if let Some(body) = body {
            req = req.json(body);
        }

        let resp = req.send().await?;
        let status = resp.status();
        let text = resp.text().await?;
        if !status.is_success() {
            return Err(Error::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        // Malformed JSON is not an error: keep the body as raw text.
        Ok(serde_json::from_str(&text).unwrap_or_else(|_| Value::String(text)))
    }

    async fn get_value(&self, path: &str) -> Result<Value, Error> {
        self.dispatch(reqwest::Method::GET, path, None).await
    }

    /// Unwrap a named array from a response body; absent key means an
    /// empty sequence, a present-but-wrong shape is a decode failure.
    fn unwrap_array<T: DeserializeOwned>(body: Value, key: &str) -> Result<Vec<T>, Error> {
        match body.get(key) {
            None => Ok(Vec::new()),
            Some(arr) => {
                serde_json::from_value(arr.clone()).map_err(|e| Error::Deserialization {
                    message: format!("bad '{key}' array: {e}"),
                })
            }
        }
    }

    /// Apply the fetch policy to a failed accessor call.
    fn fall_back<T>(
        &self,
        what: &str,
        err: Error,
        demo: impl FnOnce() -> T,
    ) -> Result<ApiResponse<T>, Error> {
        match self.policy {
            FetchPolicy::Strict => Err(err),
            FetchPolicy::DemoFallback => {
                warn!(%what, error = %err, "live call failed, serving demo data");
                Ok(ApiResponse::degraded(demo(), err.to_string()))
            }
        }
    }

    fn stamped<T: Stamp>(mut records: Vec<T>) -> Vec<T> {
        let now = Utc::now();
        for record in &mut records {
            record.stamp(now);
        }
        records
    }

    // ── Typed accessors ──────────────────────────────────────────────

    /// Probe the API root. Never returns `Err` -- failure is an
    /// unsuccessful envelope.
    pub async fn test_connection(&self) -> ApiResponse<Value> {
        match self.get_value("/").await {
            Ok(body) => ApiResponse::ok(body),
            Err(err) => {
                warn!(error = %err, "connection test failed");
                ApiResponse::degraded(
                    Value::Null,
                    format!("failed to connect to ONOS controller: {err}"),
                )
            }
        }
    }

    pub async fn devices(&self) -> Result<ApiResponse<Vec<Device>>, Error> {
        let outcome = match self.get_value("/devices").await {
            Ok(body) => Self::unwrap_array(body, "devices"),
            Err(err) => Err(err),
        };
        match outcome {
            Ok(devices) => Ok(ApiResponse::ok(Self::stamped(devices))),
            Err(err) => self.fall_back("devices", err, || Self::stamped(demo::devices())),
        }
    }

    pub async fn device(&self, device_id: &str) -> Result<ApiResponse<Device>, Error> {
        let outcome = match self.get_value(&format!("/devices/{device_id}")).await {
            Ok(body) => serde_json::from_value::<Device>(body).map_err(|e| {
                Error::Deserialization {
                    message: format!("bad device record: {e}"),
                }
            }),
            Err(err) => Err(err),
        };
        match outcome {
            Ok(mut device) => {
                device.stamp(Utc::now());
                Ok(ApiResponse::ok(device))
            }
            Err(err) => self.fall_back("device", err, || {
                // Matching demo record by id, or the first one.
                let mut all = demo::devices();
                let idx = all.iter().position(|d| d.id == device_id).unwrap_or(0);
                let mut device = all.swap_remove(idx);
                device.stamp(Utc::now());
                device
            }),
        }
    }

    pub async fn links(&self) -> Result<ApiResponse<Vec<Link>>, Error> {
        let outcome = match self.get_value("/links").await {
            Ok(body) => Self::unwrap_array(body, "links"),
            Err(err) => Err(err),
        };
        match outcome {
            Ok(links) => Ok(ApiResponse::ok(links)),
            Err(err) => self.fall_back("links", err, demo::links),
        }
    }

    pub async fn hosts(&self) -> Result<ApiResponse<Vec<Host>>, Error> {
        let outcome = match self.get_value("/hosts").await {
            Ok(body) => Self::unwrap_array(body, "hosts"),
            Err(err) => Err(err),
        };
        match outcome {
            Ok(hosts) => Ok(ApiResponse::ok(Self::stamped(hosts))),
            Err(err) => self.fall_back("hosts", err, || Self::stamped(demo::hosts())),
        }
    }

    pub async fn flows(&self, device_id: Option<&str>) -> Result<ApiResponse<Vec<Flow>>, Error> {
        let path = match device_id {
            Some(id) => format!("/flows/{id}"),
            None => "/flows".to_owned(),
        };
        let outcome = match self.get_value(&path).await {
            Ok(body) => Self::unwrap_array(body, "flows"),
            Err(err) => Err(err),
        };
        match outcome {
            Ok(flows) => Ok(ApiResponse::ok(Self::stamped(flows))),
            Err(err) => self.fall_back("flows", err, || Self::stamped(demo::flows(device_id))),
        }
    }

    /// The generic passthrough accessor used by the request workbench.
    ///
    /// Substitutes `{key}` placeholders from `params` into the endpoint
    /// template, then dispatches GET/POST/PUT/DELETE. PATCH is rejected
    /// before anything is sent, under either policy.
    pub async fn custom(
        &self,
        method: HttpMethod,
        endpoint: &str,
        body: Option<&Value>,
        params: Option<&BTreeMap<String, String>>,
    ) -> Result<ApiResponse<Value>, Error> {
        let path = match params {
            Some(params) => substitute_placeholders(endpoint, params),
            None => endpoint.to_owned(),
        };

        let Some(verb) = method.as_reqwest() else {
            return Err(Error::UnsupportedMethod(method.to_string()));
        };

        match self.dispatch(verb, &path, body).await {
            Ok(body) => Ok(ApiResponse::ok(body)),
            Err(err) => self.fall_back("custom request", err, || demo::custom_body(&path)),
        }
    }

    /// Fetch devices, links, and hosts concurrently and aggregate them.
    ///
    /// Best-effort join: the envelope's `success` is the AND of the
    /// three sub-calls, but whatever data arrived is still returned.
    /// Under `Strict` any sub-failure propagates instead.
    pub async fn topology(&self) -> Result<ApiResponse<Topology>, Error> {
        let (devices, links, hosts) = tokio::join!(self.devices(), self.links(), self.hosts());
        let (devices, links, hosts) = (devices?, links?, hosts?);

        let success = devices.success && links.success && hosts.success;
        let error = devices.error.or(links.error).or(hosts.error);
        Ok(ApiResponse {
            data: Topology {
                devices: devices.data,
                links: links.data,
                hosts: hosts.data,
            },
            success,
            error,
        })
    }
}

// ── Unit tests ───────────────────────────────────────────────────────
