// ── Controller facade ──
//
// The main entry point for consumers. Owns the API client, watches the
// settings bus for host/port changes, and rebuilds the client lazily so
// a saved change is in effect by the very next issued call. In-flight
// requests on the old client finish against the old base URL.

use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwap;
use serde_json::Value;
use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use onos_api::{
    ApiResponse, Credentials, Device, FetchPolicy, Flow, Host, Link, OnosClient, Topology,
    TransportConfig,
};

use crate::error::CoreError;
use crate::settings::{ConnectionSettings, SettingsBus};
use crate::store::TopologyStore;
use crate::workbench::ApiRequest;

/// Cheaply cloneable via `Arc<ControllerInner>`.
#[derive(Clone)]
pub struct Controller {
    inner: Arc<ControllerInner>,
}

struct ControllerInner {
    credentials: Credentials,
    transport: TransportConfig,
    policy: FetchPolicy,
    settings_rx: Mutex<watch::Receiver<ConnectionSettings>>,
    client: ArcSwap<OnosClient>,
    store: Arc<TopologyStore>,
    cancel: CancellationToken,
}

impl Controller {
    /// Build a controller bound to `bus`. The initial client targets the
    /// bus's current settings; later saves are picked up per call.
    pub fn new(
        bus: &SettingsBus,
        credentials: Credentials,
        transport: TransportConfig,
        policy: FetchPolicy,
    ) -> Result<Self, CoreError> {
        let settings = bus.current();
        let client = build_client(&settings, &credentials, &transport, policy)?;

        Ok(Self {
            inner: Arc::new(ControllerInner {
                credentials,
                transport,
                policy,
                settings_rx: Mutex::new(bus.subscribe()),
                client: ArcSwap::from_pointee(client),
                store: Arc::new(TopologyStore::new()),
                cancel: CancellationToken::new(),
            }),
        })
    }

    pub fn store(&self) -> &Arc<TopologyStore> {
        &self.inner.store
    }

    /// The client for the current settings, rebuilding it first if a
    /// save landed since the last call.
    async fn client(&self) -> Result<Arc<OnosClient>, CoreError> {
        let mut rx = self.inner.settings_rx.lock().await;
        if rx.has_changed().unwrap_or(false) {
            let settings = rx.borrow_and_update().clone();
            info!(host = %settings.host, port = %settings.port, "rebuilding client for new settings");
            let client = build_client(
                &settings,
                &self.inner.credentials,
                &self.inner.transport,
                self.inner.policy,
            )?;
            self.inner.client.store(Arc::new(client));
        }
        Ok(self.inner.client.load_full())
    }

    // ── Delegating accessors ─────────────────────────────────────────

    /// Probe the API root. Failure is an unsuccessful envelope, never
    /// an `Err`.
    pub async fn ping(&self) -> Result<ApiResponse<Value>, CoreError> {
        Ok(self.client().await?.test_connection().await)
    }

    pub async fn devices(&self) -> Result<ApiResponse<Vec<Device>>, CoreError> {
        Ok(self.client().await?.devices().await?)
    }

    pub async fn device(&self, device_id: &str) -> Result<ApiResponse<Device>, CoreError> {
        Ok(self.client().await?.device(device_id).await?)
    }

    pub async fn links(&self) -> Result<ApiResponse<Vec<Link>>, CoreError> {
        Ok(self.client().await?.links().await?)
    }

    pub async fn hosts(&self) -> Result<ApiResponse<Vec<Host>>, CoreError> {
        Ok(self.client().await?.hosts().await?)
    }

    pub async fn flows(&self, device_id: Option<&str>) -> Result<ApiResponse<Vec<Flow>>, CoreError> {
        Ok(self.client().await?.flows(device_id).await?)
    }

    pub async fn topology(&self) -> Result<ApiResponse<Topology>, CoreError> {
        Ok(self.client().await?.topology().await?)
    }

    /// Dispatch a workbench request through the passthrough accessor.
    ///
    /// The stored body is raw text; it is sent as JSON when it parses
    /// and as a JSON string otherwise. Placeholders in the endpoint are
    /// resolved from the request's own params.
    pub async fn send_request(&self, request: &ApiRequest) -> Result<ApiResponse<Value>, CoreError> {
        let body = request
            .body
            .as_deref()
            .map(|raw| serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_owned())));

        let response = self
            .client()
            .await?
            .custom(
                request.method,
                &request.url,
                body.as_ref(),
                Some(&request.params),
            )
            .await?;
        Ok(response)
    }

    // ── Background polling ───────────────────────────────────────────

    /// Fetch one topology snapshot and apply it to the store.
    ///
    /// Returns `false` when the snapshot lost the race to a newer one
    /// and was discarded.
    pub async fn refresh_once(&self) -> Result<bool, CoreError> {
        let generation = self.inner.store.begin_refresh();
        let response = self.topology().await?;
        Ok(self.inner.store.apply(generation, response.data))
    }

    /// Spawn the periodic topology poller. A fetch failure is logged
    /// and the loop keeps its cadence; stale responses never overwrite
    /// newer data. Stop it with [`shutdown`](Self::shutdown).
    pub fn spawn_poller(&self, interval: Duration) -> JoinHandle<()> {
        let controller = self.clone();
        let cancel = self.inner.cancel.clone();

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                tokio::select! {
                    biased;
                    () = cancel.cancelled() => break,
                    _ = ticker.tick() => {
                        match controller.refresh_once().await {
                            Ok(true) => debug!("topology snapshot applied"),
                            Ok(false) => debug!("stale topology snapshot discarded"),
                            Err(e) => warn!(error = %e, "topology poll failed"),
                        }
                    }
                }
            }
            debug!("topology poller stopped");
        })
    }

    /// Cancel background tasks.
    pub fn shutdown(&self) {
        self.inner.cancel.cancel();
    }
}

fn build_client(
    settings: &ConnectionSettings,
    credentials: &Credentials,
    transport: &TransportConfig,
    policy: FetchPolicy,
) -> Result<OnosClient, CoreError> {
    Ok(OnosClient::new(
        &settings.host,
        &settings.port,
        credentials.clone(),
        transport,
        policy,
    )?)
}
