// ── Connection settings broadcast ──
//
// The mutable controller target (host + port). Saves are broadcast
// through a `watch` channel; the Controller and any other consumer
// subscribe explicitly instead of listening on an ambient event bus.

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::info;

/// Target host/port of the ONOS controller.
///
/// Invariant: the effective base URL is always
/// `http://{host}:{port}/onos/v1`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionSettings {
    pub host: String,
    pub port: String,
}

impl ConnectionSettings {
    pub fn new(host: impl Into<String>, port: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: port.into(),
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}:{}/onos/v1", self.host, self.port)
    }
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        Self {
            host: "192.168.94.129".into(),
            port: "8181".into(),
        }
    }
}

/// Broadcast hub for settings changes.
///
/// One sender, any number of subscribers. A `save` replaces the current
/// value and wakes every subscriber; the Controller picks the change up
/// on its very next issued call.
#[derive(Debug)]
pub struct SettingsBus {
    tx: watch::Sender<ConnectionSettings>,
}

impl SettingsBus {
    pub fn new(initial: ConnectionSettings) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    pub fn subscribe(&self) -> watch::Receiver<ConnectionSettings> {
        self.tx.subscribe()
    }

    pub fn current(&self) -> ConnectionSettings {
        self.tx.borrow().clone()
    }

    pub fn save(&self, settings: ConnectionSettings) {
        info!(host = %settings.host, port = %settings.port, "controller settings saved");
        self.tx.send_replace(settings);
    }
}

impl Default for SettingsBus {
    fn default() -> Self {
        Self::new(ConnectionSettings::default())
    }
}
