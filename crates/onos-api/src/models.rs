// Wire models mirroring the ONOS REST shapes.
//
// These are read-only records from this system's perspective. The two
// freshness fields on devices, hosts, and flows are derived locally at
// fetch time and never come from the controller, hence
// `skip_deserializing`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An infrastructure device (switch) managed by the controller.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Device {
    pub id: String,
    #[serde(rename = "type")]
    pub device_type: String,
    pub available: bool,
    pub role: String,
    pub mfr: String,
    pub hw: String,
    pub sw: String,
    pub serial: String,
    pub driver: String,
    pub chassis_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ports: Option<Vec<Port>>,
    #[serde(skip_deserializing)]
    pub last_update: Option<DateTime<Utc>>,
    #[serde(skip_deserializing)]
    pub last_update_text: Option<String>,
}

/// A port on a device.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Port {
    pub port: String,
    pub is_enabled: bool,
    #[serde(rename = "type")]
    pub port_type: String,
    pub port_speed: u64,
    pub annotations: Value,
}

/// One endpoint of a link: a device and a port on it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectPoint {
    pub device: String,
    pub port: String,
}

/// An inter-switch link.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Link {
    pub src: ConnectPoint,
    pub dst: ConnectPoint,
    #[serde(rename = "type")]
    pub link_type: String,
    pub state: String,
}

/// Where a host attaches to the fabric.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HostLocation {
    pub element_id: String,
    pub port: String,
}

/// An end host known to the controller.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Host {
    pub id: String,
    pub mac: String,
    pub vlan: String,
    pub inner_vlan: String,
    pub outer_tpid: String,
    pub configured: bool,
    pub suspended: bool,
    pub ip_addresses: Vec<String>,
    pub locations: Vec<HostLocation>,
    #[serde(skip_deserializing)]
    pub last_update: Option<DateTime<Utc>>,
    #[serde(skip_deserializing)]
    pub last_update_text: Option<String>,
}

/// An installed forwarding rule.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Flow {
    pub id: String,
    pub device_id: String,
    pub table_id: i64,
    pub priority: i64,
    pub timeout: i64,
    pub is_permanent: bool,
    pub selector: Value,
    pub treatment: Value,
    pub app_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<i64>,
    pub state: String,
    pub life: i64,
    pub packets: i64,
    pub bytes: i64,
    pub last_seen: i64,
    #[serde(skip_deserializing)]
    pub last_update: Option<DateTime<Utc>>,
    #[serde(skip_deserializing)]
    pub last_update_text: Option<String>,
}

/// Aggregate of the three topology fetches.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Topology {
    pub devices: Vec<Device>,
    pub links: Vec<Link>,
    pub hosts: Vec<Host>,
}

// ── Freshness stamping ───────────────────────────────────────────────

pub(crate) trait Stamp {
    fn stamp(&mut self, now: DateTime<Utc>);
}

macro_rules! impl_stamp {
    ($($ty:ty),*) => {$(
        impl Stamp for $ty {
            fn stamp(&mut self, now: DateTime<Utc>) {
                self.last_update = Some(now);
                self.last_update_text = Some("updated just now".to_owned());
            }
        }
    )*};
}

impl_stamp!(Device, Host, Flow);
