// Canned records substituted for live data under `FetchPolicy::DemoFallback`.
//
// Shapes mirror a small two-switch Mininet topology so the rest of the
// stack behaves exactly as it would against a live controller.

use serde_json::{Value, json};

use crate::models::{ConnectPoint, Device, Flow, Host, HostLocation, Link};

pub fn devices() -> Vec<Device> {
    vec![
        Device {
            id: "of:0000000000000001".into(),
            device_type: "SWITCH".into(),
            available: true,
            role: "MASTER".into(),
            mfr: "Nicira, Inc.".into(),
            hw: "Open vSwitch".into(),
            sw: "2.17.0".into(),
            serial: "None".into(),
            driver: "ovs".into(),
            chassis_id: "1".into(),
            ..Device::default()
        },
        Device {
            id: "of:0000000000000002".into(),
            device_type: "SWITCH".into(),
            available: false,
            role: "STANDBY".into(),
            mfr: "Nicira, Inc.".into(),
            hw: "Open vSwitch".into(),
            sw: "2.17.0".into(),
            serial: "None".into(),
            driver: "ovs".into(),
            chassis_id: "2".into(),
            ..Device::default()
        },
    ]
}

pub fn links() -> Vec<Link> {
    let a = ConnectPoint {
        device: "of:0000000000000001".into(),
        port: "2".into(),
    };
    let b = ConnectPoint {
        device: "of:0000000000000002".into(),
        port: "2".into(),
    };
    vec![
        Link {
            src: a.clone(),
            dst: b.clone(),
            link_type: "DIRECT".into(),
            state: "ACTIVE".into(),
        },
        Link {
            src: b,
            dst: a,
            link_type: "DIRECT".into(),
            state: "ACTIVE".into(),
        },
    ]
}

pub fn hosts() -> Vec<Host> {
    vec![
        Host {
            id: "00:00:00:00:00:01/None".into(),
            mac: "00:00:00:00:00:01".into(),
            vlan: "None".into(),
            configured: false,
            suspended: false,
            ip_addresses: vec!["10.0.0.1".into()],
            locations: vec![HostLocation {
                element_id: "of:0000000000000001".into(),
                port: "1".into(),
            }],
            ..Host::default()
        },
        Host {
            id: "00:00:00:00:00:02/None".into(),
            mac: "00:00:00:00:00:02".into(),
            vlan: "None".into(),
            configured: false,
            suspended: false,
            ip_addresses: vec!["10.0.0.2".into()],
            locations: vec![HostLocation {
                element_id: "of:0000000000000002".into(),
                port: "1".into(),
            }],
            ..Host::default()
        },
    ]
}

pub fn flows(device_id: Option<&str>) -> Vec<Flow> {
    let all = vec![
        Flow {
            id: "281475849839025".into(),
            device_id: "of:0000000000000001".into(),
            table_id: 0,
            priority: 40000,
            timeout: 0,
            is_permanent: true,
            selector: json!({ "criteria": [{ "type": "ETH_TYPE", "ethType": "0x88cc" }] }),
            treatment: json!({ "instructions": [{ "type": "OUTPUT", "port": "CONTROLLER" }] }),
            app_id: "org.onosproject.core".into(),
            state: "ADDED".into(),
            life: 3600,
            packets: 1200,
            bytes: 73_200,
            last_seen: 1_700_000_000_000,
            ..Flow::default()
        },
        Flow {
            id: "281476583295642".into(),
            device_id: "of:0000000000000002".into(),
            table_id: 0,
            priority: 5,
            timeout: 0,
            is_permanent: true,
            selector: json!({ "criteria": [] }),
            treatment: json!({ "instructions": [{ "type": "NOACTION" }] }),
            app_id: "org.onosproject.fwd".into(),
            state: "ADDED".into(),
            life: 1800,
            packets: 64,
            bytes: 4096,
            last_seen: 1_700_000_000_000,
            ..Flow::default()
        },
    ];

    match device_id {
        Some(id) => all.into_iter().filter(|f| f.device_id == id).collect(),
        None => all,
    }
}

/// Synthetic passthrough body, keyed off substring matches on the
/// endpoint. Unknown endpoints get a generic acknowledgement object.
pub fn custom_body(endpoint: &str) -> Value {
    if endpoint.contains("/devices") {
        json!({ "devices": devices() })
    } else if endpoint.contains("/links") {
        json!({ "links": links() })
    } else if endpoint.contains("/hosts") {
        json!({ "hosts": hosts() })
    } else if endpoint.contains("/flows") {
        json!({ "flows": flows(None) })
    } else {
        json!({ "message": "demo mode: request acknowledged", "endpoint": endpoint })
    }
}
