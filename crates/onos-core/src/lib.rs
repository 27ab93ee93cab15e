// onos-core: Domain layer for onosctl.
//
// Sits between onos-api (wire client) and the CLI: settings broadcast,
// controller facade with lazy client rebuild, polled topology store,
// and the request workbench.

pub mod controller;
pub mod error;
pub mod settings;
pub mod store;
pub mod workbench;

pub use controller::Controller;
pub use error::CoreError;
pub use settings::{ConnectionSettings, SettingsBus};
pub use store::TopologyStore;
pub use workbench::{ApiCollection, ApiRequest, CollectionExport, CollectionStore};

// Re-export the wire types consumers handle directly.
pub use onos_api::{
    ApiResponse, Credentials, Device, FetchPolicy, Flow, Host, HttpMethod, Link, Topology,
    TransportConfig,
};
