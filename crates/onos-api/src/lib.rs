// onos-api: Async Rust client for the ONOS SDN controller REST API.

pub mod client;
pub mod demo;
pub mod error;
pub mod models;
pub mod transport;

pub use client::{ApiResponse, FetchPolicy, HttpMethod, OnosClient, substitute_placeholders};
pub use error::Error;
pub use models::{ConnectPoint, Device, Flow, Host, HostLocation, Link, Port, Topology};
pub use transport::{Credentials, DEFAULT_TIMEOUT, TransportConfig};
