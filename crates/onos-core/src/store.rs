// ── Polled topology snapshot store ──
//
// Holds the latest devices/links/hosts snapshots behind `watch`
// channels. Refreshes carry a monotonic generation: a slow response
// from an earlier poll cycle can never overwrite a newer snapshot.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use tokio::sync::watch;

use onos_api::{Device, Host, Link, Topology};

pub struct TopologyStore {
    devices: watch::Sender<Arc<Vec<Device>>>,
    links: watch::Sender<Arc<Vec<Link>>>,
    hosts: watch::Sender<Arc<Vec<Host>>>,
    last_refresh: watch::Sender<Option<DateTime<Utc>>>,
    next_generation: AtomicU64,
    applied_generation: AtomicU64,
}

impl TopologyStore {
    pub fn new() -> Self {
        let (devices, _) = watch::channel(Arc::new(Vec::new()));
        let (links, _) = watch::channel(Arc::new(Vec::new()));
        let (hosts, _) = watch::channel(Arc::new(Vec::new()));
        let (last_refresh, _) = watch::channel(None);

        Self {
            devices,
            links,
            hosts,
            last_refresh,
            next_generation: AtomicU64::new(0),
            applied_generation: AtomicU64::new(0),
        }
    }

    /// Hand out the generation for a refresh about to be issued.
    /// Generations start at 1; 0 means "nothing applied yet".
    pub fn begin_refresh(&self) -> u64 {
        self.next_generation.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Apply a snapshot fetched under `generation`.
    ///
    /// Returns `false` (and changes nothing) when a newer snapshot has
    /// already been applied -- the stale-response guard.
    pub fn apply(&self, generation: u64, topology: Topology) -> bool {
        let mut current = self.applied_generation.load(Ordering::Acquire);
        loop {
            if generation <= current {
                return false;
            }
            match self.applied_generation.compare_exchange(
                current,
                generation,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => break,
                Err(observed) => current = observed,
            }
        }

        self.devices.send_replace(Arc::new(topology.devices));
        self.links.send_replace(Arc::new(topology.links));
        self.hosts.send_replace(Arc::new(topology.hosts));
        self.last_refresh.send_replace(Some(Utc::now()));
        true
    }

    // ── Snapshot accessors ───────────────────────────────────────────

    pub fn devices_snapshot(&self) -> Arc<Vec<Device>> {
        self.devices.borrow().clone()
    }

    pub fn links_snapshot(&self) -> Arc<Vec<Link>> {
        self.links.borrow().clone()
    }

    pub fn hosts_snapshot(&self) -> Arc<Vec<Host>> {
        self.hosts.borrow().clone()
    }

    pub fn last_refresh(&self) -> Option<DateTime<Utc>> {
        *self.last_refresh.borrow()
    }

    // ── Subscriptions ────────────────────────────────────────────────

    pub fn subscribe_devices(&self) -> watch::Receiver<Arc<Vec<Device>>> {
        self.devices.subscribe()
    }

    pub fn subscribe_last_refresh(&self) -> watch::Receiver<Option<DateTime<Utc>>> {
        self.last_refresh.subscribe()
    }
}

impl Default for TopologyStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn topo(device_id: &str) -> Topology {
        Topology {
            devices: vec![Device {
                id: device_id.to_owned(),
                ..Device::default()
            }],
            links: Vec::new(),
            hosts: Vec::new(),
        }
    }

    #[test]
    fn fresh_snapshot_applies() {
        let store = TopologyStore::new();
        let generation = store.begin_refresh();
        assert!(store.apply(generation, topo("of:1")));
        assert_eq!(store.devices_snapshot()[0].id, "of:1");
        assert!(store.last_refresh().is_some());
    }

    #[test]
    fn stale_snapshot_is_discarded() {
        let store = TopologyStore::new();
        let early = store.begin_refresh();
        let late = store.begin_refresh();

        // The later poll's response lands first.
        assert!(store.apply(late, topo("of:new")));
        // The earlier poll's slow response must not win.
        assert!(!store.apply(early, topo("of:old")));
        assert_eq!(store.devices_snapshot()[0].id, "of:new");
    }

    #[test]
    fn reapplying_same_generation_is_rejected() {
        let store = TopologyStore::new();
        let generation = store.begin_refresh();
        assert!(store.apply(generation, topo("of:1")));
        assert!(!store.apply(generation, topo("of:dup")));
    }
}
