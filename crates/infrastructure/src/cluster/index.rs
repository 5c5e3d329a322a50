use arc_swap::ArcSwap;
use kubezone_application::ports::ClusterStateIndex;
use kubezone_domain::{Endpoints, Service};
use rustc_hash::FxHashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::debug;

type ObjectKey = (String, String);

fn key(namespace: &str, name: &str) -> ObjectKey {
    (namespace.to_string(), name.to_string())
}

#[derive(Debug, Clone, Default)]
struct ClusterState {
    services: FxHashMap<ObjectKey, Service>,
    endpoints: FxHashMap<ObjectKey, Endpoints>,
}

impl ClusterState {
    fn from_lists(services: Vec<Service>, endpoints: Vec<Endpoints>) -> Self {
        Self {
            services: services
                .into_iter()
                .map(|s| (key(&s.namespace, &s.name), s))
                .collect(),
            endpoints: endpoints
                .into_iter()
                .map(|e| (key(&e.namespace, &e.name), e))
                .collect(),
        }
    }

    fn is_visible(&self, k: &ObjectKey) -> bool {
        self.services
            .get(k)
            .is_some_and(Service::is_externally_visible)
    }

    /// Whether the externally visible part of the cluster differs.
    fn external_view_differs(&self, other: &ClusterState) -> bool {
        let services_differ = self
            .services
            .keys()
            .chain(other.services.keys())
            .filter(|k| self.is_visible(k) || other.is_visible(k))
            .any(|k| self.services.get(k) != other.services.get(k));
        if services_differ {
            return true;
        }

        self.endpoints
            .keys()
            .chain(other.endpoints.keys())
            .filter(|k| self.is_visible(k) || other.is_visible(k))
            .any(|k| self.endpoints.get(k) != other.endpoints.get(k))
    }
}

/// Cluster state held in memory and published as immutable snapshots.
///
/// Readers load the current snapshot without locking; writers are serialized
/// and swap in a modified copy. Two counters track changes: one for every
/// change and one only for changes visible in the external zone.
pub struct InMemoryClusterIndex {
    state: ArcSwap<ClusterState>,
    write_lock: Mutex<()>,
    modified: AtomicU64,
    modified_external: AtomicU64,
}

impl Default for InMemoryClusterIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryClusterIndex {
    /// Counters start at the current Unix time so serials keep increasing
    /// across restarts.
    pub fn new() -> Self {
        let start = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(1);
        Self::with_initial_counter(start)
    }

    pub fn with_initial_counter(start: u64) -> Self {
        Self {
            state: ArcSwap::from_pointee(ClusterState::default()),
            write_lock: Mutex::new(()),
            modified: AtomicU64::new(start),
            modified_external: AtomicU64::new(start),
        }
    }

    /// Replace the whole cluster state. Returns whether anything changed.
    pub fn replace(&self, services: Vec<Service>, endpoints: Vec<Endpoints>) -> bool {
        self.update(|state| {
            *state = ClusterState::from_lists(services, endpoints);
        })
    }

    pub fn upsert_service(&self, service: Service) -> bool {
        self.update(|state| {
            state
                .services
                .insert(key(&service.namespace, &service.name), service);
        })
    }

    pub fn remove_service(&self, namespace: &str, name: &str) -> bool {
        self.update(|state| {
            state.services.remove(&key(namespace, name));
        })
    }

    pub fn upsert_endpoints(&self, endpoints: Endpoints) -> bool {
        self.update(|state| {
            state
                .endpoints
                .insert(key(&endpoints.namespace, &endpoints.name), endpoints);
        })
    }

    pub fn remove_endpoints(&self, namespace: &str, name: &str) -> bool {
        self.update(|state| {
            state.endpoints.remove(&key(namespace, name));
        })
    }

    pub fn service_count(&self) -> usize {
        self.state.load().services.len()
    }

    pub fn endpoints_count(&self) -> usize {
        self.state.load().endpoints.len()
    }

    fn update(&self, change: impl FnOnce(&mut ClusterState)) -> bool {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());

        let current = self.state.load_full();
        let mut next = ClusterState::clone(&current);
        change(&mut next);

        if next.services == current.services && next.endpoints == current.endpoints {
            return false;
        }

        let external = current.external_view_differs(&next);
        self.state.store(Arc::new(next));

        let serial = self.modified.fetch_add(1, Ordering::AcqRel) + 1;
        if external {
            self.modified_external.fetch_add(1, Ordering::AcqRel);
        }
        debug!(serial, external, "Cluster state updated");
        true
    }
}

impl ClusterStateIndex for InMemoryClusterIndex {
    fn services_by_key(&self, namespace: &str, name: &str) -> Vec<Service> {
        self.state
            .load()
            .services
            .get(&key(namespace, name))
            .cloned()
            .into_iter()
            .collect()
    }

    fn endpoints_by_key(&self, namespace: &str, name: &str) -> Vec<Endpoints> {
        self.state
            .load()
            .endpoints
            .get(&key(namespace, name))
            .cloned()
            .into_iter()
            .collect()
    }

    fn all_services(&self) -> Vec<Service> {
        let state = self.state.load();
        let mut services: Vec<Service> = state.services.values().cloned().collect();
        services.sort_by(|a, b| (&a.namespace, &a.name).cmp(&(&b.namespace, &b.name)));
        services
    }

    fn modification_counter(&self, external_only: bool) -> u64 {
        if external_only {
            self.modified_external.load(Ordering::Acquire)
        } else {
            self.modified.load(Ordering::Acquire)
        }
    }
}
