use hickory_proto::rr::rdata::{A, AAAA};
use hickory_proto::rr::{Name, RData, Record};
use kubezone_application::ports::{ClusterStateIndex, NameserverAddressProvider, NamespaceFilter};
use kubezone_domain::{Endpoints, Service};
use std::collections::HashSet;
use std::net::IpAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;

#[derive(Clone, Default)]
pub struct MockClusterIndex {
    services: Arc<RwLock<Vec<Service>>>,
    endpoints: Arc<RwLock<Vec<Endpoints>>>,
    counter: Arc<AtomicU64>,
    external_counter: Arc<AtomicU64>,
}

impl MockClusterIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_services(self, services: Vec<Service>) -> Self {
        *self.services.write().unwrap() = services;
        self
    }

    pub fn with_endpoints(self, endpoints: Vec<Endpoints>) -> Self {
        *self.endpoints.write().unwrap() = endpoints;
        self
    }

    pub fn add_service(&self, service: Service) {
        self.services.write().unwrap().push(service);
        self.counter.fetch_add(1, Ordering::Relaxed);
        self.external_counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn set_serial(&self, serial: u64) {
        self.counter.store(serial, Ordering::Relaxed);
        self.external_counter.store(serial, Ordering::Relaxed);
    }

    /// Bump only the counter that tracks internal changes.
    pub fn touch_internal(&self) {
        self.counter.fetch_add(1, Ordering::Relaxed);
    }
}

impl ClusterStateIndex for MockClusterIndex {
    fn services_by_key(&self, namespace: &str, name: &str) -> Vec<Service> {
        self.services
            .read()
            .unwrap()
            .iter()
            .filter(|s| s.namespace == namespace && s.name == name)
            .cloned()
            .collect()
    }

    fn endpoints_by_key(&self, namespace: &str, name: &str) -> Vec<Endpoints> {
        self.endpoints
            .read()
            .unwrap()
            .iter()
            .filter(|e| e.namespace == namespace && e.name == name)
            .cloned()
            .collect()
    }

    fn all_services(&self) -> Vec<Service> {
        self.services.read().unwrap().clone()
    }

    fn modification_counter(&self, external_only: bool) -> u64 {
        if external_only {
            self.external_counter.load(Ordering::Relaxed)
        } else {
            self.counter.load(Ordering::Relaxed)
        }
    }
}

/// Index that returns every service for any key, like a coarse hash index.
pub struct CollidingClusterIndex {
    pub services: Vec<Service>,
}

impl ClusterStateIndex for CollidingClusterIndex {
    fn services_by_key(&self, _namespace: &str, _name: &str) -> Vec<Service> {
        self.services.clone()
    }

    fn endpoints_by_key(&self, _namespace: &str, _name: &str) -> Vec<Endpoints> {
        vec![]
    }

    fn all_services(&self) -> Vec<Service> {
        self.services.clone()
    }

    fn modification_counter(&self, _external_only: bool) -> u64 {
        1
    }
}

/// Index whose full listing holds the calling thread for `delay`.
pub struct SlowClusterIndex {
    pub inner: MockClusterIndex,
    pub delay: Duration,
}

impl ClusterStateIndex for SlowClusterIndex {
    fn services_by_key(&self, namespace: &str, name: &str) -> Vec<Service> {
        self.inner.services_by_key(namespace, name)
    }

    fn endpoints_by_key(&self, namespace: &str, name: &str) -> Vec<Endpoints> {
        self.inner.endpoints_by_key(namespace, name)
    }

    fn all_services(&self) -> Vec<Service> {
        std::thread::sleep(self.delay);
        self.inner.all_services()
    }

    fn modification_counter(&self, external_only: bool) -> u64 {
        self.inner.modification_counter(external_only)
    }
}

#[derive(Clone, Default)]
pub struct MockNamespaceFilter {
    exposed: HashSet<String>,
}

impl MockNamespaceFilter {
    /// Exposes every namespace.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn only(namespaces: &[&str]) -> Self {
        Self {
            exposed: namespaces.iter().map(|n| n.to_string()).collect(),
        }
    }
}

impl NamespaceFilter for MockNamespaceFilter {
    fn is_exposed(&self, namespace: &str) -> bool {
        self.exposed.is_empty() || self.exposed.contains(namespace)
    }
}

#[derive(Clone, Default)]
pub struct MockNameserverAddresses {
    addresses: Vec<IpAddr>,
}

impl MockNameserverAddresses {
    pub fn new(addresses: &[&str]) -> Self {
        Self {
            addresses: addresses.iter().map(|a| a.parse().unwrap()).collect(),
        }
    }
}

impl NameserverAddressProvider for MockNameserverAddresses {
    fn nameserver_addresses(&self, _zone: &str, _headless: bool) -> Vec<Record> {
        self.addresses
            .iter()
            .map(|ip| {
                let rdata = match ip {
                    IpAddr::V4(v4) => RData::A(A(*v4)),
                    IpAddr::V6(v6) => RData::AAAA(AAAA(*v6)),
                };
                Record::from_rdata(Name::root(), 0, rdata)
            })
            .collect()
    }
}
