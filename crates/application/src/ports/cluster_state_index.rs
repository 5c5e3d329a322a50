use kubezone_domain::{Endpoints, Service};

/// Read access to the indexed cluster state.
pub trait ClusterStateIndex: Send + Sync {
    /// Services stored under `namespace/name`. The index may return more than
    /// one entry for a key; callers re-check name and namespace.
    fn services_by_key(&self, namespace: &str, name: &str) -> Vec<Service>;

    fn endpoints_by_key(&self, namespace: &str, name: &str) -> Vec<Endpoints>;

    fn all_services(&self) -> Vec<Service>;

    /// Monotonic change counter. With `external_only` it only moves when
    /// something visible in the external zone changed.
    fn modification_counter(&self, external_only: bool) -> u64;
}
