mod cluster_state_index;
mod cluster_sync_port;
mod nameserver_address_provider;
mod namespace_filter;

pub use cluster_state_index::ClusterStateIndex;
pub use cluster_sync_port::{ClusterSyncPort, SyncOutcome};
pub use nameserver_address_provider::NameserverAddressProvider;
pub use namespace_filter::NamespaceFilter;
