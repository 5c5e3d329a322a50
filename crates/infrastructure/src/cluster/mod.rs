mod index;
mod namespaces;
mod snapshot;
mod sync;

pub use index::InMemoryClusterIndex;
pub use namespaces::ConfiguredNamespaces;
pub use snapshot::ClusterSnapshot;
pub use sync::FileSnapshotSync;
