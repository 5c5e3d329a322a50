pub mod cluster_sync;
pub mod runner;

pub use cluster_sync::ClusterSyncJob;
pub use runner::JobRunner;
