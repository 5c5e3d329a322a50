use kubezone_application::ports::ClusterSyncPort;
use kubezone_domain::Config;
use kubezone_infrastructure::cluster::{ConfiguredNamespaces, FileSnapshotSync, InMemoryClusterIndex};
use std::sync::Arc;
use tracing::{info, warn};

pub struct ClusterServices {
    pub index: Arc<InMemoryClusterIndex>,
    pub namespaces: Arc<ConfiguredNamespaces>,
    pub sync: Arc<dyn ClusterSyncPort>,
}

impl ClusterServices {
    /// Builds the index and loads the first snapshot so the zone is populated
    /// before the server starts answering.
    pub async fn new(config: &Config) -> Self {
        let index = Arc::new(InMemoryClusterIndex::new());
        let namespaces = Arc::new(ConfiguredNamespaces::from_config(&config.external));
        let sync: Arc<dyn ClusterSyncPort> = Arc::new(FileSnapshotSync::new(
            &config.cluster.snapshot_path,
            index.clone(),
        ));

        match sync.sync().await {
            Ok(outcome) => info!(
                services = outcome.services,
                endpoints = outcome.endpoints,
                "Initial cluster state loaded"
            ),
            Err(e) => warn!(
                error = %e,
                "Initial cluster sync failed, serving an empty zone until the next sync"
            ),
        }

        Self {
            index,
            namespaces,
            sync,
        }
    }
}
