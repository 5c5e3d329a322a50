use kubezone_application::ports::ClusterSyncPort;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Periodically refreshes the cluster index from its source.
pub struct ClusterSyncJob {
    sync: Arc<dyn ClusterSyncPort>,
    interval_secs: u64,
    shutdown: CancellationToken,
}

impl ClusterSyncJob {
    pub fn new(sync: Arc<dyn ClusterSyncPort>, interval_secs: u64) -> Self {
        Self {
            sync,
            interval_secs,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_interval(mut self, interval_secs: u64) -> Self {
        self.interval_secs = interval_secs;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub async fn start(self: Arc<Self>) -> tokio::task::JoinHandle<()> {
        info!(interval_secs = self.interval_secs, "Starting cluster sync job");

        tokio::spawn(async move {
            let mut interval =
                tokio::time::interval(Duration::from_secs(self.interval_secs.max(1)));
            loop {
                tokio::select! {
                    biased;
                    _ = self.shutdown.cancelled() => {
                        info!("ClusterSyncJob: shutting down");
                        break;
                    }
                    _ = interval.tick() => {
                        match self.sync.sync().await {
                            Ok(outcome) if outcome.changed => {
                                info!(
                                    services = outcome.services,
                                    endpoints = outcome.endpoints,
                                    "Cluster state refreshed"
                                );
                            }
                            Ok(_) => debug!("Cluster state unchanged"),
                            Err(e) => warn!(error = %e, "Cluster sync failed"),
                        }
                    }
                }
            }
        })
    }
}
