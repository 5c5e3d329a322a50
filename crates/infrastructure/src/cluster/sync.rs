use super::{ClusterSnapshot, InMemoryClusterIndex};
use async_trait::async_trait;
use kubezone_application::ports::{ClusterSyncPort, SyncOutcome};
use kubezone_domain::DomainError;
use rustc_hash::FxHasher;
use std::hash::{Hash, Hasher};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Loads the cluster state from a JSON snapshot file into the index.
pub struct FileSnapshotSync {
    path: PathBuf,
    index: Arc<InMemoryClusterIndex>,
    last_digest: Mutex<Option<u64>>,
}

impl FileSnapshotSync {
    pub fn new(path: impl Into<PathBuf>, index: Arc<InMemoryClusterIndex>) -> Self {
        Self {
            path: path.into(),
            index,
            last_digest: Mutex::new(None),
        }
    }

    fn outcome(&self, changed: bool) -> SyncOutcome {
        SyncOutcome {
            services: self.index.service_count(),
            endpoints: self.index.endpoints_count(),
            changed,
        }
    }
}

fn digest(contents: &str) -> u64 {
    let mut hasher = FxHasher::default();
    contents.hash(&mut hasher);
    hasher.finish()
}

#[async_trait]
impl ClusterSyncPort for FileSnapshotSync {
    async fn sync(&self) -> Result<SyncOutcome, DomainError> {
        let contents = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            DomainError::SnapshotUnavailable(format!("{}: {}", self.path.display(), e))
        })?;

        let mut last_digest = self.last_digest.lock().await;
        let current = digest(&contents);
        if *last_digest == Some(current) {
            debug!(path = %self.path.display(), "Cluster snapshot unchanged");
            return Ok(self.outcome(false));
        }

        let snapshot = ClusterSnapshot::from_json(&contents)?;
        let changed = self.index.replace(snapshot.services, snapshot.endpoints);
        *last_digest = Some(current);

        let outcome = self.outcome(changed);
        info!(
            path = %self.path.display(),
            services = outcome.services,
            endpoints = outcome.endpoints,
            changed,
            "Cluster snapshot loaded"
        );
        Ok(outcome)
    }
}
