use crate::ClusterSyncJob;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

pub trait SpawnableJob: Send + Sync + 'static {
    fn with_cancellation(self, token: CancellationToken) -> Self;
    fn start_job(self: Arc<Self>) -> tokio::task::JoinHandle<()>;
}

impl SpawnableJob for ClusterSyncJob {
    fn with_cancellation(self, token: CancellationToken) -> Self {
        self.with_cancellation(token)
    }

    fn start_job(self: Arc<Self>) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            if let Err(e) = self.start().await.await {
                error!(error = %e, "Cluster sync job terminated abnormally");
            }
        })
    }
}

fn spawn_job<J: SpawnableJob>(
    job: Option<J>,
    shutdown: &Option<CancellationToken>,
) -> Option<tokio::task::JoinHandle<()>> {
    let job = job?;
    let job = match shutdown {
        Some(token) => job.with_cancellation(token.clone()),
        None => job,
    };
    Some(Arc::new(job).start_job())
}

pub struct JobRunner {
    cluster_sync: Option<ClusterSyncJob>,
    shutdown: Option<CancellationToken>,
}

impl JobRunner {
    pub fn new() -> Self {
        Self {
            cluster_sync: None,
            shutdown: None,
        }
    }

    pub fn with_cluster_sync(mut self, job: ClusterSyncJob) -> Self {
        self.cluster_sync = Some(job);
        self
    }

    pub fn with_shutdown_token(mut self, token: CancellationToken) -> Self {
        self.shutdown = Some(token);
        self
    }

    /// Spawn every configured job and return their handles.
    pub async fn start(self) -> Vec<tokio::task::JoinHandle<()>> {
        info!("Starting background job runner");

        let handles: Vec<_> = spawn_job(self.cluster_sync, &self.shutdown)
            .into_iter()
            .collect();

        info!(jobs = handles.len(), "All background jobs started");
        handles
    }
}

impl Default for JobRunner {
    fn default() -> Self {
        Self::new()
    }
}
