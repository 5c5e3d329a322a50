use async_trait::async_trait;
use kubezone_domain::DomainError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncOutcome {
    pub services: usize,
    pub endpoints: usize,
    /// Whether the index contents were replaced.
    pub changed: bool,
}

#[async_trait]
pub trait ClusterSyncPort: Send + Sync {
    async fn sync(&self) -> Result<SyncOutcome, DomainError>;
}
