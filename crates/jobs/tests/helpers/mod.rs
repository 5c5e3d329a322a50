#![allow(dead_code)]

use async_trait::async_trait;
use kubezone_application::ports::{ClusterSyncPort, SyncOutcome};
use kubezone_domain::DomainError;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Clone, Default)]
pub struct MockClusterSync {
    calls: Arc<AtomicUsize>,
    should_fail: Arc<AtomicBool>,
}

impl MockClusterSync {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        let sync = Self::default();
        sync.should_fail.store(true, Ordering::Relaxed);
        sync
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl ClusterSyncPort for MockClusterSync {
    async fn sync(&self) -> Result<SyncOutcome, DomainError> {
        let call = self.calls.fetch_add(1, Ordering::Relaxed);
        if self.should_fail.load(Ordering::Relaxed) {
            return Err(DomainError::SnapshotUnavailable("mock".to_string()));
        }
        Ok(SyncOutcome {
            services: 1,
            endpoints: 0,
            changed: call == 0,
        })
    }
}
