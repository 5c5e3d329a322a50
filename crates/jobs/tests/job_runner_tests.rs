use kubezone_jobs::{ClusterSyncJob, JobRunner};
use std::sync::Arc;
use tokio::time::{sleep, timeout, Duration};
use tokio_util::sync::CancellationToken;

mod helpers;
use helpers::MockClusterSync;

#[tokio::test]
async fn test_job_runner_empty_starts_cleanly() {
    let handles = JobRunner::new().start().await;
    assert!(handles.is_empty());
}

#[tokio::test]
async fn test_job_runner_default_has_no_jobs() {
    let handles = JobRunner::default().start().await;
    assert!(handles.is_empty());
}

#[tokio::test]
async fn test_job_runner_starts_cluster_sync() {
    let sync = MockClusterSync::new();

    let handles = JobRunner::new()
        .with_cluster_sync(ClusterSyncJob::new(Arc::new(sync.clone()), 3600))
        .start()
        .await;
    assert_eq!(handles.len(), 1);

    sleep(Duration::from_millis(50)).await;
    assert_eq!(sync.calls(), 1);

    for handle in handles {
        handle.abort();
    }
}

#[tokio::test]
async fn test_job_runner_propagates_shutdown_token() {
    let sync = MockClusterSync::new();
    let token = CancellationToken::new();

    let handles = JobRunner::new()
        .with_cluster_sync(ClusterSyncJob::new(Arc::new(sync.clone()), 3600))
        .with_shutdown_token(token.clone())
        .start()
        .await;

    sleep(Duration::from_millis(50)).await;
    token.cancel();

    for handle in handles {
        timeout(Duration::from_secs(1), handle)
            .await
            .expect("runner job should stop on shutdown")
            .unwrap();
    }
}
