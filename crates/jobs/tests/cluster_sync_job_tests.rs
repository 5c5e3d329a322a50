use kubezone_jobs::ClusterSyncJob;
use std::sync::Arc;
use tokio::time::{sleep, timeout, Duration};
use tokio_util::sync::CancellationToken;

mod helpers;
use helpers::MockClusterSync;

#[tokio::test]
async fn test_first_tick_syncs_immediately() {
    let sync = MockClusterSync::new();
    let job = Arc::new(ClusterSyncJob::new(Arc::new(sync.clone()), 3600));

    let handle = job.start().await;
    sleep(Duration::from_millis(50)).await;

    assert_eq!(sync.calls(), 1);
    handle.abort();
}

#[tokio::test]
async fn test_syncs_again_after_interval() {
    let sync = MockClusterSync::new();
    let job = Arc::new(ClusterSyncJob::new(Arc::new(sync.clone()), 3600).with_interval(1));

    let handle = job.start().await;
    sleep(Duration::from_millis(1500)).await;

    assert_eq!(sync.calls(), 2);
    handle.abort();
}

#[tokio::test]
async fn test_failures_do_not_stop_the_job() {
    let sync = MockClusterSync::failing();
    let job = Arc::new(ClusterSyncJob::new(Arc::new(sync.clone()), 1));

    let handle = job.start().await;
    sleep(Duration::from_millis(1500)).await;

    assert_eq!(sync.calls(), 2);
    assert!(!handle.is_finished());
    handle.abort();
}

#[tokio::test]
async fn test_cancellation_stops_the_job() {
    let sync = MockClusterSync::new();
    let token = CancellationToken::new();
    let job = Arc::new(
        ClusterSyncJob::new(Arc::new(sync.clone()), 3600).with_cancellation(token.clone()),
    );

    let handle = job.start().await;
    token.cancel();

    timeout(Duration::from_secs(1), handle)
        .await
        .expect("job should stop after cancellation")
        .unwrap();
}

#[tokio::test]
async fn test_cancelled_before_start_never_syncs() {
    let sync = MockClusterSync::new();
    let token = CancellationToken::new();
    token.cancel();
    let job = Arc::new(
        ClusterSyncJob::new(Arc::new(sync.clone()), 3600).with_cancellation(token),
    );

    job.start().await.await.unwrap();

    assert_eq!(sync.calls(), 0);
}
