use serde::{Deserialize, Serialize};

/// Where cluster state comes from and how often it is re-read.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClusterConfig {
    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: String,

    #[serde(default = "default_sync_interval_secs")]
    pub sync_interval_secs: u64,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            snapshot_path: default_snapshot_path(),
            sync_interval_secs: default_sync_interval_secs(),
        }
    }
}

fn default_snapshot_path() -> String {
    "cluster.json".to_string()
}

fn default_sync_interval_secs() -> u64 {
    30
}
