use kubezone_domain::{DomainError, Endpoints, Service};
use serde::{Deserialize, Serialize};

/// On-disk cluster state: `{ "services": [...], "endpoints": [...] }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterSnapshot {
    #[serde(default)]
    pub services: Vec<Service>,
    #[serde(default)]
    pub endpoints: Vec<Endpoints>,
}

impl ClusterSnapshot {
    pub fn from_json(json: &str) -> Result<Self, DomainError> {
        serde_json::from_str(json).map_err(|e| DomainError::InvalidSnapshot(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String, DomainError> {
        serde_json::to_string_pretty(self).map_err(|e| DomainError::InvalidSnapshot(e.to_string()))
    }
}
