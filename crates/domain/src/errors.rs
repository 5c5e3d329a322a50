use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Not authoritative for zone: {0}")]
    NotAuthoritative(String),

    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Invalid IP address: {0}")]
    InvalidIpAddress(String),

    #[error("Cluster snapshot unavailable: {0}")]
    SnapshotUnavailable(String),

    #[error("Invalid cluster snapshot: {0}")]
    InvalidSnapshot(String),
}
