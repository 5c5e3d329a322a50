//! Kubezone Domain Layer
pub mod cluster;
pub mod config;
pub mod errors;
pub mod external_query;
pub mod service_record;
pub mod zone;

pub use cluster::{
    EndpointAddress, EndpointPort, EndpointSubset, Endpoints, Service, ServicePort,
};
pub use config::{CliOverrides, Config, ConfigError, ExternalConfig};
pub use errors::DomainError;
pub use external_query::{ExternalQuery, QueryTarget, ResponseStatus};
pub use service_record::ServiceRecord;
pub use zone::Zones;
