mod cluster;
mod use_cases;

pub use cluster::ClusterServices;
pub use use_cases::UseCases;
