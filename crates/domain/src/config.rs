pub mod cluster;
pub mod errors;
pub mod external;
pub mod logging;
pub mod root;
pub mod server;

pub use cluster::ClusterConfig;
pub use errors::ConfigError;
pub use external::ExternalConfig;
pub use logging::LoggingConfig;
pub use root::{CliOverrides, Config};
pub use server::ServerConfig;
