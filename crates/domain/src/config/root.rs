use serde::{Deserialize, Serialize};

use super::cluster::ClusterConfig;
use super::errors::ConfigError;
use super::external::ExternalConfig;
use super::logging::LoggingConfig;
use super::server::ServerConfig;

/// Main configuration structure for kubezone
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Server configuration (port, bind address)
    #[serde(default)]
    pub server: ServerConfig,

    /// External zone configuration
    #[serde(default)]
    pub external: ExternalConfig,

    /// Cluster state source
    #[serde(default)]
    pub cluster: ClusterConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. kubezone.toml in current directory
    /// 3. /etc/kubezone/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new("kubezone.toml").exists() {
            Self::from_file("kubezone.toml")?
        } else if std::path::Path::new("/etc/kubezone/config.toml").exists() {
            Self::from_file("/etc/kubezone/config.toml")?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        config.normalize_zones();
        Ok(config)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let mut config: Self =
            toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.normalize_zones();
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(port) = overrides.dns_port {
            self.server.dns_port = port;
        }
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(snapshot) = overrides.snapshot_path {
            self.cluster.snapshot_path = snapshot;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
        if !overrides.zones.is_empty() {
            self.external.zones = overrides.zones;
        }
    }

    /// Zones are compared as lowercase fully qualified names everywhere
    fn normalize_zones(&mut self) {
        self.external.zones = self
            .external
            .zones
            .iter()
            .map(|z| crate::zone::normalize(z))
            .collect();
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.dns_port == 0 {
            return Err(ConfigError::Validation("DNS port cannot be 0".to_string()));
        }

        if self.cluster.sync_interval_secs == 0 {
            return Err(ConfigError::Validation(
                "Cluster sync interval cannot be 0".to_string(),
            ));
        }

        self.external.validate()
    }

    /// Save configuration to file
    pub fn save(&self, path: &str) -> Result<(), ConfigError> {
        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Parse(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, toml_string)
            .map_err(|e| ConfigError::FileWrite(path.to_string(), e.to_string()))?;
        Ok(())
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub dns_port: Option<u16>,
    pub bind_address: Option<String>,
    pub snapshot_path: Option<String>,
    pub log_level: Option<String>,
    pub zones: Vec<String>,
}
