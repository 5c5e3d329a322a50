use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::net::IpAddr;

use super::errors::ConfigError;
use crate::zone::{self, Zones};

/// Settings of the external zone resolver.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExternalConfig {
    /// Zones this resolver is authoritative for.
    #[serde(default = "default_zones")]
    pub zones: Vec<String>,

    #[serde(default = "default_ttl")]
    pub ttl: u32,

    /// Label under which the zone's own nameserver lives (`ns1.<apex>.<zone>`).
    #[serde(default = "default_apex")]
    pub apex: String,

    /// Publish endpoints of headless services.
    #[serde(default)]
    pub headless: bool,

    /// Use pod names as endpoint hostnames when no hostname is set.
    #[serde(default)]
    pub endpoint_pod_names: bool,

    /// Exposed namespaces. Empty exposes every namespace.
    #[serde(default)]
    pub namespaces: Vec<String>,

    /// Addresses published for the zone nameserver.
    #[serde(default)]
    pub nameserver_addresses: Vec<String>,
}

impl Default for ExternalConfig {
    fn default() -> Self {
        Self {
            zones: default_zones(),
            ttl: default_ttl(),
            apex: default_apex(),
            headless: false,
            endpoint_pod_names: false,
            namespaces: vec![],
            nameserver_addresses: vec![],
        }
    }
}

impl ExternalConfig {
    pub fn served_zones(&self) -> Zones {
        Zones::new(&self.zones)
    }

    pub fn exposed_namespaces(&self) -> HashSet<String> {
        self.namespaces.iter().cloned().collect()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.zones.is_empty() {
            return Err(ConfigError::Validation(
                "At least one external zone must be configured".to_string(),
            ));
        }

        for zone in &self.zones {
            if !zone::is_valid_name(zone) {
                return Err(ConfigError::Validation(format!(
                    "Invalid zone name '{}'",
                    zone
                )));
            }
        }

        if self.apex.is_empty() || self.apex.contains('.') || !zone::is_valid_name(&self.apex) {
            return Err(ConfigError::Validation(format!(
                "Invalid apex label '{}'",
                self.apex
            )));
        }

        if self.ttl == 0 {
            return Err(ConfigError::Validation("TTL must be at least 1".to_string()));
        }

        for addr in &self.nameserver_addresses {
            if addr.parse::<IpAddr>().is_err() {
                return Err(ConfigError::Validation(format!(
                    "Invalid nameserver address '{}'",
                    addr
                )));
            }
        }

        Ok(())
    }
}

fn default_zones() -> Vec<String> {
    vec!["example.org.".to_string()]
}

fn default_ttl() -> u32 {
    5
}

fn default_apex() -> String {
    "dns".to_string()
}
