use serde::{Deserialize, Serialize};

/// A port exposed by a Service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServicePort {
    #[serde(default)]
    pub name: String,
    pub port: u16,
    #[serde(default = "default_protocol")]
    pub protocol: String,
}

impl ServicePort {
    pub fn new(name: &str, port: u16, protocol: &str) -> Self {
        Self {
            name: name.to_string(),
            port,
            protocol: protocol.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub name: String,
    pub namespace: String,
    #[serde(default)]
    pub external_ips: Vec<String>,
    #[serde(default)]
    pub ports: Vec<ServicePort>,
    /// Service without a cluster IP; its endpoints are published individually.
    #[serde(default)]
    pub headless: bool,
}

impl Service {
    pub fn new(name: &str, namespace: &str) -> Self {
        Self {
            name: name.to_string(),
            namespace: namespace.to_string(),
            external_ips: vec![],
            ports: vec![],
            headless: false,
        }
    }

    pub fn with_external_ip(mut self, ip: &str) -> Self {
        self.external_ips.push(ip.to_string());
        self
    }

    pub fn with_port(mut self, port: ServicePort) -> Self {
        self.ports.push(port);
        self
    }

    pub fn headless(mut self) -> Self {
        self.headless = true;
        self
    }

    pub fn is_headless(&self) -> bool {
        self.headless
    }

    /// Whether this service can show up in the external zone at all.
    pub fn is_externally_visible(&self) -> bool {
        self.headless || !self.external_ips.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointAddress {
    pub ip: String,
    #[serde(default)]
    pub hostname: Option<String>,
    /// Name of the pod backing this address, if known.
    #[serde(default)]
    pub target_ref_name: Option<String>,
}

impl EndpointAddress {
    pub fn new(ip: &str) -> Self {
        Self {
            ip: ip.to_string(),
            hostname: None,
            target_ref_name: None,
        }
    }

    pub fn with_hostname(mut self, hostname: &str) -> Self {
        self.hostname = Some(hostname.to_string());
        self
    }

    pub fn with_target_ref(mut self, pod_name: &str) -> Self {
        self.target_ref_name = Some(pod_name.to_string());
        self
    }

    /// DNS label used for this address under its service.
    ///
    /// Preference order: explicit hostname, pod name (only with
    /// `endpoint_pod_names`), then the IP with separators turned into dashes.
    pub fn derived_hostname(&self, endpoint_pod_names: bool) -> String {
        if let Some(hostname) = self.hostname.as_deref().filter(|h| !h.is_empty()) {
            return hostname.to_string();
        }

        if endpoint_pod_names {
            if let Some(pod) = self.target_ref_name.as_deref().filter(|p| !p.is_empty()) {
                return pod.to_string();
            }
        }

        if self.ip.contains('.') {
            return self.ip.replace('.', "-");
        }

        if self.ip.contains(':') {
            let mut label = self.ip.replace(':', "-");
            if label.starts_with('-') {
                label.insert(0, '0');
            }
            if label.ends_with('-') {
                label.push('0');
            }
            return label;
        }

        self.ip.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointPort {
    #[serde(default)]
    pub name: String,
    pub port: u16,
    #[serde(default = "default_protocol")]
    pub protocol: String,
}

impl EndpointPort {
    pub fn new(name: &str, port: u16, protocol: &str) -> Self {
        Self {
            name: name.to_string(),
            port,
            protocol: protocol.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EndpointSubset {
    #[serde(default)]
    pub addresses: Vec<EndpointAddress>,
    #[serde(default)]
    pub ports: Vec<EndpointPort>,
}

/// Backend addresses of the Service with the same name and namespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoints {
    pub name: String,
    pub namespace: String,
    #[serde(default)]
    pub subsets: Vec<EndpointSubset>,
}

impl Endpoints {
    pub fn new(name: &str, namespace: &str) -> Self {
        Self {
            name: name.to_string(),
            namespace: namespace.to_string(),
            subsets: vec![],
        }
    }

    pub fn with_subset(mut self, subset: EndpointSubset) -> Self {
        self.subsets.push(subset);
        self
    }

    pub fn belongs_to(&self, service: &Service) -> bool {
        self.name == service.name && self.namespace == service.namespace
    }
}

fn default_protocol() -> String {
    "TCP".to_string()
}
