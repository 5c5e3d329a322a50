use crate::ports::{ClusterStateIndex, NamespaceFilter};
use kubezone_domain::external_query::{endpoint_matches, port_matches, protocol_matches};
use kubezone_domain::{
    zone, ExternalConfig, ExternalQuery, QueryTarget, ResponseStatus, Service, ServiceRecord,
};
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalResolution {
    pub records: Vec<ServiceRecord>,
    pub status: ResponseStatus,
}

impl ExternalResolution {
    fn status(status: ResponseStatus) -> Self {
        Self {
            records: vec![],
            status,
        }
    }
}

/// Maps zone-relative names onto services and endpoints of the cluster.
pub struct ResolveExternalUseCase {
    index: Arc<dyn ClusterStateIndex>,
    namespaces: Arc<dyn NamespaceFilter>,
    ttl: u32,
    endpoint_pod_names: bool,
}

impl ResolveExternalUseCase {
    pub fn new(
        index: Arc<dyn ClusterStateIndex>,
        namespaces: Arc<dyn NamespaceFilter>,
        config: &ExternalConfig,
    ) -> Self {
        Self {
            index,
            namespaces,
            ttl: config.ttl,
            endpoint_pod_names: config.endpoint_pod_names,
        }
    }

    /// Resolve `relative_name` (the query name with `zone` removed).
    ///
    /// Headless services and explicit endpoint labels are answered from
    /// endpoints. `headless` only affects zone-wide enumeration.
    pub fn resolve(&self, zone: &str, relative_name: &str, _headless: bool) -> ExternalResolution {
        let query = match ExternalQuery::parse(relative_name) {
            Ok(query) => query,
            Err(status) => {
                debug!(name = %relative_name, status = status.as_str(), "Unparseable external name");
                return ExternalResolution::status(status);
            }
        };

        if !self.namespaces.is_exposed(&query.namespace) {
            debug!(namespace = %query.namespace, "Namespace not exposed");
            return ExternalResolution::status(ResponseStatus::NameError);
        }

        let Some(service_name) = query.service() else {
            return ExternalResolution::status(ResponseStatus::Success);
        };

        let zone_path = zone::zone_path(zone);
        let mut records = Vec::new();
        let mut status = ResponseStatus::NameError;

        let services = self.index.services_by_key(&query.namespace, service_name);
        for svc in services
            .iter()
            .filter(|svc| svc.namespace == query.namespace && svc.name == service_name)
        {
            if svc.is_headless() || !query.endpoint().is_empty() {
                let before = records.len();
                self.endpoint_records(svc, &query, &zone_path, &mut records);
                if records.len() > before {
                    status = ResponseStatus::Success;
                }
                continue;
            }

            let (key, target_strip) = match &query.target {
                QueryTarget::PortProtocol { port, protocol, .. } => (
                    format!(
                        "{}/_{}/_{}",
                        service_path(&zone_path, svc),
                        protocol.to_lowercase(),
                        port.to_lowercase()
                    ),
                    2,
                ),
                _ => (service_path(&zone_path, svc), 0),
            };

            for ip in &svc.external_ips {
                for port in &svc.ports {
                    if !port_matches(query.port(), &port.name, port.port)
                        || !protocol_matches(query.protocol(), &port.protocol)
                    {
                        continue;
                    }
                    status = ResponseStatus::Success;
                    records.push(
                        ServiceRecord::new(ip, port.port, self.ttl, key.clone())
                            .with_target_strip(target_strip),
                    );
                }
            }
        }

        debug!(
            zone = %zone,
            name = %relative_name,
            records = records.len(),
            status = status.as_str(),
            "External name resolved"
        );

        ExternalResolution { records, status }
    }

    fn endpoint_records(
        &self,
        svc: &Service,
        query: &ExternalQuery,
        zone_path: &str,
        records: &mut Vec<ServiceRecord>,
    ) {
        let base = service_path(zone_path, svc);
        for endpoints in self
            .index
            .endpoints_by_key(&svc.namespace, &svc.name)
            .iter()
            .filter(|ep| ep.belongs_to(svc))
        {
            for subset in &endpoints.subsets {
                for addr in &subset.addresses {
                    let hostname = addr.derived_hostname(self.endpoint_pod_names);
                    if !query.endpoint().is_empty() && !endpoint_matches(query.endpoint(), &hostname) {
                        continue;
                    }
                    for port in &subset.ports {
                        if !port_matches(query.port(), &port.name, port.port)
                            || !protocol_matches(query.protocol(), &port.protocol)
                        {
                            continue;
                        }
                        records.push(
                            ServiceRecord::new(
                                &addr.ip,
                                port.port,
                                self.ttl,
                                format!("{}/{}", base, hostname),
                            )
                            .with_group(base.clone()),
                        );
                    }
                }
            }
        }
    }

    /// Every record the external zone contains, for zone transfers.
    ///
    /// Headless services (with `headless` set) contribute one record per
    /// endpoint address and port. Other services contribute, per external IP
    /// and port, a plain record and a `_protocol/_port` record for SRV use.
    pub fn external_services(&self, zone: &str, headless: bool) -> Vec<ServiceRecord> {
        let zone_path = zone::zone_path(zone);
        let mut records = Vec::new();

        for svc in self.index.all_services() {
            if !self.namespaces.is_exposed(&svc.namespace) {
                continue;
            }

            let base = service_path(&zone_path, &svc);

            if headless && svc.is_headless() {
                for endpoints in self
                    .index
                    .endpoints_by_key(&svc.namespace, &svc.name)
                    .iter()
                    .filter(|ep| ep.belongs_to(&svc))
                {
                    for subset in &endpoints.subsets {
                        for addr in &subset.addresses {
                            let hostname = addr.derived_hostname(self.endpoint_pod_names);
                            for port in &subset.ports {
                                records.push(
                                    ServiceRecord::new(
                                        &addr.ip,
                                        port.port,
                                        self.ttl,
                                        format!("{}/{}", base, hostname),
                                    )
                                    .with_group(base.clone()),
                                );
                            }
                        }
                    }
                }
                continue;
            }

            for ip in &svc.external_ips {
                for port in &svc.ports {
                    records.push(ServiceRecord::new(ip, port.port, self.ttl, base.clone()));

                    let port_label = if port.name.is_empty() {
                        port.port.to_string()
                    } else {
                        port.name.to_lowercase()
                    };
                    let key = format!(
                        "{}/_{}/_{}",
                        base,
                        port.protocol.to_lowercase(),
                        port_label
                    );
                    records.push(
                        ServiceRecord::new(ip, port.port, self.ttl, key).with_target_strip(2),
                    );
                }
            }
        }

        records
    }

    /// SOA serial of the external zone.
    pub fn serial(&self) -> u32 {
        self.index.modification_counter(true) as u32
    }
}

fn service_path(zone_path: &str, svc: &Service) -> String {
    format!("{}/{}/{}", zone_path, svc.namespace, svc.name)
}
