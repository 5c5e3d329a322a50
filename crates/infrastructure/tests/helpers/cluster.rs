use hickory_proto::rr::{RData, Record};
use kubezone_application::use_cases::{
    AnswerExternalQueryUseCase, ResolveExternalUseCase, TransferZoneUseCase,
};
use kubezone_domain::{
    EndpointAddress, EndpointPort, EndpointSubset, Endpoints, ExternalConfig, Service, ServicePort,
};
use kubezone_infrastructure::cluster::{ConfiguredNamespaces, InMemoryClusterIndex};
use kubezone_infrastructure::dns::{ExternalDnsHandler, StaticNameserverAddresses};
use std::sync::Arc;

pub const ZONE: &str = "example.org.";

pub fn external_config() -> ExternalConfig {
    ExternalConfig {
        zones: vec![ZONE.to_string()],
        nameserver_addresses: vec!["10.0.0.53".to_string()],
        ..ExternalConfig::default()
    }
}

pub fn web_service() -> Service {
    Service::new("web", "prod")
        .with_external_ip("203.0.113.10")
        .with_port(ServicePort::new("http", 80, "TCP"))
}

pub fn internal_service() -> Service {
    Service::new("db", "prod").with_port(ServicePort::new("pg", 5432, "TCP"))
}

pub fn headless_service() -> (Service, Endpoints) {
    let svc = Service::new("cache", "prod").headless();
    let eps = Endpoints::new("cache", "prod").with_subset(EndpointSubset {
        addresses: vec![EndpointAddress::new("10.1.0.7").with_hostname("cache-0")],
        ports: vec![EndpointPort::new("redis", 6379, "TCP")],
    });
    (svc, eps)
}

pub fn populated_index() -> Arc<InMemoryClusterIndex> {
    let index = Arc::new(InMemoryClusterIndex::with_initial_counter(100));
    let (cache, cache_eps) = headless_service();
    index.replace(
        vec![web_service(), internal_service(), cache],
        vec![cache_eps],
    );
    index
}

pub fn build_handler(index: Arc<InMemoryClusterIndex>, config: &ExternalConfig) -> ExternalDnsHandler {
    let resolver = Arc::new(ResolveExternalUseCase::new(
        index,
        Arc::new(ConfiguredNamespaces::from_config(config)),
        config,
    ));
    let nameservers = Arc::new(StaticNameserverAddresses::from_config(config).unwrap());
    let answer = Arc::new(AnswerExternalQueryUseCase::new(
        resolver.clone(),
        nameservers.clone(),
        config,
    ));
    let transfer = Arc::new(TransferZoneUseCase::new(resolver, nameservers, config));
    ExternalDnsHandler::new(answer, transfer)
}

pub fn soa_serial(record: &Record) -> Option<u32> {
    match record.data() {
        RData::SOA(soa) => Some(soa.serial()),
        _ => None,
    }
}
