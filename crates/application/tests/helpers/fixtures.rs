use super::mock_ports::{MockClusterIndex, MockNameserverAddresses, MockNamespaceFilter};
use hickory_proto::rr::{Name, RData, Record};
use kubezone_application::use_cases::{
    AnswerExternalQueryUseCase, ResolveExternalUseCase, TransferZoneUseCase,
};
use kubezone_domain::{
    EndpointAddress, EndpointPort, EndpointSubset, Endpoints, ExternalConfig, Service, ServicePort,
};
use std::sync::Arc;

pub const ZONE: &str = "example.org.";

pub fn external_config() -> ExternalConfig {
    ExternalConfig {
        zones: vec![ZONE.to_string()],
        ..ExternalConfig::default()
    }
}

pub fn headless_config() -> ExternalConfig {
    ExternalConfig {
        headless: true,
        ..external_config()
    }
}

/// `svc1.testns` with one external IP and an http port.
pub fn external_service() -> Service {
    Service::new("svc1", "testns")
        .with_external_ip("1.2.3.4")
        .with_port(ServicePort::new("http", 80, "TCP"))
}

/// `svc6.testns` with an IPv6 external IP.
pub fn external_v6_service() -> Service {
    Service::new("svc6", "testns")
        .with_external_ip("1:2::5")
        .with_port(ServicePort::new("http", 80, "TCP"))
}

/// `hdls1.testns` with two named endpoints on port 80.
pub fn headless_service() -> (Service, Endpoints) {
    let svc = Service::new("hdls1", "testns").headless();
    let eps = Endpoints::new("hdls1", "testns").with_subset(EndpointSubset {
        addresses: vec![
            EndpointAddress::new("1.2.3.4").with_hostname("endpoint-svc-0"),
            EndpointAddress::new("1.2.3.5").with_hostname("endpoint-svc-1"),
        ],
        ports: vec![EndpointPort::new("http", 80, "TCP")],
    });
    (svc, eps)
}

pub fn default_index() -> MockClusterIndex {
    let (hdls, eps) = headless_service();
    MockClusterIndex::new()
        .with_services(vec![external_service(), external_v6_service(), hdls])
        .with_endpoints(vec![eps])
}

pub fn resolver_for(index: MockClusterIndex, config: &ExternalConfig) -> Arc<ResolveExternalUseCase> {
    Arc::new(ResolveExternalUseCase::new(
        Arc::new(index),
        Arc::new(MockNamespaceFilter::all()),
        config,
    ))
}

pub fn answer_use_case(
    index: MockClusterIndex,
    config: &ExternalConfig,
) -> AnswerExternalQueryUseCase {
    AnswerExternalQueryUseCase::new(
        resolver_for(index, config),
        Arc::new(MockNameserverAddresses::new(&["10.0.0.53", "fd00::53"])),
        config,
    )
}

pub fn transfer_use_case(index: MockClusterIndex, config: &ExternalConfig) -> TransferZoneUseCase {
    TransferZoneUseCase::new(
        resolver_for(index, config),
        Arc::new(MockNameserverAddresses::new(&["10.0.0.53"])),
        config,
    )
}

pub fn name(s: &str) -> Name {
    Name::from_ascii(s).unwrap()
}

pub fn owner_of(record: &Record) -> String {
    record.name().to_ascii()
}

pub fn srv_parts(record: &Record) -> (u16, u16, u16, String) {
    match record.data() {
        RData::SRV(srv) => (
            srv.priority(),
            srv.weight(),
            srv.port(),
            srv.target().to_ascii(),
        ),
        other => panic!("expected SRV, got {other:?}"),
    }
}

pub fn soa_serial(record: &Record) -> u32 {
    match record.data() {
        RData::SOA(soa) => soa.serial(),
        other => panic!("expected SOA, got {other:?}"),
    }
}
