use hickory_proto::rr::rdata::{A, AAAA};
use hickory_proto::rr::{Name, RData, Record};
use kubezone_application::ports::NameserverAddressProvider;
use kubezone_domain::{DomainError, ExternalConfig};
use std::net::IpAddr;

/// Nameserver addresses taken from configuration.
#[derive(Debug, Clone, Default)]
pub struct StaticNameserverAddresses {
    addresses: Vec<IpAddr>,
}

impl StaticNameserverAddresses {
    pub fn new(addresses: Vec<IpAddr>) -> Self {
        Self { addresses }
    }

    pub fn from_config(config: &ExternalConfig) -> Result<Self, DomainError> {
        let addresses = config
            .nameserver_addresses
            .iter()
            .map(|addr| {
                addr.parse::<IpAddr>()
                    .map_err(|_| DomainError::InvalidIpAddress(addr.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(addresses))
    }
}

impl NameserverAddressProvider for StaticNameserverAddresses {
    fn nameserver_addresses(&self, _zone: &str, _headless: bool) -> Vec<Record> {
        self.addresses
            .iter()
            .map(|ip| {
                let rdata = match ip {
                    IpAddr::V4(v4) => RData::A(A(*v4)),
                    IpAddr::V6(v6) => RData::AAAA(AAAA(*v6)),
                };
                Record::from_rdata(Name::root(), 0, rdata)
            })
            .collect()
    }
}
