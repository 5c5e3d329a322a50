use hickory_proto::rr::rdata::{A, AAAA, NS, SOA, SRV};
use hickory_proto::rr::{Name, RData, Record};
use kubezone_domain::{zone, DomainError, ExternalConfig, ServiceRecord};
use rustc_hash::FxHashSet;
use std::net::IpAddr;
use tracing::debug;

const SOA_REFRESH: i32 = 7200;
const SOA_RETRY: i32 = 1800;
const SOA_EXPIRE: i32 = 86400;

/// Turns resolved service records into DNS resource records.
#[derive(Debug, Clone)]
pub struct RecordBuilder {
    ttl: u32,
    apex: String,
}

impl RecordBuilder {
    pub fn new(config: &ExternalConfig) -> Self {
        Self {
            ttl: config.ttl,
            apex: config.apex.clone(),
        }
    }

    pub fn ttl(&self) -> u32 {
        self.ttl
    }

    /// `ns1.<apex>.<zone>`
    pub fn nameserver_name(&self, zone: &str) -> String {
        zone::join(&["ns1", &self.apex], zone)
    }

    /// `hostmaster.<apex>.<zone>`
    pub fn hostmaster_name(&self, zone: &str) -> String {
        zone::join(&["hostmaster", &self.apex], zone)
    }

    /// `<apex>.<zone>`
    pub fn apex_name(&self, zone: &str) -> String {
        zone::join(&[&self.apex], zone)
    }

    /// One A record per distinct IPv4 host, named `owner`.
    pub fn a_records(&self, owner: &Name, records: &[ServiceRecord]) -> Vec<Record> {
        self.address_records(owner, records, |ip| match ip {
            IpAddr::V4(v4) => Some(RData::A(A(v4))),
            IpAddr::V6(_) => None,
        })
    }

    /// One AAAA record per distinct IPv6 host, named `owner`.
    pub fn aaaa_records(&self, owner: &Name, records: &[ServiceRecord]) -> Vec<Record> {
        self.address_records(owner, records, |ip| match ip {
            IpAddr::V6(v6) => Some(RData::AAAA(AAAA(v6))),
            IpAddr::V4(_) => None,
        })
    }

    fn address_records(
        &self,
        owner: &Name,
        records: &[ServiceRecord],
        to_rdata: impl Fn(IpAddr) -> Option<RData>,
    ) -> Vec<Record> {
        let mut seen = FxHashSet::default();
        let mut out = Vec::new();

        for record in records {
            let Some(ip) = record.ip() else {
                debug!(host = %record.host, key = %record.key, "Skipping non-IP host");
                continue;
            };
            let Some(rdata) = to_rdata(ip) else {
                continue;
            };
            if !seen.insert(ip) {
                continue;
            }
            out.push(Record::from_rdata(owner.clone(), record.ttl, rdata));
        }

        out
    }

    /// SRV records for `records`, all owned by `owner`, plus the address
    /// records of their targets.
    ///
    /// Weight is `max(1, 100 / n)` for `n` input records, priority is 0.
    /// SRV records are unique on (target, port); extras on (target, host).
    pub fn srv_records(&self, owner: &Name, records: &[ServiceRecord]) -> (Vec<Record>, Vec<Record>) {
        let mut srv = Vec::new();
        let mut extra = Vec::new();
        if records.is_empty() {
            return (srv, extra);
        }

        let weight = (100 / records.len()).max(1) as u16;
        let mut seen_targets: FxHashSet<(String, u16)> = FxHashSet::default();
        let mut seen_addresses: FxHashSet<(String, IpAddr)> = FxHashSet::default();

        for record in records {
            let Some(ip) = record.ip() else {
                continue;
            };
            let target_str = record.srv_target();
            let target = match Name::from_ascii(&target_str) {
                Ok(name) => name,
                Err(e) => {
                    debug!(target = %target_str, error = %e, "Skipping SRV with invalid target");
                    continue;
                }
            };

            if seen_targets.insert((target_str.clone(), record.port)) {
                srv.push(Record::from_rdata(
                    owner.clone(),
                    record.ttl,
                    RData::SRV(SRV::new(0, weight, record.port, target.clone())),
                ));
            }

            if seen_addresses.insert((target_str, ip)) {
                let rdata = match ip {
                    IpAddr::V4(v4) => RData::A(A(v4)),
                    IpAddr::V6(v6) => RData::AAAA(AAAA(v6)),
                };
                extra.push(Record::from_rdata(target, self.ttl, rdata));
            }
        }

        (srv, extra)
    }

    /// NS record at the zone apex pointing at `ns1.<apex>.<zone>`.
    pub fn ns_record(&self, zone: &str) -> Result<Record, DomainError> {
        let owner = parse_name(zone)?;
        let target = parse_name(&self.nameserver_name(zone))?;
        Ok(Record::from_rdata(owner, self.ttl, RData::NS(NS(target))))
    }

    pub fn soa_record(&self, zone: &str, serial: u32) -> Result<Record, DomainError> {
        let owner = parse_name(zone)?;
        let mname = parse_name(&self.nameserver_name(zone))?;
        let rname = parse_name(&self.hostmaster_name(zone))?;
        let soa = SOA::new(
            mname,
            rname,
            serial,
            SOA_REFRESH,
            SOA_RETRY,
            SOA_EXPIRE,
            self.ttl,
        );
        Ok(Record::from_rdata(owner, self.ttl, RData::SOA(soa)))
    }
}

pub(crate) fn parse_name(name: &str) -> Result<Name, DomainError> {
    Name::from_ascii(name).map_err(|e| DomainError::InvalidDomainName(format!("{name}: {e}")))
}

/// Owner names of SRV records already emitted in one pass.
#[derive(Debug, Default)]
pub struct SrvDedup {
    seen: FxHashSet<Name>,
}

impl SrvDedup {
    pub fn new() -> Self {
        Self::default()
    }

    /// True the first time an owner name is offered.
    pub fn first_seen(&mut self, record: &Record) -> bool {
        self.seen.insert(record.name().to_lowercase())
    }
}
