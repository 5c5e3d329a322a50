use crate::ports::NameserverAddressProvider;
use crate::services::record_builder::parse_name;
use crate::services::RecordBuilder;
use crate::use_cases::external::ResolveExternalUseCase;
use hickory_proto::op::ResponseCode;
use hickory_proto::rr::{Name, Record, RecordType};
use kubezone_domain::{zone, DomainError, ExternalConfig, ResponseStatus, Zones};
use std::sync::Arc;
use tracing::{debug, warn};

/// Sections of an authoritative answer for the external zone.
#[derive(Debug, Clone)]
pub struct ExternalAnswer {
    pub response_code: ResponseCode,
    pub answers: Vec<Record>,
    pub authority: Vec<Record>,
    pub additionals: Vec<Record>,
}

impl ExternalAnswer {
    fn new(response_code: ResponseCode) -> Self {
        Self {
            response_code,
            answers: vec![],
            authority: vec![],
            additionals: vec![],
        }
    }

    pub fn refused() -> Self {
        Self::new(ResponseCode::Refused)
    }

    pub fn server_failure() -> Self {
        Self::new(ResponseCode::ServFail)
    }
}

pub struct AnswerExternalQueryUseCase {
    resolver: Arc<ResolveExternalUseCase>,
    nameservers: Arc<dyn NameserverAddressProvider>,
    builder: RecordBuilder,
    zones: Zones,
    headless: bool,
}

impl AnswerExternalQueryUseCase {
    pub fn new(
        resolver: Arc<ResolveExternalUseCase>,
        nameservers: Arc<dyn NameserverAddressProvider>,
        config: &ExternalConfig,
    ) -> Self {
        Self {
            resolver,
            nameservers,
            builder: RecordBuilder::new(config),
            zones: config.served_zones(),
            headless: config.headless,
        }
    }

    pub fn execute(&self, qname: &Name, qtype: RecordType) -> ExternalAnswer {
        let name = zone::normalize(&qname.to_ascii());
        let Some(zone) = self.zones.matches(&name) else {
            debug!(name = %name, "Query outside served zones");
            return ExternalAnswer::refused();
        };

        let result = if name == zone {
            self.answer_apex(zone, qtype)
        } else if zone::is_subdomain(&name, &self.builder.apex_name(zone)) {
            self.answer_sub_apex(qname, &name, zone, qtype)
        } else {
            self.answer_service(qname, &name, zone, qtype)
        };

        result.unwrap_or_else(|e| {
            warn!(name = %name, error = %e, "Failed to build external answer");
            ExternalAnswer::server_failure()
        })
    }

    fn soa(&self, zone: &str) -> Result<Record, DomainError> {
        self.builder.soa_record(zone, self.resolver.serial())
    }

    fn no_data(&self, zone: &str) -> Result<ExternalAnswer, DomainError> {
        let mut answer = ExternalAnswer::new(ResponseCode::NoError);
        answer.authority.push(self.soa(zone)?);
        Ok(answer)
    }

    fn name_error(&self, zone: &str) -> Result<ExternalAnswer, DomainError> {
        let mut answer = ExternalAnswer::new(ResponseCode::NXDomain);
        answer.authority.push(self.soa(zone)?);
        Ok(answer)
    }

    fn answer_apex(&self, zone: &str, qtype: RecordType) -> Result<ExternalAnswer, DomainError> {
        let mut answer = ExternalAnswer::new(ResponseCode::NoError);
        match qtype {
            RecordType::SOA => answer.answers.push(self.soa(zone)?),
            RecordType::NS => {
                answer.answers.push(self.builder.ns_record(zone)?);
                let ns_name = parse_name(&self.builder.nameserver_name(zone))?;
                for mut record in self.nameservers.nameserver_addresses(zone, self.headless) {
                    record.set_name(ns_name.clone());
                    record.set_ttl(self.builder.ttl());
                    answer.additionals.push(record);
                }
            }
            _ => return self.no_data(zone),
        }
        Ok(answer)
    }

    /// Names below `<apex>.<zone>`: only `ns1.<apex>` has addresses.
    fn answer_sub_apex(
        &self,
        qname: &Name,
        name: &str,
        zone: &str,
        qtype: RecordType,
    ) -> Result<ExternalAnswer, DomainError> {
        let relative = zone::trim_zone(name, zone).unwrap_or_default();
        let labels = zone::labels(&relative);

        match labels.as_slice() {
            [_apex] => self.no_data(zone),
            ["ns1", _apex] => {
                let mut answer = ExternalAnswer::new(ResponseCode::NoError);
                for mut record in self.nameservers.nameserver_addresses(zone, self.headless) {
                    if record.record_type() != qtype {
                        continue;
                    }
                    record.set_name(qname.clone());
                    record.set_ttl(self.builder.ttl());
                    answer.answers.push(record);
                }
                if answer.answers.is_empty() {
                    answer.authority.push(self.soa(zone)?);
                }
                Ok(answer)
            }
            _ => self.name_error(zone),
        }
    }

    fn answer_service(
        &self,
        qname: &Name,
        name: &str,
        zone: &str,
        qtype: RecordType,
    ) -> Result<ExternalAnswer, DomainError> {
        let relative = zone::trim_zone(name, zone).unwrap_or_default();
        let resolution = self.resolver.resolve(zone, &relative, self.headless);

        if resolution.records.is_empty() {
            let code = match resolution.status {
                ResponseStatus::Success => ResponseCode::NoError,
                ResponseStatus::NameError => ResponseCode::NXDomain,
                ResponseStatus::ServerFailure => ResponseCode::ServFail,
            };
            let mut answer = ExternalAnswer::new(code);
            answer.authority.push(self.soa(zone)?);
            return Ok(answer);
        }

        let mut answer = ExternalAnswer::new(ResponseCode::NoError);
        match qtype {
            RecordType::A => {
                answer.answers = self.builder.a_records(qname, &resolution.records);
            }
            RecordType::AAAA => {
                answer.answers = self.builder.aaaa_records(qname, &resolution.records);
            }
            RecordType::SRV => {
                let (srv, extra) = self.builder.srv_records(qname, &resolution.records);
                answer.answers = srv;
                answer.additionals = extra;
            }
            _ => {}
        }

        if answer.answers.is_empty() {
            answer.authority.push(self.soa(zone)?);
        }

        Ok(answer)
    }
}
