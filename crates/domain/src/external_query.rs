//! Parsing of zone-relative query names.
//!
//! Accepted shapes, read from the zone apex outward:
//!
//! ```text
//! namespace
//! service.namespace
//! endpoint.service.namespace
//! _port._protocol.service.namespace
//! ```

/// Outcome of a name resolution, mirrored onto the DNS response code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseStatus {
    Success,
    NameError,
    ServerFailure,
}

impl ResponseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseStatus::Success => "NOERROR",
            ResponseStatus::NameError => "NXDOMAIN",
            ResponseStatus::ServerFailure => "SERVFAIL",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryTarget {
    /// Only the namespace was given.
    Namespace,
    Service {
        service: String,
    },
    Endpoint {
        service: String,
        endpoint: String,
    },
    PortProtocol {
        service: String,
        port: String,
        protocol: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalQuery {
    pub namespace: String,
    pub target: QueryTarget,
}

impl ExternalQuery {
    /// Parse a name relative to the served zone (no zone suffix, trailing dot
    /// optional).
    ///
    /// No labels at all is a `ServerFailure`; more than two labels left of the
    /// service is a `NameError`. Namespace exposure is checked by the caller.
    pub fn parse(relative_name: &str) -> Result<Self, ResponseStatus> {
        let labels: Vec<&str> = relative_name.split('.').filter(|l| !l.is_empty()).collect();

        let Some((namespace, rest)) = labels.split_last() else {
            return Err(ResponseStatus::ServerFailure);
        };

        let Some((service, rest)) = rest.split_last() else {
            return Ok(Self {
                namespace: namespace.to_string(),
                target: QueryTarget::Namespace,
            });
        };

        let service = service.to_string();
        let target = match rest {
            [] => QueryTarget::Service { service },
            [endpoint] => QueryTarget::Endpoint {
                service,
                endpoint: strip_underscore(endpoint).to_string(),
            },
            [port, protocol] => QueryTarget::PortProtocol {
                service,
                port: strip_underscore(port).to_string(),
                protocol: strip_underscore(protocol).to_string(),
            },
            _ => return Err(ResponseStatus::NameError),
        };

        Ok(Self {
            namespace: namespace.to_string(),
            target,
        })
    }

    pub fn service(&self) -> Option<&str> {
        match &self.target {
            QueryTarget::Namespace => None,
            QueryTarget::Service { service }
            | QueryTarget::Endpoint { service, .. }
            | QueryTarget::PortProtocol { service, .. } => Some(service),
        }
    }

    pub fn endpoint(&self) -> &str {
        match &self.target {
            QueryTarget::Endpoint { endpoint, .. } => endpoint,
            _ => "",
        }
    }

    pub fn port(&self) -> &str {
        match &self.target {
            QueryTarget::PortProtocol { port, .. } => port,
            _ => "",
        }
    }

    pub fn protocol(&self) -> &str {
        match &self.target {
            QueryTarget::PortProtocol { protocol, .. } => protocol,
            _ => "",
        }
    }
}

fn strip_underscore(label: &str) -> &str {
    label.strip_prefix('_').unwrap_or(label)
}

fn is_wildcard(value: &str) -> bool {
    value == "*" || value == "any"
}

/// Endpoint hostname match: wildcard or exact, case-sensitive.
pub fn endpoint_matches(requested: &str, hostname: &str) -> bool {
    is_wildcard(requested) || requested == hostname
}

/// Port filter match. Empty and wildcard filters match anything; a symbolic
/// filter compares against the port name, a numeric one also against the
/// port number.
pub fn port_matches(requested: &str, name: &str, number: u16) -> bool {
    if requested.is_empty() || is_wildcard(requested) {
        return true;
    }
    if requested.eq_ignore_ascii_case(name) {
        return true;
    }
    requested.parse::<u16>().is_ok_and(|n| n == number)
}

pub fn protocol_matches(requested: &str, protocol: &str) -> bool {
    requested.is_empty() || is_wildcard(requested) || requested.eq_ignore_ascii_case(protocol)
}
