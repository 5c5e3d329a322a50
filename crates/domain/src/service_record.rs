use crate::zone;
use std::net::IpAddr;

/// A resolved (host, port) pair together with its position in the zone.
///
/// `key` is a slash-delimited path (`/kubezone/<zone labels reversed>/<ns>/<svc>[/...]`)
/// whose reversed segments give the owner name. A non-zero `target_strip`
/// tells SRV building to drop that many leading labels from the owner name to
/// get the target. `group` is the base service path shared by endpoint records
/// of one service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceRecord {
    pub host: String,
    pub port: u16,
    pub ttl: u32,
    pub key: String,
    pub target_strip: usize,
    pub group: String,
}

impl ServiceRecord {
    pub fn new(host: &str, port: u16, ttl: u32, key: String) -> Self {
        Self {
            host: host.to_string(),
            port,
            ttl,
            key,
            target_strip: 0,
            group: String::new(),
        }
    }

    pub fn with_target_strip(mut self, target_strip: usize) -> Self {
        self.target_strip = target_strip;
        self
    }

    pub fn with_group(mut self, group: String) -> Self {
        self.group = group;
        self
    }

    pub fn domain(&self) -> String {
        zone::key_to_domain(&self.key)
    }

    /// Name an SRV record for this entry points at.
    pub fn srv_target(&self) -> String {
        zone::strip_labels(&self.domain(), self.target_strip)
    }

    pub fn ip(&self) -> Option<IpAddr> {
        self.host.parse().ok()
    }
}
