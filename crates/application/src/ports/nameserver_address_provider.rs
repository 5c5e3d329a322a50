use hickory_proto::rr::Record;

pub trait NameserverAddressProvider: Send + Sync {
    /// A/AAAA records for the zone's own nameserver. Owner names and TTLs are
    /// placeholders; callers rewrite them.
    fn nameserver_addresses(&self, zone: &str, headless: bool) -> Vec<Record>;
}
