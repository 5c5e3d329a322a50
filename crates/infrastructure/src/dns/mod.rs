pub mod nameservers;
pub mod server;

pub use nameservers::StaticNameserverAddresses;
pub use server::ExternalDnsHandler;
