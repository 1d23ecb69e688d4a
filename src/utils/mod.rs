pub mod ip;

pub use ip::{IpSource, resolve_lookup_ip, resolve_request_ip};
