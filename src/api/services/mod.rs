pub mod ip_lookup;

pub use ip_lookup::{IpLookupService, IpQuery, ip_routes};
