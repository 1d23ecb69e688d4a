//! Service layer
//!
//! Geolocation lookups shared between the HTTP API, the CLI and the TUI.

pub mod geoip;

pub use geoip::{GeoIpLookup, GeoIpProvider, GeoRecord, IpInfoProvider};
