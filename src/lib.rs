//! GeoFinder - IP geolocation lookup with a local query API
//!
//! Resolves an IP address (your own, or one you supply) to an approximate
//! location and shows it on a terminal map.
//!
//! # Features
//! - **server**: local lookup API `GET /api/ip` (default)
//! - **cli**: command-line interface
//! - **tui**: terminal user interface with a world map
//!
//! # Architecture
//! - `services::geoip`: lookup capability and its providers (MaxMind, IP range CSV, ipinfo.io)
//! - `api`: HTTP handler and middleware
//! - `client`: HTTP client for the local API
//! - `map`: map view state and slippy-map tile math
//! - `interfaces`: user interfaces (CLI, TUI)
//! - `config`: configuration management
//! - `runtime`: application lifecycle and execution modes
//! - `system`: logging setup

pub mod api;
pub mod cli;
pub mod client;
pub mod config;
pub mod errors;
pub mod interfaces;
pub mod map;
pub mod runtime;
pub mod services;
pub mod system;
pub mod utils;
