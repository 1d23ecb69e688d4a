//! HTTP API: the local lookup endpoint and its middleware

pub mod middleware;
pub mod services;
