//! GeoIP 服务模块
//!
//! 提供 IP 地址地理位置查询功能，支持：
//! - MaxMind GeoLite2 本地数据库
//! - CSV IP 段本地数据库
//! - 上游公共服务 (ipinfo.io)，同时负责"查询自己"

mod ipinfo;
mod maxmind;
mod provider;
mod range_db;
mod record;

pub use ipinfo::{IpInfoBody, IpInfoProvider, parse_ipinfo_body};
pub use maxmind::MaxMindProvider;
pub use provider::{GeoIpLookup, GeoIpProvider};
pub use range_db::{CsvRangeRow, RangeDbProvider};
pub use record::{
    Coordinates, ErrorResponse, GeoRecord, LookupResponse, OrUnknown, UNKNOWN, parse_loc,
};
