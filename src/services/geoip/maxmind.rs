//! MaxMind GeoLite2 数据库实现
//!
//! 使用本地 MaxMind GeoLite2-City.mmdb 文件进行 IP 地理位置查询

use std::net::IpAddr;
use std::sync::Arc;

use async_trait::async_trait;
use maxminddb::Reader;
use tracing::trace;

use super::provider::GeoIpLookup;
use super::record::{Coordinates, GeoRecord};
use crate::errors::{GeoFinderError, Result};

/// MaxMind GeoIP Provider
pub struct MaxMindProvider {
    reader: Arc<Reader<Vec<u8>>>,
}

impl MaxMindProvider {
    /// 从文件路径创建 MaxMind Provider
    pub fn new(path: &str) -> std::result::Result<Self, maxminddb::MaxMindDbError> {
        let reader = Reader::open_readfile(path)?;
        Ok(Self {
            reader: Arc::new(reader),
        })
    }
}

#[async_trait]
impl GeoIpLookup for MaxMindProvider {
    async fn lookup(&self, ip: &str) -> Result<GeoRecord> {
        let ip_addr: IpAddr = ip
            .parse()
            .map_err(|_| GeoFinderError::not_found(format!("'{}' is not an IP address", ip)))?;

        // 数据库读取错误属于内部错误，缺记录属于 NotFound
        let result = self.reader.lookup(ip_addr)?;
        let range = result.network().ok().map(|n| n.to_string());
        let Some(city) = result.decode::<maxminddb::geoip2::City>()? else {
            return Err(GeoFinderError::not_found(format!("No MaxMind record for {}", ip)));
        };

        let mut record = GeoRecord::new(ip);
        record.city = city.city.names.english.map(String::from);
        record.region = city
            .subdivisions
            .first()
            .and_then(|s| s.iso_code.or(s.names.english))
            .map(String::from);
        record.country = city.country.iso_code.map(String::from);
        record.timezone = city.location.time_zone.map(String::from);
        record.area = city.location.accuracy_radius.map(u32::from);
        record.range = range;
        record.coordinates = match (city.location.latitude, city.location.longitude) {
            (Some(lat), Some(lon)) => Coordinates::new(lat, lon).ok(),
            _ => None,
        };

        trace!(
            "MaxMind lookup for {}: country={:?}, city={:?}",
            ip, record.country, record.city
        );

        Ok(record)
    }

    fn name(&self) -> &'static str {
        "MaxMind"
    }
}
