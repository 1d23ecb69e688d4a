//! IP 段数据库实现
//!
//! 从 CSV 文件加载 "IP 段 → 位置" 数据，启动时一次性读入内存并排序，
//! 查询时二分查找。加载后只读。
//!
//! CSV 列：`start,end,country,region,city,latitude,longitude,timezone,area`

use std::fs::File;
use std::io::{BufReader, Read};
use std::net::IpAddr;
use std::path::Path;

use async_trait::async_trait;
use csv::ReaderBuilder;
use serde::Deserialize;
use tracing::{trace, warn};

use super::provider::GeoIpLookup;
use super::record::{Coordinates, GeoRecord};
use crate::errors::{GeoFinderError, Result};

/// CSV 行数据结构
#[derive(Debug, Clone, Deserialize)]
pub struct CsvRangeRow {
    pub start: String,
    pub end: String,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub area: Option<u32>,
}

/// 内存中的一条 IP 段
#[derive(Debug, Clone)]
struct IpRange {
    start: u128,
    end: u128,
    label: String,
    country: Option<String>,
    region: Option<String>,
    city: Option<String>,
    coordinates: Option<Coordinates>,
    timezone: Option<String>,
    area: Option<u32>,
}

/// IPv4 统一映射到 `::ffff:a.b.c.d`，两种地址族共用一个有序表
fn ip_key(ip: IpAddr) -> u128 {
    match ip {
        IpAddr::V4(v4) => u128::from(v4.to_ipv6_mapped()),
        IpAddr::V6(v6) => u128::from(v6),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

impl TryFrom<CsvRangeRow> for IpRange {
    type Error = GeoFinderError;

    fn try_from(row: CsvRangeRow) -> Result<Self> {
        let parse = |s: &str| -> Result<IpAddr> {
            s.trim().parse::<IpAddr>().map_err(|e| {
                GeoFinderError::database(format!("Invalid IP '{}' in range database: {}", s, e))
            })
        };

        let start = parse(&row.start)?;
        let end = parse(&row.end)?;
        if start.is_ipv4() != end.is_ipv4() {
            return Err(GeoFinderError::database(format!(
                "Range {}-{} mixes IPv4 and IPv6",
                start, end
            )));
        }

        let (start_key, end_key) = (ip_key(start), ip_key(end));
        if start_key > end_key {
            return Err(GeoFinderError::database(format!(
                "Range start {} is after end {}",
                start, end
            )));
        }

        let coordinates = match (row.latitude, row.longitude) {
            (Some(lat), Some(lon)) => Some(Coordinates::new(lat, lon)?),
            _ => None,
        };

        Ok(Self {
            start: start_key,
            end: end_key,
            label: format!("{}-{}", start, end),
            country: non_empty(row.country),
            region: non_empty(row.region),
            city: non_empty(row.city),
            coordinates,
            timezone: non_empty(row.timezone),
            area: row.area,
        })
    }
}

/// IP 段数据库 Provider
pub struct RangeDbProvider {
    ranges: Vec<IpRange>,
    /// `max_end[i]` 是 `ranges[..=i]` 中最大的 `end`，嵌套段查询时用来提前停止回溯
    max_end: Vec<u128>,
}

impl RangeDbProvider {
    /// 从 CSV 文件加载
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref()).map_err(|e| {
            GeoFinderError::file_operation(format!(
                "Failed to open {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Self::from_reader(BufReader::new(file))
    }

    /// 从任意 CSV 数据源加载
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let mut ranges = Vec::new();
        for (idx, row) in csv_reader.deserialize::<CsvRangeRow>().enumerate() {
            // 行号从 2 开始（第 1 行是表头）
            let row = row.map_err(|e| {
                GeoFinderError::database(format!("Range database row {}: {}", idx + 2, e))
            })?;
            ranges.push(IpRange::try_from(row)?);
        }

        // 起点相同时宽的在前，回溯时先遇到窄的
        ranges.sort_by_key(|r| (r.start, std::cmp::Reverse(r.end)));

        for pair in ranges.windows(2) {
            if pair[1].start <= pair[0].end {
                warn!(
                    "IP range database has overlapping ranges {} and {}; the narrower match wins",
                    pair[0].label, pair[1].label
                );
            }
        }

        let max_end = ranges
            .iter()
            .scan(0u128, |acc, r| {
                *acc = (*acc).max(r.end);
                Some(*acc)
            })
            .collect();

        Ok(Self { ranges, max_end })
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// 同步查询，返回命中的记录
    pub fn find(&self, ip: IpAddr) -> Option<GeoRecord> {
        let key = ip_key(ip);
        // 从最后一个 start <= key 的段往前找第一个包含 key 的段；
        // 前面的段都不可能覆盖 key 时停止
        let idx = self.ranges.partition_point(|r| r.start <= key);
        let range = (0..idx)
            .rev()
            .take_while(|&i| self.max_end[i] >= key)
            .map(|i| &self.ranges[i])
            .find(|r| key <= r.end)?;

        let mut record = GeoRecord::new(ip.to_string());
        record.country = range.country.clone();
        record.region = range.region.clone();
        record.city = range.city.clone();
        record.coordinates = range.coordinates;
        record.timezone = range.timezone.clone();
        record.range = Some(range.label.clone());
        record.area = range.area;
        Some(record)
    }
}

#[async_trait]
impl GeoIpLookup for RangeDbProvider {
    async fn lookup(&self, ip: &str) -> Result<GeoRecord> {
        let ip_addr: IpAddr = ip
            .parse()
            .map_err(|_| GeoFinderError::not_found(format!("'{}' is not an IP address", ip)))?;

        let mut record = self
            .find(ip_addr)
            .ok_or_else(|| GeoFinderError::not_found(format!("No range contains {}", ip)))?;
        // 保留调用方给出的原始写法
        record.ip = ip.to_string();

        trace!(
            "Range lookup for {}: country={:?}, city={:?}",
            ip, record.country, record.city
        );
        Ok(record)
    }

    fn name(&self) -> &'static str {
        "IpRangeCsv"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
start,end,country,region,city,latitude,longitude,timezone,area
8.8.8.0,8.8.8.255,US,CA,Mountain View,37.4056,-122.0775,America/Los_Angeles,
1.1.1.0,1.1.1.255,AU,,,-33.494,143.2104,Australia/Sydney,1000
2001:4860::,2001:4860:ffff:ffff:ffff:ffff:ffff:ffff,US,,,,,,
";

    #[test]
    fn test_load_and_sort() {
        let db = RangeDbProvider::from_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(db.len(), 3);
        assert!(!db.is_empty());
    }

    #[test]
    fn test_find_hits_and_misses() {
        let db = RangeDbProvider::from_reader(SAMPLE.as_bytes()).unwrap();

        let hit = db.find("8.8.8.8".parse().unwrap()).unwrap();
        assert_eq!(hit.city.as_deref(), Some("Mountain View"));
        assert_eq!(hit.range.as_deref(), Some("8.8.8.0-8.8.8.255"));
        assert!(hit.area.is_none());

        let edge = db.find("1.1.1.255".parse().unwrap()).unwrap();
        assert_eq!(edge.country.as_deref(), Some("AU"));
        assert!(edge.city.is_none());
        assert_eq!(edge.area, Some(1000));

        assert!(db.find("8.8.9.0".parse().unwrap()).is_none());
        assert!(db.find("0.0.0.1".parse().unwrap()).is_none());
    }

    #[test]
    fn test_find_ipv6() {
        let db = RangeDbProvider::from_reader(SAMPLE.as_bytes()).unwrap();
        let hit = db.find("2001:4860:4860::8888".parse().unwrap()).unwrap();
        assert_eq!(hit.country.as_deref(), Some("US"));
        assert!(hit.coordinates.is_none());

        assert!(db.find("2001:db8::1".parse().unwrap()).is_none());
    }

    #[test]
    fn test_rejects_bad_rows() {
        let bad_ip = "start,end\nnot-an-ip,1.2.3.4\n";
        assert!(RangeDbProvider::from_reader(bad_ip.as_bytes()).is_err());

        let reversed = "start,end\n1.2.3.4,1.2.3.0\n";
        assert!(RangeDbProvider::from_reader(reversed.as_bytes()).is_err());

        let mixed = "start,end\n1.2.3.4,::1\n";
        assert!(RangeDbProvider::from_reader(mixed.as_bytes()).is_err());
    }

    #[test]
    fn test_nested_ranges() {
        let nested = "\
start,end,country,region,city,latitude,longitude,timezone,area
10.0.0.0,10.0.0.255,AA,,,,,,
10.0.0.10,10.0.0.20,BB,,,,,,
10.0.0.30,10.0.0.40,CC,,,,,,
10.0.0.30,10.0.0.35,EE,,,,,,
10.0.1.0,10.0.1.255,DD,,,,,,
";
        let db = RangeDbProvider::from_reader(nested.as_bytes()).unwrap();

        // 内层段优先
        let inner = db.find("10.0.0.15".parse().unwrap()).unwrap();
        assert_eq!(inner.country.as_deref(), Some("BB"));
        let same_start = db.find("10.0.0.32".parse().unwrap()).unwrap();
        assert_eq!(same_start.country.as_deref(), Some("EE"));
        let wider = db.find("10.0.0.38".parse().unwrap()).unwrap();
        assert_eq!(wider.country.as_deref(), Some("CC"));

        // 内层段之后、外层段之内仍然命中外层段
        for ip in ["10.0.0.25", "10.0.0.100", "10.0.0.255", "10.0.0.0"] {
            let outer = db.find(ip.parse().unwrap()).unwrap();
            assert_eq!(outer.country.as_deref(), Some("AA"), "{}", ip);
            assert_eq!(outer.range.as_deref(), Some("10.0.0.0-10.0.0.255"));
        }

        assert_eq!(
            db.find("10.0.1.7".parse().unwrap()).unwrap().country.as_deref(),
            Some("DD")
        );
        assert!(db.find("10.0.2.0".parse().unwrap()).is_none());
    }

    #[tokio::test]
    async fn test_lookup_not_found_for_garbage() {
        let db = RangeDbProvider::from_reader(SAMPLE.as_bytes()).unwrap();
        let err = db.lookup("not-an-ip").await.unwrap_err();
        assert!(matches!(err, GeoFinderError::NotFound(_)));
    }
}
