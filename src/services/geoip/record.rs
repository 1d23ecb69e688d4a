//! 地理位置记录
//!
//! `GeoRecord` 是在各组件之间传递的唯一实体；`LookupResponse` 是
//! `/api/ip` 的线上格式，缺失字段一律为字面量 `"Unknown"`。

use std::fmt;

use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

use crate::errors::{GeoFinderError, Result};

/// 缺失字段的统一占位值
pub const UNKNOWN: &str = "Unknown";

/// 经纬度（十进制度）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// 创建坐标，两个分量都必须是有限数
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(GeoFinderError::invalid_input(format!(
                "Coordinates must be finite numbers, got ({}, {})",
                latitude, longitude
            )));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

/// 解析 `"<lat>,<lon>"` 格式的位置字符串
pub fn parse_loc(loc: &str) -> Result<Coordinates> {
    let Some((lat, lon)) = loc.split_once(',') else {
        return Err(GeoFinderError::invalid_input(format!(
            "Location '{}' is not in \"lat,lon\" format",
            loc
        )));
    };

    let parse = |part: &str| -> Result<f64> {
        part.trim().parse::<f64>().map_err(|e| {
            GeoFinderError::invalid_input(format!("Invalid coordinate '{}': {}", part.trim(), e))
        })
    };

    // "1,2,3" 的第二段是 "2,3"，这里会解析失败
    Coordinates::new(parse(lat)?, parse(lon)?)
}

/// 地理位置记录
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeoRecord {
    pub ip: String,
    pub city: Option<String>,
    pub region: Option<String>,
    pub country: Option<String>,
    pub coordinates: Option<Coordinates>,
    pub timezone: Option<String>,
    /// 上游 `org` 字段（ASN + 组织名）
    pub organization: Option<String>,
    pub postal: Option<String>,
    pub hostname: Option<String>,
    /// 命中的网段，仅本地数据库提供
    pub range: Option<String>,
    /// 精度半径（公里），仅本地数据库提供
    pub area: Option<u32>,
}

impl GeoRecord {
    pub fn new(ip: impl Into<String>) -> Self {
        Self {
            ip: ip.into(),
            ..Default::default()
        }
    }

    /// 有坐标才算完整，才能显示地图
    pub fn is_complete(&self) -> bool {
        self.coordinates.is_some()
    }

    pub fn city_or_unknown(&self) -> &str {
        self.city.as_deref().unwrap_or(UNKNOWN)
    }

    pub fn region_or_unknown(&self) -> &str {
        self.region.as_deref().unwrap_or(UNKNOWN)
    }

    pub fn country_or_unknown(&self) -> &str {
        self.country.as_deref().unwrap_or(UNKNOWN)
    }

    pub fn timezone_or_unknown(&self) -> &str {
        self.timezone.as_deref().unwrap_or(UNKNOWN)
    }

    /// "city, region, country"
    pub fn place_label(&self) -> String {
        format!(
            "{}, {}, {}",
            self.city_or_unknown(),
            self.region_or_unknown(),
            self.country_or_unknown()
        )
    }
}

/// 要么是实际值，要么是 `"Unknown"`
///
/// 序列化为 JSON 时：`Value(x)` → `x`，`Unknown` → `"Unknown"`
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum OrUnknown<T> {
    Value(T),
    #[default]
    Unknown,
}

impl<T> OrUnknown<T> {
    pub fn value(&self) -> Option<&T> {
        match self {
            OrUnknown::Value(v) => Some(v),
            OrUnknown::Unknown => None,
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            OrUnknown::Value(v) => Some(v),
            OrUnknown::Unknown => None,
        }
    }
}

impl<T> From<Option<T>> for OrUnknown<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => OrUnknown::Value(v),
            None => OrUnknown::Unknown,
        }
    }
}

impl<T: fmt::Display> fmt::Display for OrUnknown<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrUnknown::Value(v) => write!(f, "{}", v),
            OrUnknown::Unknown => f.write_str(UNKNOWN),
        }
    }
}

impl<T: Serialize> Serialize for OrUnknown<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            OrUnknown::Value(v) => v.serialize(serializer),
            OrUnknown::Unknown => serializer.serialize_str(UNKNOWN),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for OrUnknown<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr<T> {
            Value(T),
            Text(String),
        }

        match Repr::<T>::deserialize(deserializer)? {
            Repr::Value(v) => Ok(OrUnknown::Value(v)),
            Repr::Text(s) if s == UNKNOWN => Ok(OrUnknown::Unknown),
            Repr::Text(s) => Err(de::Error::custom(format!(
                "expected a value or \"{}\", got \"{}\"",
                UNKNOWN, s
            ))),
        }
    }
}

/// `/api/ip` 成功响应体
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookupResponse {
    pub ip: String,
    pub city: String,
    pub region: String,
    pub country: String,
    pub latitude: OrUnknown<f64>,
    pub longitude: OrUnknown<f64>,
    pub timezone: String,
    pub range: String,
    pub area: OrUnknown<u32>,
}

fn text_or_unknown(value: Option<String>) -> String {
    value
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| UNKNOWN.to_string())
}

fn known_text(value: String) -> Option<String> {
    (value != UNKNOWN && !value.trim().is_empty()).then_some(value)
}

impl From<GeoRecord> for LookupResponse {
    fn from(record: GeoRecord) -> Self {
        let (latitude, longitude) = match record.coordinates {
            Some(c) => (OrUnknown::Value(c.latitude), OrUnknown::Value(c.longitude)),
            None => (OrUnknown::Unknown, OrUnknown::Unknown),
        };

        Self {
            ip: record.ip,
            city: text_or_unknown(record.city),
            region: text_or_unknown(record.region),
            country: text_or_unknown(record.country),
            latitude,
            longitude,
            timezone: text_or_unknown(record.timezone),
            range: text_or_unknown(record.range),
            area: record.area.into(),
        }
    }
}

impl From<LookupResponse> for GeoRecord {
    fn from(resp: LookupResponse) -> Self {
        // 只有两个分量都已知且有限时才有坐标
        let coordinates = match (resp.latitude, resp.longitude) {
            (OrUnknown::Value(lat), OrUnknown::Value(lon)) => Coordinates::new(lat, lon).ok(),
            _ => None,
        };

        Self {
            ip: resp.ip,
            city: known_text(resp.city),
            region: known_text(resp.region),
            country: known_text(resp.country),
            coordinates,
            timezone: known_text(resp.timezone),
            organization: None,
            postal: None,
            hostname: None,
            range: known_text(resp.range),
            area: resp.area.into_option(),
        }
    }
}

/// 错误响应体 `{ "error": "..." }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
