//! 上游 IP 信息服务实现（ipinfo.io）
//!
//! - `resolve_self()`：不带参数查询 `/json`，得到调用方自己的公网 IP 和位置
//! - `fetch_own_ip()`：同一个请求，只取 `ip`
//! - `lookup(ip)`：查询 `/{ip}/json`
//!
//! 每次调用只发一次请求，不重试、不缓存。

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{trace, warn};
use ureq::Agent;

use super::provider::GeoIpLookup;
use super::record::{Coordinates, GeoRecord, parse_loc};
use crate::config::UpstreamConfig;
use crate::errors::{GeoFinderError, Result};

/// ipinfo.io 响应体
///
/// 除 `ip` 外所有字段都可能缺失（例如私有地址只返回 `bogon`）
#[derive(Debug, Clone, Deserialize)]
pub struct IpInfoBody {
    pub ip: String,
    #[serde(default)]
    pub hostname: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub loc: Option<String>,
    #[serde(default)]
    pub org: Option<String>,
    #[serde(default)]
    pub postal: Option<String>,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub bogon: bool,
}

impl IpInfoBody {
    fn check_bogon(&self) -> Result<()> {
        if self.bogon {
            return Err(GeoFinderError::not_found(format!(
                "{} is a bogon address",
                self.ip
            )));
        }
        Ok(())
    }

    /// 转换为完整记录，`loc` 缺失或无法解析视为失败（自身定位用）
    pub fn into_record(self) -> Result<GeoRecord> {
        self.check_bogon()?;

        let loc = self
            .loc
            .as_deref()
            .ok_or_else(|| GeoFinderError::upstream(format!("No location data for {}", self.ip)))?;
        let coordinates = parse_loc(loc).map_err(|e| {
            GeoFinderError::upstream(format!("Bad location '{}' for {}: {}", loc, self.ip, e))
        })?;

        Ok(self.build(Some(coordinates)))
    }

    /// 转换为查询结果，没有可用坐标时保留其余字段（按 IP 查询用）
    pub fn into_lookup_record(self) -> Result<GeoRecord> {
        self.check_bogon()?;

        let coordinates = match self.loc.as_deref() {
            Some(loc) => match parse_loc(loc) {
                Ok(coordinates) => Some(coordinates),
                Err(e) => {
                    warn!("Ignoring bad location '{}' for {}: {}", loc, self.ip, e);
                    None
                }
            },
            None => None,
        };

        Ok(self.build(coordinates))
    }

    fn build(self, coordinates: Option<Coordinates>) -> GeoRecord {
        GeoRecord {
            ip: self.ip,
            city: self.city,
            region: self.region,
            country: self.country,
            coordinates,
            timezone: self.timezone,
            organization: self.org,
            postal: self.postal,
            hostname: self.hostname,
            range: None,
            area: None,
        }
    }
}

/// 解析上游响应体
pub fn parse_ipinfo_body(body: &str) -> Result<IpInfoBody> {
    serde_json::from_str(body)
        .map_err(|e| GeoFinderError::upstream(format!("Unparsable IP info response: {}", e)))
}

/// 去掉 URL 的查询串
fn redact_query(url: &str) -> &str {
    url.split_once('?').map_or(url, |(path, _)| path)
}

/// 上游 IP 信息 Provider
pub struct IpInfoProvider {
    base_url: String,
    token: Option<String>,
    agent: Agent,
}

impl IpInfoProvider {
    pub fn new(config: &UpstreamConfig) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(config.timeout_secs)))
            .build()
            .into();

        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone().filter(|t| !t.is_empty()),
            agent,
        }
    }

    /// 拼接请求地址，`ip` 为 `None` 时查询调用方自己
    pub fn endpoint(&self, ip: Option<&str>) -> String {
        let mut url = match ip {
            Some(ip) => format!("{}/{}/json", self.base_url, urlencoding::encode(ip)),
            None => format!("{}/json", self.base_url),
        };
        if let Some(ref token) = self.token {
            url.push_str("?token=");
            url.push_str(&urlencoding::encode(token));
        }
        url
    }

    /// 同步请求（在 spawn_blocking 中调用）
    fn fetch_sync(agent: Agent, url: String) -> Result<IpInfoBody> {
        // 日志里不带查询串，避免泄露 token
        let target = redact_query(&url);

        // 非 2xx 状态由 ureq 转成 Err
        let resp = agent.get(&url).call().map_err(|e| {
            warn!("IP info request to \"{}\" failed: {}", target, e);
            GeoFinderError::upstream(format!("Request failed: {}", e))
        })?;

        let body = resp.into_body().read_to_string().map_err(|e| {
            warn!("IP info response from \"{}\" unreadable: {}", target, e);
            GeoFinderError::upstream(format!("Unreadable response: {}", e))
        })?;

        parse_ipinfo_body(&body)
    }

    async fn fetch(&self, ip: Option<&str>) -> Result<IpInfoBody> {
        let url = self.endpoint(ip);
        let agent = self.agent.clone();
        trace!("Fetching IP info from {}", redact_query(&url));

        tokio::task::spawn_blocking(move || Self::fetch_sync(agent, url))
            .await
            .map_err(|e| GeoFinderError::internal(format!("IP info task failed: {}", e)))?
    }

    /// 查询调用方自己的公网 IP 和位置
    pub async fn resolve_self(&self) -> Result<GeoRecord> {
        self.fetch(None).await?.into_record()
    }

    /// 只取调用方自己的公网 IP，坐标丢弃
    pub async fn fetch_own_ip(&self) -> Result<String> {
        Ok(self.fetch(None).await?.ip)
    }
}

#[async_trait]
impl GeoIpLookup for IpInfoProvider {
    async fn lookup(&self, ip: &str) -> Result<GeoRecord> {
        if ip.parse::<std::net::IpAddr>().is_err() {
            return Err(GeoFinderError::not_found(format!(
                "'{}' is not an IP address",
                ip
            )));
        }
        self.fetch(Some(ip)).await?.into_lookup_record()
    }

    fn name(&self) -> &'static str {
        "IpInfo"
    }
}
