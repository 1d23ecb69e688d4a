//! GeoIP Provider 抽象层
//!
//! 统一的 GeoIP 查询接口，根据配置自动选择实现：
//! 1. 配置了 maxminddb_path 且可读 → MaxMindProvider
//! 2. 配置了 ranges_csv_path 且可读 → RangeDbProvider
//! 3. 都不可用且允许回退 → IpInfoProvider（上游服务）

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use super::ipinfo::IpInfoProvider;
use super::maxmind::MaxMindProvider;
use super::range_db::RangeDbProvider;
use super::record::GeoRecord;
use crate::config::{GeoIpConfig, UpstreamConfig};
use crate::errors::{GeoFinderError, Result};

/// GeoIP 查询 trait
///
/// 查不到时返回 `GeoFinderError::NotFound`，不返回半成品记录。
#[async_trait]
pub trait GeoIpLookup: Send + Sync {
    /// 查询 IP 地址的地理位置
    async fn lookup(&self, ip: &str) -> Result<GeoRecord>;

    /// 获取 provider 名称（用于日志）
    fn name(&self) -> &'static str;
}

/// 统一 GeoIP Provider
///
/// 启动时根据配置选择实现，之后只读
pub struct GeoIpProvider {
    inner: Arc<dyn GeoIpLookup>,
}

impl GeoIpProvider {
    /// 根据配置初始化
    pub fn new(geoip: &GeoIpConfig, upstream: &UpstreamConfig) -> Result<Self> {
        if let Some(ref path) = geoip.maxminddb_path {
            match MaxMindProvider::new(path) {
                Ok(provider) => {
                    info!("GeoIP: Using MaxMind database at {}", path);
                    return Ok(Self::from_lookup(Arc::new(provider)));
                }
                Err(e) => warn!("GeoIP: Failed to load MaxMind database at {}: {}", path, e),
            }
        }

        if let Some(ref path) = geoip.ranges_csv_path {
            match RangeDbProvider::from_path(path) {
                Ok(provider) => {
                    info!(
                        "GeoIP: Using IP range database at {} ({} ranges)",
                        path,
                        provider.len()
                    );
                    return Ok(Self::from_lookup(Arc::new(provider)));
                }
                Err(e) => warn!("GeoIP: Failed to load IP range database at {}: {}", path, e),
            }
        }

        if geoip.upstream_fallback {
            debug!("GeoIP: No local database available, falling back to upstream service");
            return Ok(Self::from_lookup(Arc::new(IpInfoProvider::new(upstream))));
        }

        Err(GeoFinderError::config(
            "No usable GeoIP database configured (set geoip.maxminddb_path or geoip.ranges_csv_path)",
        ))
    }

    /// 直接包装一个实现（测试或自定义数据源）
    pub fn from_lookup(inner: Arc<dyn GeoIpLookup>) -> Self {
        info!("GeoIP: Initialized with {} provider", inner.name());
        Self { inner }
    }

    /// 查询 IP 地址的地理位置
    pub async fn lookup(&self, ip: &str) -> Result<GeoRecord> {
        self.inner.lookup(ip).await
    }

    /// 获取当前使用的 provider 名称
    pub fn provider_name(&self) -> &'static str {
        self.inner.name()
    }
}

impl Clone for GeoIpProvider {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}
