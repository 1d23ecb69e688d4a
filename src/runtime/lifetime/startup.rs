use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::config::StaticConfig;
use crate::services::GeoIpProvider;

/// 服务器启动所需的上下文
pub struct StartupContext {
    pub geoip: Arc<GeoIpProvider>,
    pub bind_address: String,
    pub workers: usize,
}

/// 准备服务器启动：选择 GeoIP 数据源、确定监听地址
///
/// 没有任何可用数据源时直接失败，不启动一个只会返回 500 的服务
pub fn prepare_server_startup(config: &StaticConfig) -> Result<StartupContext> {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    let geoip = GeoIpProvider::new(&config.geoip, &config.upstream)
        .context("Failed to initialize GeoIP provider")?;

    let context = StartupContext {
        geoip: Arc::new(geoip),
        bind_address: format!("{}:{}", config.server.host, config.server.port),
        // 至少 1 个，最多 32 个 worker
        workers: config.server.workers.clamp(1, 32),
    };

    info!(
        "Pre-startup completed in {} ms (provider: {})",
        start_time.elapsed().as_millis(),
        context.geoip.provider_name()
    );

    Ok(context)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_startup_fails_without_any_source() {
        let mut config = StaticConfig::default();
        config.geoip.upstream_fallback = false;
        assert!(prepare_server_startup(&config).is_err());
    }

    #[test]
    fn test_startup_with_range_database() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ranges.csv");
        std::fs::write(
            &path,
            "start,end,country\n192.0.2.0,192.0.2.255,ZZ\n",
        )
        .unwrap();

        let mut config = StaticConfig::default();
        config.geoip.ranges_csv_path = Some(path.to_string_lossy().into_owned());
        config.geoip.upstream_fallback = false;
        config.server.port = 9090;
        config.server.workers = 0;

        let ctx = prepare_server_startup(&config).unwrap();
        assert_eq!(ctx.geoip.provider_name(), "IpRangeCsv");
        assert_eq!(ctx.bind_address, "127.0.0.1:9090");
        assert_eq!(ctx.workers, 1);
    }
}
