//! Lookup-by-IP command

use colored::Colorize;
use tracing::debug;

use super::print_record;
use crate::client::LookupClient;
use crate::config::get_config;
use crate::interfaces::cli::CliError;
use crate::services::geoip::LookupResponse;
use crate::services::{GeoIpProvider, GeoRecord, IpInfoProvider};

/// 查询一个 IP，未给出时先向上游取本机公网 IP
///
/// 默认走本地 API；`direct` 时在进程内用配置的数据源查询
pub async fn lookup_ip(ip: Option<String>, direct: bool, json: bool) -> Result<(), CliError> {
    let config = get_config();

    let ip = match ip.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()) {
        Some(ip) => ip,
        None => {
            let own = IpInfoProvider::new(&config.upstream).fetch_own_ip().await?;
            if !json {
                println!("{} Using own public IP {}", "ℹ".bold().blue(), own.cyan());
            }
            own
        }
    };

    let response: LookupResponse = if direct {
        let provider = GeoIpProvider::new(&config.geoip, &config.upstream)?;
        debug!("Direct lookup of {} via {}", ip, provider.provider_name());
        provider.lookup(&ip).await?.into()
    } else {
        LookupClient::new(&config.client).lookup(&ip).await?
    };

    if json {
        let body = serde_json::to_string_pretty(&response)
            .map_err(|e| CliError::CommandError(format!("Failed to encode JSON: {}", e)))?;
        println!("{}", body);
    } else {
        print_record("Location of", &GeoRecord::from(response));
    }
    Ok(())
}
