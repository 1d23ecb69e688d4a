//! Self-geolocation command

use tracing::debug;

use super::print_record;
use crate::config::get_config;
use crate::interfaces::cli::CliError;
use crate::services::IpInfoProvider;
use crate::services::geoip::LookupResponse;

pub async fn whoami(json: bool) -> Result<(), CliError> {
    let config = get_config();
    let provider = IpInfoProvider::new(&config.upstream);

    let record = provider.resolve_self().await?;
    debug!("Resolved own address {}", record.ip);

    if json {
        let body = serde_json::to_string_pretty(&LookupResponse::from(record))
            .map_err(|e| CliError::CommandError(format!("Failed to encode JSON: {}", e)))?;
        println!("{}", body);
    } else {
        print_record("Your public IP:", &record);
    }
    Ok(())
}
