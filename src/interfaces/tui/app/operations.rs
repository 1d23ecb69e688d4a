//! 需要等待网络的操作

use tracing::{debug, warn};

use super::App;
use crate::errors::GeoFinderError;
use crate::interfaces::tui::action::Action;
use crate::services::GeoRecord;

impl App {
    /// 执行一个排队的操作；失败时保留原来的记录，只在状态栏提示
    pub async fn perform(&mut self, action: Action) {
        match action {
            Action::FetchSelf => self.fetch_self().await,
            Action::FillOwnIp => self.fill_own_ip().await,
            Action::FetchLookup => self.fetch_lookup().await,
        }

        // FillOwnIp 成功后会紧接着排队 FetchLookup
        if self.pending.is_none() {
            self.loading = false;
        }
    }

    async fn fetch_self(&mut self) {
        match self.upstream.resolve_self().await {
            Ok(record) => {
                debug!("Own location resolved: {}", record.ip);
                self.set_status(format!("Located {}", record.ip));
                self.home.replace(record, self.default_zoom);
            }
            Err(e) => {
                warn!("Failed to resolve own location: {}", e);
                self.set_error(format!("Could not determine your location: {}", e.message()));
            }
        }
    }

    async fn fill_own_ip(&mut self) {
        match self.upstream.fetch_own_ip().await {
            Ok(ip) => {
                // 用户在等待期间已经输入了内容就不覆盖
                if self.lookup_input.is_empty() {
                    self.lookup_input = ip;
                }
                self.submit_lookup();
            }
            Err(e) => {
                warn!("Failed to fetch own IP: {}", e);
                self.set_error(format!("Could not determine your IP: {}", e.message()));
            }
        }
    }

    async fn fetch_lookup(&mut self) {
        let ip = self.lookup_input.trim().to_string();
        if ip.is_empty() {
            return;
        }

        match self.client.lookup(&ip).await {
            Ok(response) => {
                let record = GeoRecord::from(response);
                if record.is_complete() {
                    self.set_status(format!("Found {}", record.place_label()));
                } else {
                    self.set_status(format!("Found {} (no coordinates)", record.ip));
                }
                self.lookup.replace(record, self.default_zoom);
            }
            Err(e) => {
                warn!("Lookup of {} failed: {}", ip, e);
                let msg = match e {
                    GeoFinderError::NotFound(_) => format!("No geolocation data for {}", ip),
                    other => other.message().to_string(),
                };
                self.set_error(msg);
            }
        }
    }
}
