//! 本地查询 API 客户端

use std::time::Duration;

use tracing::{debug, warn};
use ureq::Agent;

use crate::config::ClientConfig;
use crate::errors::{GeoFinderError, Result};
use crate::services::geoip::{ErrorResponse, LookupResponse};

/// `GET {api_base_url}/api/ip?ip=…` 的客户端
pub struct LookupClient {
    base_url: String,
    agent: Agent,
}

impl LookupClient {
    pub fn new(config: &ClientConfig) -> Self {
        // 4xx/5xx 自己映射成错误类型，不让 ureq 转成 Err
        let agent = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(config.timeout_secs)))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            agent,
        }
    }

    pub fn endpoint(&self, ip: &str) -> String {
        format!("{}/api/ip?ip={}", self.base_url, urlencoding::encode(ip))
    }

    fn fetch_sync(agent: Agent, url: String) -> Result<LookupResponse> {
        let resp = agent.get(&url).call().map_err(|e| {
            warn!("Local API request to \"{}\" failed: {}", url, e);
            GeoFinderError::upstream(format!(
                "Local API unreachable ({}). Is the server running?",
                e
            ))
        })?;

        let status = resp.status().as_u16();
        let body = resp
            .into_body()
            .read_to_string()
            .map_err(|e| GeoFinderError::upstream(format!("Unreadable response: {}", e)))?;

        debug!("Local API answered {} for {}", status, url);
        interpret_response(status, &body)
    }

    /// 查询一个 IP，空字符串由调用方过滤
    pub async fn lookup(&self, ip: &str) -> Result<LookupResponse> {
        let url = self.endpoint(ip);
        let agent = self.agent.clone();

        tokio::task::spawn_blocking(move || Self::fetch_sync(agent, url))
            .await
            .map_err(|e| GeoFinderError::internal(format!("Lookup task failed: {}", e)))?
    }
}

/// 把本地 API 的状态码和响应体映射为结果
///
/// - 200 → 解析响应体
/// - 400 → InvalidInput
/// - 404 → NotFound
/// - 其他 → Upstream
pub(crate) fn interpret_response(status: u16, body: &str) -> Result<LookupResponse> {
    let server_message = || {
        serde_json::from_str::<ErrorResponse>(body)
            .map(|e| e.error)
            .unwrap_or_else(|_| format!("HTTP {}", status))
    };

    match status {
        200 => serde_json::from_str(body)
            .map_err(|e| GeoFinderError::upstream(format!("Unparsable lookup response: {}", e))),
        400 => Err(GeoFinderError::invalid_input(server_message())),
        404 => Err(GeoFinderError::not_found(server_message())),
        _ => Err(GeoFinderError::upstream(format!(
            "Local API error ({}): {}",
            status,
            server_message()
        ))),
    }
}
