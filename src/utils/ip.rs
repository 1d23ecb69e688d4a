//! IP 地址处理工具
//!
//! 本地查询接口按固定优先级确定要查询的 IP：
//! 1. `ip` 查询参数
//! 2. `X-Forwarded-For` 的第一个地址
//! 3. 连接的对端地址
//!
//! 取第一个非空候选。

use std::fmt;
use std::net::SocketAddr;

use actix_web::HttpRequest;
use actix_web::http::header::HeaderMap;

/// 查询 IP 的来源
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IpSource {
    Query,
    ForwardedFor,
    Peer,
}

impl fmt::Display for IpSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IpSource::Query => write!(f, "query"),
            IpSource::ForwardedFor => write!(f, "x-forwarded-for"),
            IpSource::Peer => write!(f, "peer"),
        }
    }
}

/// 从 HeaderMap 提取 X-Forwarded-For 的第一个地址（原始客户端）
pub fn first_forwarded_for(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.split(',').next())
        .map(|s| s.trim().to_string())
}

/// 按优先级返回第一个非空候选
pub fn resolve_lookup_ip(
    query_ip: Option<&str>,
    headers: &HeaderMap,
    peer: Option<SocketAddr>,
) -> Option<(String, IpSource)> {
    let candidates = [
        (IpSource::Query, query_ip.map(str::to_string)),
        (IpSource::ForwardedFor, first_forwarded_for(headers)),
        // 双栈监听时 IPv4 连接会表现为 ::ffff:a.b.c.d
        (IpSource::Peer, peer.map(|addr| addr.ip().to_canonical().to_string())),
    ];

    candidates.into_iter().find_map(|(source, candidate)| {
        candidate
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(|s| (s, source))
    })
}

/// 从 HttpRequest 确定要查询的 IP
pub fn resolve_request_ip(req: &HttpRequest, query_ip: Option<&str>) -> Option<(String, IpSource)> {
    resolve_lookup_ip(query_ip, req.headers(), req.peer_addr())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::header::{HeaderName, HeaderValue};

    fn headers_with_xff(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_static("x-forwarded-for"),
            HeaderValue::from_str(value).unwrap(),
        );
        headers
    }

    fn peer() -> Option<SocketAddr> {
        Some("192.0.2.10:54321".parse().unwrap())
    }

    #[test]
    fn test_query_wins() {
        let headers = headers_with_xff("203.0.113.1");
        let resolved = resolve_lookup_ip(Some("8.8.8.8"), &headers, peer());
        assert_eq!(resolved, Some(("8.8.8.8".to_string(), IpSource::Query)));
    }

    #[test]
    fn test_forwarded_for_first_entry() {
        let headers = headers_with_xff("203.0.113.1, 10.0.0.1, 10.0.0.2");
        let resolved = resolve_lookup_ip(None, &headers, peer());
        assert_eq!(
            resolved,
            Some(("203.0.113.1".to_string(), IpSource::ForwardedFor))
        );
    }

    #[test]
    fn test_empty_query_falls_through() {
        let headers = headers_with_xff("203.0.113.1");
        let resolved = resolve_lookup_ip(Some("  "), &headers, peer());
        assert_eq!(
            resolved,
            Some(("203.0.113.1".to_string(), IpSource::ForwardedFor))
        );
    }

    #[test]
    fn test_empty_forwarded_for_falls_through_to_peer() {
        let headers = headers_with_xff(" , 10.0.0.1");
        let resolved = resolve_lookup_ip(None, &headers, peer());
        assert_eq!(resolved, Some(("192.0.2.10".to_string(), IpSource::Peer)));
    }

    #[test]
    fn test_mapped_peer_is_canonical() {
        let mapped: SocketAddr = "[::ffff:192.0.2.10]:80".parse().unwrap();
        let resolved = resolve_lookup_ip(None, &HeaderMap::new(), Some(mapped));
        assert_eq!(resolved, Some(("192.0.2.10".to_string(), IpSource::Peer)));
    }

    #[test]
    fn test_nothing_available() {
        assert_eq!(resolve_lookup_ip(None, &HeaderMap::new(), None), None);
        assert_eq!(resolve_lookup_ip(Some(""), &HeaderMap::new(), None), None);
    }
}
