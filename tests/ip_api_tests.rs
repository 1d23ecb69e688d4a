//! `/api/ip` endpoint tests
//!
//! IP 选择顺序（query → X-Forwarded-For → 对端地址）和状态码映射

use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use actix_web::{App, web};
use async_trait::async_trait;
use serde_json::Value;

use geofinder::api::middleware::RequestIdMiddleware;
use geofinder::api::services::ip_routes;
use geofinder::errors::{GeoFinderError, Result};
use geofinder::services::geoip::{GeoIpLookup, GeoRecord, RangeDbProvider};
use geofinder::services::GeoIpProvider;

// =============================================================================
// Test Setup
// =============================================================================

const SAMPLE_CSV: &str = include_str!("../data/ranges.sample.csv");

fn sample_provider() -> GeoIpProvider {
    let db = RangeDbProvider::from_reader(SAMPLE_CSV.as_bytes()).expect("sample CSV loads");
    GeoIpProvider::from_lookup(Arc::new(db))
}

/// 总是失败的数据源，用来触发 500
struct BrokenLookup;

#[async_trait]
impl GeoIpLookup for BrokenLookup {
    async fn lookup(&self, _ip: &str) -> Result<GeoRecord> {
        Err(GeoFinderError::database("mmdb file truncated at offset 4096"))
    }

    fn name(&self) -> &'static str {
        "Broken"
    }
}

fn test_app(
    provider: GeoIpProvider,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .wrap(RequestIdMiddleware)
        .app_data(web::Data::new(Arc::new(provider)))
        .service(ip_routes())
}

// =============================================================================
// Success
// =============================================================================

#[actix_rt::test]
async fn test_lookup_by_query_param() {
    let app = test::init_service(test_app(sample_provider())).await;

    let req = TestRequest::get().uri("/api/ip?ip=8.8.8.8").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["ip"], "8.8.8.8");
    assert_eq!(body["city"], "Mountain View");
    assert_eq!(body["region"], "CA");
    assert_eq!(body["country"], "US");
    assert_eq!(body["latitude"], 37.4056);
    assert_eq!(body["longitude"], -122.0775);
    assert_eq!(body["timezone"], "America/Los_Angeles");
    assert_eq!(body["range"], "8.8.8.0-8.8.8.255");
    // 数据里没有精度半径
    assert_eq!(body["area"], "Unknown");
}

#[actix_rt::test]
async fn test_missing_fields_are_unknown() {
    let app = test::init_service(test_app(sample_provider())).await;

    let req = TestRequest::get()
        .uri("/api/ip?ip=203.0.113.7")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    for key in ["city", "region", "country", "latitude", "longitude", "timezone", "area"] {
        assert_eq!(body[key], "Unknown", "field {}", key);
    }
    assert_eq!(body["range"], "203.0.113.0-203.0.113.255");
}

#[actix_rt::test]
async fn test_ipv6_lookup() {
    let app = test::init_service(test_app(sample_provider())).await;

    let req = TestRequest::get()
        .uri("/api/ip?ip=2606%3A4700%3A%3A1111")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["ip"], "2606:4700::1111");
    assert_eq!(body["city"], "San Francisco");
}

// =============================================================================
// IP selection order
// =============================================================================

#[actix_rt::test]
async fn test_query_wins_over_forwarded_for_and_peer() {
    let app = test::init_service(test_app(sample_provider())).await;

    let req = TestRequest::get()
        .uri("/api/ip?ip=9.9.9.9")
        .insert_header(("x-forwarded-for", "8.8.8.8"))
        .peer_addr("1.1.1.1:40000".parse().unwrap())
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(body["ip"], "9.9.9.9");
    assert_eq!(body["city"], "Zurich");
    assert_eq!(body["area"], 50);
}

#[actix_rt::test]
async fn test_forwarded_for_first_entry() {
    let app = test::init_service(test_app(sample_provider())).await;

    let req = TestRequest::get()
        .uri("/api/ip")
        .insert_header(("x-forwarded-for", "81.2.69.160, 10.0.0.1"))
        .peer_addr("1.1.1.1:40000".parse().unwrap())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["ip"], "81.2.69.160");
    assert_eq!(body["city"], "London");
}

#[actix_rt::test]
async fn test_peer_address_fallback() {
    let app = test::init_service(test_app(sample_provider())).await;

    let req = TestRequest::get()
        .uri("/api/ip?ip=")
        .peer_addr("1.1.1.1:40000".parse().unwrap())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["ip"], "1.1.1.1");
    assert_eq!(body["city"], "Brisbane");
}

// =============================================================================
// Errors
// =============================================================================

#[actix_rt::test]
async fn test_no_ip_available_is_400() {
    let app = test::init_service(test_app(sample_provider())).await;

    // TestRequest 默认没有对端地址
    let req = TestRequest::get().uri("/api/ip").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "IP address is required.");
}

#[actix_rt::test]
async fn test_unknown_ip_is_404() {
    let app = test::init_service(test_app(sample_provider())).await;

    let req = TestRequest::get().uri("/api/ip?ip=192.0.2.1").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Geolocation data not found for the provided IP.");
}

#[actix_rt::test]
async fn test_unparsable_ip_is_404() {
    let app = test::init_service(test_app(sample_provider())).await;

    let req = TestRequest::get().uri("/api/ip?ip=not-an-ip").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn test_internal_error_is_500_without_details() {
    let provider = GeoIpProvider::from_lookup(Arc::new(BrokenLookup));
    let app = test::init_service(test_app(provider)).await;

    let req = TestRequest::get().uri("/api/ip?ip=8.8.8.8").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = test::read_body(resp).await;
    let text = std::str::from_utf8(&body).unwrap();
    assert_eq!(text, r#"{"error":"Internal Server Error"}"#);
    assert!(!text.contains("mmdb"));
}

#[actix_rt::test]
async fn test_only_get_is_routed() {
    let app = test::init_service(test_app(sample_provider())).await;

    let req = TestRequest::post().uri("/api/ip?ip=8.8.8.8").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_client_error());
}

// =============================================================================
// Middleware
// =============================================================================

#[actix_rt::test]
async fn test_every_response_has_request_id() {
    let app = test::init_service(test_app(sample_provider())).await;

    let mut seen = Vec::new();
    for uri in ["/api/ip?ip=8.8.8.8", "/api/ip", "/api/ip?ip=192.0.2.1"] {
        let req = TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        let id = resp
            .headers()
            .get("x-request-id")
            .expect("x-request-id header")
            .to_str()
            .unwrap()
            .to_string();
        assert_eq!(id.len(), 36);
        seen.push(id);
    }

    seen.sort();
    seen.dedup();
    assert_eq!(seen.len(), 3);
}
