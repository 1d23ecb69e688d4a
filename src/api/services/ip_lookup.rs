use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, Responder, web};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, error, trace};

use crate::errors::GeoFinderError;
use crate::services::GeoIpProvider;
use crate::services::geoip::{ErrorResponse, LookupResponse};
use crate::utils::ip::resolve_request_ip;

pub const MSG_IP_REQUIRED: &str = "IP address is required.";
pub const MSG_NOT_FOUND: &str = "Geolocation data not found for the provided IP.";
pub const MSG_INTERNAL: &str = "Internal Server Error";

#[derive(Debug, Deserialize)]
pub struct IpQuery {
    pub ip: Option<String>,
}

pub struct IpLookupService;

impl IpLookupService {
    /// `GET /api/ip?ip=<address>`
    pub async fn lookup(
        req: HttpRequest,
        query: web::Query<IpQuery>,
        geoip: web::Data<Arc<GeoIpProvider>>,
    ) -> impl Responder {
        let Some((ip, source)) = resolve_request_ip(&req, query.ip.as_deref()) else {
            debug!("No IP in query, X-Forwarded-For or connection");
            return Self::error_response(StatusCode::BAD_REQUEST, MSG_IP_REQUIRED);
        };
        trace!("Looking up {} (from {})", ip, source);

        match geoip.lookup(&ip).await {
            Ok(record) => HttpResponse::Ok().json(LookupResponse::from(record)),
            Err(e) => Self::lookup_error_response(&ip, e),
        }
    }

    /// 查询错误 → HTTP 响应，内部错误不回显细节
    fn lookup_error_response(ip: &str, err: GeoFinderError) -> HttpResponse {
        match err {
            GeoFinderError::NotFound(msg) => {
                debug!("Geolocation miss for {}: {}", ip, msg);
                Self::error_response(StatusCode::NOT_FOUND, MSG_NOT_FOUND)
            }
            // 格式不对的地址按查无结果处理
            GeoFinderError::InvalidInput(msg) => {
                debug!("Unusable IP {}: {}", ip, msg);
                Self::error_response(StatusCode::NOT_FOUND, MSG_NOT_FOUND)
            }
            other => {
                error!("Error in GeoIP API for {}: {}", ip, other);
                Self::error_response(StatusCode::INTERNAL_SERVER_ERROR, MSG_INTERNAL)
            }
        }
    }

    #[inline]
    fn error_response(status: StatusCode, message: &str) -> HttpResponse {
        HttpResponse::build(status).json(ErrorResponse {
            error: message.to_string(),
        })
    }
}

/// 本地查询接口路由
pub fn ip_routes() -> actix_web::Scope {
    web::scope("/api").route("/ip", web::get().to(IpLookupService::lookup))
}
