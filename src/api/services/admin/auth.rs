//! Admin API 认证相关端点

use actix_governor::{Governor, GovernorConfigBuilder, KeyExtractor, SimpleKeyExtractionError};
use actix_web::dev::ServiceRequest;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, web};
use governor::middleware::NoOpMiddleware;
use tracing::{debug, error, info, warn};

use super::access::AdminAccess;
use super::types::{LoginCredentials, TokenResponse};
use crate::api::services::helpers::error_response;
use crate::utils::ip::UNKNOWN_ADDRESS;
use crate::utils::password::verify_password;

/// 基于连接 IP 的限流 key 提取器
///
/// 只使用 TCP peer 地址，不信任 X-Forwarded-For。
#[derive(Clone, Copy)]
pub struct LoginKeyExtractor;

impl KeyExtractor for LoginKeyExtractor {
    type Key = String;
    type KeyExtractionError = SimpleKeyExtractionError<&'static str>;

    fn extract(&self, req: &ServiceRequest) -> Result<Self::Key, Self::KeyExtractionError> {
        let key = req
            .peer_addr()
            .map(|addr| addr.ip().to_string())
            .unwrap_or_else(|| UNKNOWN_ADDRESS.to_string());
        Ok(key)
    }
}

/// 创建登录限流器
///
/// 每秒补充 1 个令牌，突发最多 5 次请求，超限返回 429
pub fn login_rate_limiter() -> Governor<LoginKeyExtractor, NoOpMiddleware> {
    let config = GovernorConfigBuilder::default()
        .seconds_per_request(1)
        .burst_size(5)
        .key_extractor(LoginKeyExtractor)
        .finish()
        .expect("Invalid rate limit config");

    debug!("Login rate limiter created: 1 req/s, burst 5");
    Governor::new(&config)
}

/// 登录：校验密码并签发 access token
pub async fn login(
    credentials: web::Json<LoginCredentials>,
    access: web::Data<AdminAccess>,
) -> impl Responder {
    if !access.is_enabled() {
        return error_response(StatusCode::NOT_FOUND, "Not Found");
    }

    let password_valid = match verify_password(&credentials.password, access.password_hash()) {
        Ok(valid) => valid,
        Err(e) => {
            error!("Admin API: password verification error: {}", e);
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Authentication error");
        }
    };

    if !password_valid {
        warn!("Admin API: login failed - invalid password");
        return error_response(StatusCode::UNAUTHORIZED, "Invalid password");
    }

    match access.jwt().generate_access_token() {
        Ok(token) => {
            info!("Admin API: login successful");
            HttpResponse::Ok().json(TokenResponse { token })
        }
        Err(e) => {
            error!("Admin API: failed to generate access token: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to generate token")
        }
    }
}
