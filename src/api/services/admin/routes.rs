//! Admin API 路由配置 `/api/admin`

use actix_web::web;

use super::auth::{login, login_rate_limiter};
use super::records::{list_messages, list_visitors};
use crate::api::middleware::AdminAuth;

/// 包含：
/// - POST /login - 登录（带限流，免认证）
/// - GET /visitors - 交互记录
/// - GET /messages - 联系消息
pub fn admin_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/admin")
            .wrap(AdminAuth)
            .route("/login", web::post().to(login).wrap(login_rate_limiter()))
            .route("/visitors", web::get().to(list_visitors))
            .route("/messages", web::get().to(list_messages)),
    );
}
