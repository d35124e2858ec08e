use std::sync::Arc;

use crate::api::jwt::JwtService;
use crate::config::AdminConfig;

/// 管理端凭据：密码哈希 + JWT 服务
///
/// 通过 `web::Data<AdminAccess>` 共享给登录端点和 `AdminAuth` 中间件；
/// 没有注册或哈希为空时，整个管理 API 返回 404。
#[derive(Clone)]
pub struct AdminAccess {
    password_hash: Arc<str>,
    jwt: Arc<JwtService>,
}

impl AdminAccess {
    pub fn new(password_hash: impl Into<Arc<str>>, jwt: JwtService) -> Self {
        Self {
            password_hash: password_hash.into(),
            jwt: Arc::new(jwt),
        }
    }

    pub fn from_config(config: &AdminConfig) -> Self {
        Self::new(config.password_hash.as_str(), JwtService::from_config(config))
    }

    pub fn is_enabled(&self) -> bool {
        !self.password_hash.is_empty()
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn jwt(&self) -> &JwtService {
        &self.jwt
    }
}
