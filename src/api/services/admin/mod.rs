//! Admin API 服务模块
//!
//! - 认证（密码登录，签发 JWT）
//! - 交互记录与联系消息的只读列表

mod access;
pub mod auth;
mod records;
pub mod routes;
mod types;

pub use access::AdminAccess;
pub use auth::{LoginKeyExtractor, login, login_rate_limiter};
pub use records::{list_messages, list_visitors};
pub use routes::admin_routes;
pub use types::{LoginCredentials, TokenResponse};
