//! API 模块常量定义
//!
//! 路由前缀与响应文案等硬编码常量。

/// Dedicated tracking endpoint; the passive gate never runs here
pub const TRACK_ENDPOINT: &str = "/api/track";

/// Prefix shared by every JSON API route
pub const API_PREFIX: &str = "/api";

/// Route segment marking the administrative area
pub const ADMIN_SEGMENT: &str = "admin";

/// Admin login route, exempt from bearer auth
pub const ADMIN_LOGIN_PATH: &str = "/api/admin/login";

pub const MSG_TRACKED: &str = "Interaction tracked successfully";
pub const MSG_ALREADY_TRACKED: &str = "View already tracked";
pub const MSG_TRACK_FAILED: &str = "Failed to track interaction";

pub const MSG_CONTACT_SENT: &str = "Message sent successfully";
pub const MSG_CONTACT_FAILED: &str = "Failed to send message";

/// Upper bound for JSON bodies parsed by `web::Json`
pub const JSON_PAYLOAD_LIMIT: usize = 64 * 1024;
