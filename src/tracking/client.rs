//! 客户端元数据提取
//!
//! User-Agent 用 woothee 解析，地址解析规则见 `utils::ip`。

use actix_web::HttpRequest;
use actix_web::http::header::USER_AGENT;
use woothee::parser::Parser;

use crate::utils::{forwarded_for, resolve_client_address};

const UNKNOWN_LABEL: &str = "Unknown";
const DEFAULT_DEVICE: &str = "desktop";

/// Metadata attached to every stored interaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientInfo {
    pub browser: String,
    pub os: String,
    pub device: String,
    pub ip: String,
}

impl ClientInfo {
    /// Build from a raw User-Agent and an already resolved address
    pub fn from_parts(user_agent: Option<&str>, ip: impl Into<String>) -> Self {
        let (browser, os, device) = parse_user_agent(user_agent.unwrap_or_default());
        Self {
            browser,
            os,
            device,
            ip: ip.into(),
        }
    }

    /// Extract from an incoming request
    pub fn from_http_request(req: &HttpRequest) -> Self {
        let user_agent = req
            .headers()
            .get(USER_AGENT)
            .and_then(|h| h.to_str().ok());

        let forwarded = forwarded_for(req.headers());
        let socket_addr = req.peer_addr().map(|addr| addr.ip().to_string());
        let conn_info = req.connection_info();
        let ip = resolve_client_address(
            forwarded.as_deref(),
            socket_addr.as_deref(),
            conn_info.peer_addr(),
        );

        Self::from_parts(user_agent, ip)
    }
}

/// woothee 对未识别字段返回 "UNKNOWN"，统一视为缺失
fn known(value: &str) -> Option<&str> {
    let value = value.trim();
    (!value.is_empty() && value != "UNKNOWN").then_some(value)
}

/// 名称缺失时仍保留版本号，如 "Unknown 1.0"
fn name_with_version(name: &str, version: &str) -> String {
    let name = known(name).unwrap_or(UNKNOWN_LABEL);
    match known(version) {
        Some(version) => format!("{} {}", name, version),
        None => name.to_string(),
    }
}

/// woothee 不区分平板，iPad 等同样归为 mobile；爬虫和其他类别都记为 desktop
fn device_from_category(category: &str) -> String {
    match known(category) {
        Some("smartphone") | Some("mobilephone") => "mobile".to_string(),
        _ => DEFAULT_DEVICE.to_string(),
    }
}

/// Returns `(browser, os, device)`
fn parse_user_agent(user_agent: &str) -> (String, String, String) {
    let parser = Parser::new();
    match parser.parse(user_agent) {
        Some(result) => (
            name_with_version(result.name, result.version),
            name_with_version(result.os, &result.os_version),
            device_from_category(result.category),
        ),
        None => (
            UNKNOWN_LABEL.to_string(),
            UNKNOWN_LABEL.to_string(),
            DEFAULT_DEVICE.to_string(),
        ),
    }
}
