//! IP 地址处理工具
//!
//! 访客地址按固定优先级解析：
//! 1. X-Forwarded-For 的第一个条目
//! 2. TCP 连接的 peer 地址
//! 3. ConnectionInfo 中的请求级地址
//!
//! 选中的值去掉 `::ffff:` 前缀并 trim，最多保留 `MAX_ADDRESS_CHARS` 个字符，
//! 全部缺失时为 "unknown"。
//! 注意：X-Forwarded-For 可被客户端伪造，这里不做可信代理校验。

use actix_web::http::header::HeaderMap;

/// Address recorded when no source yields anything usable
pub const UNKNOWN_ADDRESS: &str = "unknown";

/// 与 interaction_events.ip 列宽一致
pub const MAX_ADDRESS_CHARS: usize = 64;

const MAPPED_IPV4_PREFIX: &str = "::ffff:";

/// 从 HeaderMap 提取 X-Forwarded-For 的第一个条目（原始客户端 IP）
pub fn forwarded_for(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.split(',').next())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// 去掉 IPv4-mapped IPv6 前缀（`::ffff:1.2.3.4` -> `1.2.3.4`）
pub fn strip_mapped_ipv4_prefix(addr: &str) -> &str {
    addr.strip_prefix(MAPPED_IPV4_PREFIX).unwrap_or(addr)
}

/// 按优先级选出客户端地址
pub fn resolve_client_address(
    forwarded: Option<&str>,
    socket_addr: Option<&str>,
    request_addr: Option<&str>,
) -> String {
    [forwarded, socket_addr, request_addr]
        .into_iter()
        .flatten()
        .map(|candidate| strip_mapped_ipv4_prefix(candidate.trim()).trim())
        .find(|candidate| !candidate.is_empty())
        .unwrap_or(UNKNOWN_ADDRESS)
        .chars()
        .take(MAX_ADDRESS_CHARS)
        .collect()
}
