//! 配置校验
//!
//! 启动时执行一次，失败即拒绝启动。

use chrono_tz::Tz;

use super::StaticConfig;
use crate::errors::{FolioError, Result};

/// Parse an IANA timezone name
pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.parse::<Tz>()
        .map_err(|_| FolioError::config(format!("Unknown timezone: '{}'", name)))
}

/// Validate the fields the server cannot run without
pub fn validate(config: &StaticConfig) -> Result<()> {
    parse_timezone(&config.tracking.timezone)?;

    if config.tracking.dedup_window_secs == 0 {
        return Err(FolioError::config(
            "tracking.dedup_window_secs must be greater than 0",
        ));
    }

    if config
        .tracking
        .section_labels
        .iter()
        .any(|(id, label)| id.is_empty() || label.is_empty())
    {
        return Err(FolioError::config(
            "tracking.section_labels must not contain empty ids or labels",
        ));
    }

    if !matches!(config.logging.format.as_str(), "text" | "json") {
        return Err(FolioError::config(format!(
            "logging.format must be 'text' or 'json', got '{}'",
            config.logging.format
        )));
    }

    if config.rate_limit.enabled
        && (config.rate_limit.requests == 0 || config.rate_limit.window_secs == 0)
    {
        return Err(FolioError::config(
            "rate_limit.requests and rate_limit.window_secs must be greater than 0",
        ));
    }

    if !config.admin.password_hash.is_empty()
        && !crate::utils::password::is_argon2_hash(&config.admin.password_hash)
    {
        return Err(FolioError::config(
            "admin.password_hash must be an Argon2 hash (use `folio hash-password`)",
        ));
    }

    Ok(())
}
