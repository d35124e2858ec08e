//! 访客交互追踪
//!
//! 处理流程：校验 path -> view 去重 -> 分类 -> 写入。
//! 去重的查询和写入不是原子的，同一客户端并发重复请求可能都被记录。

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;
use tracing::{debug, info};

use super::{
    ClientInfo, InteractionStore, InteractionType, NewInteraction, SectionLabels, TrackOutcome,
    TrackRequest,
};
use crate::config::{TrackingConfig, parse_timezone};
use crate::errors::{FolioError, Result};

/// `Mar 1, 2025, 4:05:09 PM`
const LOCAL_TIME_FORMAT: &str = "%b %-d, %Y, %-I:%M:%S %p";

pub struct InteractionTracker {
    store: Arc<dyn InteractionStore>,
    labels: SectionLabels,
    timezone: Tz,
    dedup_window: Duration,
}

impl InteractionTracker {
    pub fn new(
        store: Arc<dyn InteractionStore>,
        labels: SectionLabels,
        timezone: Tz,
        dedup_window: Duration,
    ) -> Self {
        Self {
            store,
            labels,
            timezone,
            dedup_window,
        }
    }

    pub fn from_config(store: Arc<dyn InteractionStore>, config: &TrackingConfig) -> Result<Self> {
        let timezone = parse_timezone(&config.timezone)?;
        let window_secs = i64::try_from(config.dedup_window_secs).map_err(|_| {
            FolioError::config(format!(
                "tracking.dedup_window_secs out of range: {}",
                config.dedup_window_secs
            ))
        })?;

        Ok(Self::new(
            store,
            SectionLabels::new(config.section_labels.clone()),
            timezone,
            Duration::seconds(window_secs),
        ))
    }

    pub fn labels(&self) -> &SectionLabels {
        &self.labels
    }

    /// Evaluate one interaction request at the current server time
    pub async fn process(&self, request: TrackRequest, client: &ClientInfo) -> Result<TrackOutcome> {
        self.process_at(request, client, Utc::now()).await
    }

    pub async fn process_at(
        &self,
        request: TrackRequest,
        client: &ClientInfo,
        now: DateTime<Utc>,
    ) -> Result<TrackOutcome> {
        let Some(path) = request.path.filter(|p| !p.is_empty()) else {
            return Ok(TrackOutcome::Skipped);
        };
        let interaction_type = request.interaction_type.unwrap_or_default();

        // 只对 view 去重，click 每次都记录
        if interaction_type == InteractionType::View {
            let since = now - self.dedup_window;
            if self.store.has_recent_view(&client.ip, &path, since).await? {
                debug!("View already tracked: ip={}, path={}", client.ip, path);
                return Ok(TrackOutcome::AlreadyTracked);
            }
        }

        let section = self.labels.classify(&path);
        let interaction = NewInteraction {
            timestamp: now,
            local_time: self.format_local_time(now),
            browser: client.browser.clone(),
            os: client.os.clone(),
            device: client.device.clone(),
            ip: client.ip.clone(),
            section,
            path,
            interaction_type,
        };

        info!(
            "Tracked {} on '{}' from {}",
            interaction.interaction_type, interaction.section, interaction.ip
        );
        self.store.record_interaction(interaction).await?;

        Ok(TrackOutcome::Recorded)
    }

    pub fn format_local_time(&self, at: DateTime<Utc>) -> String {
        at.with_timezone(&self.timezone)
            .format(LOCAL_TIME_FORMAT)
            .to_string()
    }
}
