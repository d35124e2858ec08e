use std::sync::Mutex;

use chrono::{DateTime, Utc};

use super::{InteractionType, NewInteraction};
use crate::errors::{FolioError, Result};

/// 交互记录存储（写入 + 去重查询）
#[async_trait::async_trait]
pub trait InteractionStore: Send + Sync {
    /// 写入一条记录
    async fn record_interaction(&self, interaction: NewInteraction) -> Result<()>;

    /// 查找 `since` 之后同一地址、同一 path 的 view 记录
    async fn has_recent_view(&self, ip: &str, path: &str, since: DateTime<Utc>) -> Result<bool>;
}

/// 内存实现，用于测试和无数据库的嵌入场景
#[derive(Debug, Default)]
pub struct MemoryInteractionStore {
    records: Mutex<Vec<NewInteraction>>,
}

impl MemoryInteractionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> Vec<NewInteraction> {
        self.records
            .lock()
            .map(|records| records.clone())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.records.lock().map(|r| r.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait::async_trait]
impl InteractionStore for MemoryInteractionStore {
    async fn record_interaction(&self, interaction: NewInteraction) -> Result<()> {
        self.records
            .lock()
            .map_err(|_| FolioError::database_operation("interaction store poisoned"))?
            .push(interaction);
        Ok(())
    }

    async fn has_recent_view(&self, ip: &str, path: &str, since: DateTime<Utc>) -> Result<bool> {
        let records = self
            .records
            .lock()
            .map_err(|_| FolioError::database_operation("interaction store poisoned"))?;
        Ok(records.iter().any(|r| {
            r.interaction_type == InteractionType::View
                && r.ip == ip
                && r.path == path
                && r.timestamp >= since
        }))
    }
}
