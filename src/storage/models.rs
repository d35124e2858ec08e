use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::tracking::InteractionType;

/// 已存储的交互记录（管理端展示用）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionEvent {
    pub id: i64,
    pub timestamp: DateTime<Utc>,
    pub local_time: String,
    pub browser: String,
    pub os: String,
    pub device: String,
    pub ip: String,
    pub section: String,
    pub path: String,
    pub interaction_type: InteractionType,
}

/// 已存储的联系表单消息
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

/// 待写入的联系表单消息（已校验、已 trim）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}
