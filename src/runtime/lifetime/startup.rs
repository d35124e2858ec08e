use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::api::services::AdminAccess;
use crate::config::{get_config, validate};
use crate::services::ContactService;
use crate::storage::{SeaOrmStorage, StorageFactory};
use crate::tracking::InteractionTracker;

/// 服务器启动所需的共享组件
pub struct StartupContext {
    pub storage: Arc<SeaOrmStorage>,
    pub tracker: Arc<InteractionTracker>,
    pub contact_service: Arc<ContactService>,
    pub admin_access: AdminAccess,
}

impl StartupContext {
    /// 基于已连接的存储组装组件（测试也走这里）
    pub fn from_storage(storage: Arc<SeaOrmStorage>) -> Result<Self> {
        let config = get_config();

        let tracker = InteractionTracker::from_config(storage.clone(), &config.tracking)
            .context("Failed to build interaction tracker")?;
        debug!(
            "Interaction tracker ready: {} section labels, timezone {}",
            tracker.labels().len(),
            config.tracking.timezone
        );

        let contact_service = ContactService::new(storage.clone());

        let admin_access = AdminAccess::from_config(&config.admin);
        if !admin_access.is_enabled() {
            warn!("admin.password_hash is empty, admin API disabled (run `folio hash-password`)");
        }

        Ok(Self {
            storage,
            tracker: Arc::new(tracker),
            contact_service: Arc::new(contact_service),
            admin_access,
        })
    }
}

/// 准备服务器启动的上下文
/// 包括配置校验、数据库连接和迁移
pub async fn prepare_server_startup() -> Result<StartupContext> {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    // 已安装时返回 Err，忽略即可
    let _ = rustls::crypto::ring::default_provider().install_default();

    let config = get_config();
    validate(&config).context("Invalid configuration")?;

    let storage = StorageFactory::create()
        .await
        .context("Failed to create storage backend")?;
    info!("Using storage backend: {}", storage.backend_name());

    let context = StartupContext::from_storage(storage)?;

    info!(
        "Pre-startup processing completed in {} ms",
        start_time.elapsed().as_millis()
    );
    Ok(context)
}
