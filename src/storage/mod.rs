use std::sync::Arc;

use crate::errors::Result;

pub mod backend;
pub mod models;

pub use backend::SeaOrmStorage;
pub use models::{ContactMessage, InteractionEvent, NewContactMessage};

pub struct StorageFactory;

impl StorageFactory {
    pub async fn create() -> Result<Arc<SeaOrmStorage>> {
        let config = crate::config::get_config();
        let storage =
            SeaOrmStorage::new(&config.database.database_url, config.database.pool_size).await?;
        Ok(Arc::new(storage))
    }
}
