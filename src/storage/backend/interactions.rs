use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};

use super::SeaOrmStorage;
use super::converters::{interaction_to_active_model, model_to_interaction};
use crate::errors::Result;
use crate::storage::InteractionEvent;
use crate::tracking::{InteractionStore, InteractionType, NewInteraction};

use migration::entities::interaction_event;

#[async_trait]
impl InteractionStore for SeaOrmStorage {
    async fn record_interaction(&self, interaction: NewInteraction) -> Result<()> {
        interaction_event::Entity::insert(interaction_to_active_model(interaction))
            .exec(&self.db)
            .await?;
        Ok(())
    }

    async fn has_recent_view(&self, ip: &str, path: &str, since: DateTime<Utc>) -> Result<bool> {
        let found = interaction_event::Entity::find()
            .filter(interaction_event::Column::Ip.eq(ip))
            .filter(interaction_event::Column::Path.eq(path))
            .filter(interaction_event::Column::InteractionType.eq(InteractionType::View.as_str()))
            .filter(interaction_event::Column::Timestamp.gte(since))
            .one(&self.db)
            .await?;
        Ok(found.is_some())
    }
}

impl SeaOrmStorage {
    /// 全部交互记录，最新的在前
    pub async fn list_interactions(&self) -> Result<Vec<InteractionEvent>> {
        let models = interaction_event::Entity::find()
            .order_by_desc(interaction_event::Column::Timestamp)
            .order_by_desc(interaction_event::Column::Id)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(model_to_interaction).collect())
    }
}
