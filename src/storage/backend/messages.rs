use async_trait::async_trait;
use sea_orm::{EntityTrait, QueryOrder};

use super::SeaOrmStorage;
use super::converters::{message_to_active_model, model_to_message};
use crate::errors::Result;
use crate::services::MessageStore;
use crate::storage::{ContactMessage, NewContactMessage};

use migration::entities::contact_message;

#[async_trait]
impl MessageStore for SeaOrmStorage {
    async fn save_message(&self, message: NewContactMessage) -> Result<()> {
        contact_message::Entity::insert(message_to_active_model(message))
            .exec(&self.db)
            .await?;
        Ok(())
    }

    async fn list_messages(&self) -> Result<Vec<ContactMessage>> {
        let models = contact_message::Entity::find()
            .order_by_desc(contact_message::Column::Timestamp)
            .order_by_desc(contact_message::Column::Id)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(model_to_message).collect())
    }
}
