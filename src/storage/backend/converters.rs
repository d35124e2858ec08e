use sea_orm::ActiveValue::{NotSet, Set};
use tracing::warn;

use crate::storage::{ContactMessage, InteractionEvent, NewContactMessage};
use crate::tracking::{InteractionType, NewInteraction};
use migration::entities::{contact_message, interaction_event};

/// 将 Sea-ORM Model 转换为 InteractionEvent
pub fn model_to_interaction(model: interaction_event::Model) -> InteractionEvent {
    let interaction_type = model.interaction_type.parse().unwrap_or_else(|e| {
        warn!("Row {} has {}; treating as view", model.id, e);
        InteractionType::View
    });

    InteractionEvent {
        id: model.id,
        timestamp: model.timestamp,
        local_time: model.local_time,
        browser: model.browser,
        os: model.os,
        device: model.device,
        ip: model.ip,
        section: model.section,
        path: model.path,
        interaction_type,
    }
}

pub fn interaction_to_active_model(interaction: NewInteraction) -> interaction_event::ActiveModel {
    interaction_event::ActiveModel {
        id: NotSet,
        timestamp: Set(interaction.timestamp),
        local_time: Set(interaction.local_time),
        browser: Set(interaction.browser),
        os: Set(interaction.os),
        device: Set(interaction.device),
        ip: Set(interaction.ip),
        section: Set(interaction.section),
        path: Set(interaction.path),
        interaction_type: Set(interaction.interaction_type.as_str().to_string()),
    }
}

pub fn model_to_message(model: contact_message::Model) -> ContactMessage {
    ContactMessage {
        id: model.id,
        name: model.name,
        email: model.email,
        message: model.message,
        timestamp: model.timestamp,
    }
}

pub fn message_to_active_model(message: NewContactMessage) -> contact_message::ActiveModel {
    contact_message::ActiveModel {
        id: NotSet,
        name: Set(message.name),
        email: Set(message.email),
        message: Set(message.message),
        timestamp: Set(message.timestamp),
    }
}
