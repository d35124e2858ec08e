pub mod contact_message;
pub mod interaction_event;

pub use contact_message::Entity as ContactMessageEntity;
pub use interaction_event::Entity as InteractionEventEntity;
