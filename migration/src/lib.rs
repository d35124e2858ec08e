pub use sea_orm_migration::prelude::*;

pub mod entities;
mod m20250301_000001_interaction_events;
mod m20250301_000002_contact_messages;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_interaction_events::Migration),
            Box::new(m20250301_000002_contact_messages::Migration),
        ]
    }
}
