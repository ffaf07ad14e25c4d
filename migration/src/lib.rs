pub use sea_orm_migration::prelude::*;

mod m20261001_000001_create_journal_tables;
mod m20261001_000002_add_updated_at_triggers;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261001_000001_create_journal_tables::Migration),
            Box::new(m20261001_000002_add_updated_at_triggers::Migration),
        ]
    }
}
