#![allow(dead_code)]

use journal::entity::users;
use journal::repositories::UserRepository;
use journal::Database;
use migration::{Migrator, MigratorTrait};
use tracing_subscriber::EnvFilter;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Fresh in-memory database with the full schema applied.
pub async fn setup() -> anyhow::Result<Database> {
    init_tracing();
    let db = Database::connect_url("sqlite::memory:").await?;
    Migrator::up(db.connection(), None).await?;
    Ok(db)
}

pub async fn create_user(db: &Database, name: &str) -> anyhow::Result<users::Model> {
    let user = UserRepository::new(db.connection())
        .create(name, &format!("{name}@example.com"), "hunter2")
        .await?;
    Ok(user)
}
