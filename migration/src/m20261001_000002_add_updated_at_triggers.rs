use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::{ConnectionTrait, DatabaseBackend};

const TABLES: [&str; 5] = ["users", "profiles", "setups", "subscriptions", "userstats"];

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        match manager.get_database_backend() {
            DatabaseBackend::Sqlite => {
                // Skipped when the statement sets updated_at itself
                for table in TABLES {
                    db.execute_unprepared(&format!(
                        "CREATE TRIGGER IF NOT EXISTS {table}_touch_updated_at \
                         AFTER UPDATE ON {table} FOR EACH ROW \
                         WHEN NEW.updated_at = OLD.updated_at \
                         BEGIN \
                         UPDATE {table} SET updated_at = CURRENT_TIMESTAMP WHERE id = NEW.id; \
                         END;"
                    ))
                    .await?;
                }
            }
            DatabaseBackend::Postgres => {
                db.execute_unprepared(
                    "CREATE OR REPLACE FUNCTION touch_updated_at() RETURNS TRIGGER AS $$ \
                     BEGIN \
                     NEW.updated_at = CURRENT_TIMESTAMP; \
                     RETURN NEW; \
                     END; \
                     $$ LANGUAGE plpgsql;",
                )
                .await?;
                for table in TABLES {
                    db.execute_unprepared(&format!(
                        "CREATE TRIGGER {table}_touch_updated_at \
                         BEFORE UPDATE ON {table} FOR EACH ROW \
                         EXECUTE FUNCTION touch_updated_at();"
                    ))
                    .await?;
                }
            }
            backend => {
                return Err(DbErr::Migration(format!(
                    "updated_at triggers are not defined for {backend:?}"
                )))
            }
        }
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        match manager.get_database_backend() {
            DatabaseBackend::Sqlite => {
                for table in TABLES {
                    let sql = format!("DROP TRIGGER IF EXISTS {table}_touch_updated_at;");
                    db.execute_unprepared(&sql).await?;
                }
            }
            DatabaseBackend::Postgres => {
                for table in TABLES {
                    db.execute_unprepared(&format!(
                        "DROP TRIGGER IF EXISTS {table}_touch_updated_at ON {table};"
                    ))
                    .await?;
                }
                db.execute_unprepared("DROP FUNCTION IF EXISTS touch_updated_at();")
                    .await?;
            }
            _ => {}
        }
        Ok(())
    }
}
