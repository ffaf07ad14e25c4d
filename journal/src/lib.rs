pub mod config;
pub mod database;
pub mod entity;
pub mod enums;
pub mod error;
pub mod record;
pub mod repositories;
pub mod session;

pub use config::{Settings, SQLITE_URL};
pub use database::Database;
pub use error::{ConfigError, Error, Result};
pub use record::ToRecord;
pub use session::{Session, SessionFactory};
