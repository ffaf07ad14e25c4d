//! `SeaORM` entities for the journal schema.

pub mod prelude;

pub mod profiles;
pub mod setups;
pub mod subscriptions;
pub mod user_stats;
pub mod users;

use sea_orm::prelude::DateTime;

/// Columns every journal table carries: an auto-increment id and the two
/// server-maintained timestamps.
pub trait Record {
    fn id(&self) -> i32;
    fn created_at(&self) -> DateTime;
    fn updated_at(&self) -> DateTime;
}

macro_rules! impl_record {
    ($($module:ident),+ $(,)?) => {
        $(
            impl Record for $module::Model {
                fn id(&self) -> i32 {
                    self.id
                }

                fn created_at(&self) -> DateTime {
                    self.created_at
                }

                fn updated_at(&self) -> DateTime {
                    self.updated_at
                }
            }
        )+
    };
}

impl_record!(users, profiles, setups, subscriptions, user_stats);
