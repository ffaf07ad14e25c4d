pub use super::profiles::Entity as Profiles;
pub use super::setups::Entity as Setups;
pub use super::subscriptions::Entity as Subscriptions;
pub use super::user_stats::Entity as UserStats;
pub use super::users::Entity as Users;
