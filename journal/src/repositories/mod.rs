pub mod subscription_repository;
pub mod user_repository;

pub use subscription_repository::SubscriptionRepository;
pub use user_repository::UserRepository;
