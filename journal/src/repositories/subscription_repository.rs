use sea_orm::prelude::*;
use sea_orm::{ActiveValue::Set, QueryOrder};

use crate::entity::{subscriptions, users};
use crate::error::Result;

/// Follow edges between users. The direction always comes from the named
/// link (`users::Following`, `users::Followers`, ...), never from column order.
pub struct SubscriptionRepository<'a, C> {
    db: &'a C,
}

impl<'a, C> SubscriptionRepository<'a, C>
where
    C: ConnectionTrait,
{
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Records that `follower_id` follows `followed_id`.
    pub async fn follow(&self, follower_id: i32, followed_id: i32) -> Result<subscriptions::Model> {
        let subscription = subscriptions::ActiveModel {
            follower_id: Set(follower_id),
            followed_id: Set(followed_id),
            ..Default::default()
        }
        .insert(self.db)
        .await?;
        Ok(subscription)
    }

    pub async fn unfollow(&self, follower_id: i32, followed_id: i32) -> Result<bool> {
        let res = subscriptions::Entity::delete_many()
            .filter(subscriptions::Column::FollowerId.eq(follower_id))
            .filter(subscriptions::Column::FollowedId.eq(followed_id))
            .exec(self.db)
            .await?;
        Ok(res.rows_affected > 0)
    }

    pub async fn is_following(&self, follower_id: i32, followed_id: i32) -> Result<bool> {
        let count = subscriptions::Entity::find()
            .filter(subscriptions::Column::FollowerId.eq(follower_id))
            .filter(subscriptions::Column::FollowedId.eq(followed_id))
            .count(self.db)
            .await?;
        Ok(count > 0)
    }

    /// Subscriptions `user` has made.
    pub async fn following(&self, user: &users::Model) -> Result<Vec<subscriptions::Model>> {
        let rows = user
            .find_linked(users::Following)
            .order_by_asc(subscriptions::Column::Id)
            .all(self.db)
            .await?;
        Ok(rows)
    }

    /// Subscriptions pointing at `user`.
    pub async fn followers(&self, user: &users::Model) -> Result<Vec<subscriptions::Model>> {
        let rows = user
            .find_linked(users::Followers)
            .order_by_asc(subscriptions::Column::Id)
            .all(self.db)
            .await?;
        Ok(rows)
    }

    pub async fn followed_users(&self, user: &users::Model) -> Result<Vec<users::Model>> {
        let rows = user
            .find_linked(users::FollowedUsers)
            .order_by_asc(users::Column::Id)
            .all(self.db)
            .await?;
        Ok(rows)
    }

    pub async fn follower_users(&self, user: &users::Model) -> Result<Vec<users::Model>> {
        let rows = user
            .find_linked(users::FollowerUsers)
            .order_by_asc(users::Column::Id)
            .all(self.db)
            .await?;
        Ok(rows)
    }
}
