use sea_orm::prelude::*;
use sea_orm::{ActiveValue::Set, IntoActiveModel, QueryOrder};

use crate::entity::{profiles, setups, user_stats, users};
use crate::enums::{TradeResult, UserRole};
use crate::error::{Error, Result};

/// User lookups and updates over any connection, pooled or a session's
/// transaction.
pub struct UserRepository<'a, C> {
    db: &'a C,
}

impl<'a, C> UserRepository<'a, C>
where
    C: ConnectionTrait,
{
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, user_id: i32) -> Result<Option<users::Model>> {
        let user = users::Entity::find_by_id(user_id).one(self.db).await?;
        Ok(user)
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<users::Model>> {
        let user = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(self.db)
            .await?;
        Ok(user)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<users::Model>> {
        let user = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(self.db)
            .await?;
        Ok(user)
    }

    /// Inserts a user with the default role. Duplicate usernames or emails
    /// come back as the database's unique-constraint error.
    pub async fn create(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<users::Model> {
        let user = users::ActiveModel {
            username: Set(username.to_string()),
            email: Set(email.to_string()),
            password: Set(password.to_string()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;
        Ok(user)
    }

    pub async fn set_role(&self, user_id: i32, role: UserRole) -> Result<users::Model> {
        let mut user = self.require(user_id).await?.into_active_model();
        user.role = Set(role);
        Ok(user.update(self.db).await?)
    }

    pub async fn set_last_result(
        &self,
        user_id: i32,
        result: Option<TradeResult>,
    ) -> Result<users::Model> {
        let mut user = self.require(user_id).await?.into_active_model();
        user.result = Set(result);
        Ok(user.update(self.db).await?)
    }

    /// Removes the user. Profile, setups, subscriptions in both directions and
    /// stats rows go with it through the foreign keys.
    pub async fn delete(&self, user_id: i32) -> Result<bool> {
        let res = users::Entity::delete_by_id(user_id).exec(self.db).await?;
        Ok(res.rows_affected > 0)
    }

    pub async fn list_all(&self) -> Result<Vec<users::Model>> {
        let users = users::Entity::find()
            .order_by_asc(users::Column::Id)
            .all(self.db)
            .await?;
        Ok(users)
    }

    pub async fn count(&self) -> Result<usize> {
        let count = users::Entity::find().count(self.db).await?;
        Ok(count as usize)
    }

    pub async fn profile(&self, user: &users::Model) -> Result<Option<profiles::Model>> {
        let profile = user.find_related(profiles::Entity).one(self.db).await?;
        Ok(profile)
    }

    pub async fn setups(&self, user: &users::Model) -> Result<Vec<setups::Model>> {
        let setups = user
            .find_related(setups::Entity)
            .order_by_asc(setups::Column::Id)
            .all(self.db)
            .await?;
        Ok(setups)
    }

    /// Monthly stats, oldest period first.
    pub async fn stats(&self, user: &users::Model) -> Result<Vec<user_stats::Model>> {
        let stats = user
            .find_related(user_stats::Entity)
            .order_by_asc(user_stats::Column::Year)
            .order_by_asc(user_stats::Column::Month)
            .all(self.db)
            .await?;
        Ok(stats)
    }

    async fn require(&self, user_id: i32) -> Result<users::Model> {
        self.find_by_id(user_id).await?.ok_or(Error::NotFound {
            entity: "user",
            id: user_id,
        })
    }
}
