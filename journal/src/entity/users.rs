//! `SeaORM` Entity, @generated manually

use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::Set;
use serde::{Deserialize, Serialize};

use crate::enums::{TradeResult, UserRole};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub username: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password: String,
    pub role: UserRole,
    /// Outcome of the user's most recent trade.
    pub result: Option<TradeResult>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::profiles::Entity")]
    Profiles,
    #[sea_orm(has_many = "super::setups::Entity")]
    Setups,
    #[sea_orm(has_many = "super::user_stats::Entity")]
    UserStats,
}

impl Related<super::profiles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Profiles.def()
    }
}

impl Related<super::setups::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Setups.def()
    }
}

impl Related<super::user_stats::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserStats.def()
    }
}

// subscriptions references users twice, so each direction gets its own link
// instead of a `Related` impl.

/// Subscription rows where this user is the follower.
#[derive(Debug)]
pub struct Following;

impl Linked for Following {
    type FromEntity = Entity;
    type ToEntity = super::subscriptions::Entity;

    fn link(&self) -> Vec<RelationDef> {
        vec![super::subscriptions::Relation::Follower.def().rev()]
    }
}

/// Subscription rows where this user is the one being followed.
#[derive(Debug)]
pub struct Followers;

impl Linked for Followers {
    type FromEntity = Entity;
    type ToEntity = super::subscriptions::Entity;

    fn link(&self) -> Vec<RelationDef> {
        vec![super::subscriptions::Relation::Followed.def().rev()]
    }
}

/// Users this user follows.
#[derive(Debug)]
pub struct FollowedUsers;

impl Linked for FollowedUsers {
    type FromEntity = Entity;
    type ToEntity = Entity;

    fn link(&self) -> Vec<RelationDef> {
        vec![
            super::subscriptions::Relation::Follower.def().rev(),
            super::subscriptions::Relation::Followed.def(),
        ]
    }
}

/// Users following this user.
#[derive(Debug)]
pub struct FollowerUsers;

impl Linked for FollowerUsers {
    type FromEntity = Entity;
    type ToEntity = Entity;

    fn link(&self) -> Vec<RelationDef> {
        vec![
            super::subscriptions::Relation::Followed.def().rev(),
            super::subscriptions::Relation::Follower.def(),
        ]
    }
}

impl ActiveModelBehavior for ActiveModel {
    fn new() -> Self {
        Self {
            role: Set(UserRole::default()),
            ..<Self as ActiveModelTrait>::default()
        }
    }
}
