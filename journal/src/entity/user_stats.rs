//! `SeaORM` Entity, @generated manually

use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::Set;
use serde::{Deserialize, Serialize};

/// Monthly trading figures for one user, filled in by whatever aggregates
/// closed setups.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "userstats")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub month: i32, // 1..=12
    pub year: i32,
    pub total_trades: i32,
    pub wins: i32,
    pub losses: i32,
    pub profit_percent: f64,
    pub total_pnl: f64,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Users,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl ActiveModelBehavior for ActiveModel {
    fn new() -> Self {
        Self {
            total_trades: Set(0),
            wins: Set(0),
            losses: Set(0),
            profit_percent: Set(0.0),
            total_pnl: Set(0.0),
            ..<Self as ActiveModelTrait>::default()
        }
    }
}
