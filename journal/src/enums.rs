//! String-coded domain values stored in enum columns.
//!
//! Each enum is persisted as its lowercase code. Parsing anything outside the
//! declared set fails with [`Error::InvalidEnumValue`]; the migration adds a
//! matching CHECK constraint for the columns that use them.

use std::fmt;
use std::str::FromStr;

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::Error;

fn parse_code<T>(kind: &'static str, raw: &str) -> Result<T, Error>
where
    T: ActiveEnum<Value = String>,
{
    T::try_from_value(&raw.to_string()).map_err(|_| Error::InvalidEnumValue {
        kind,
        value: raw.to_string(),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[derive(EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[sea_orm(string_value = "admin")]
    Admin,
    #[default]
    #[sea_orm(string_value = "basic")]
    Basic,
    #[sea_orm(string_value = "silver")]
    Silver,
    #[sea_orm(string_value = "gold")]
    Gold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "lowercase")]
pub enum TradeResult {
    #[sea_orm(string_value = "win")]
    Win,
    #[sea_orm(string_value = "loss")]
    Loss,
    /// Closed without profit or loss.
    #[sea_orm(string_value = "breakeven")]
    Breakeven,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[sea_orm(string_value = "male")]
    Male,
    #[sea_orm(string_value = "female")]
    Female,
    #[sea_orm(string_value = "other")]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "lowercase")]
pub enum Profession {
    #[sea_orm(string_value = "trader")]
    Trader,
    #[sea_orm(string_value = "analyst")]
    Analyst,
    #[sea_orm(string_value = "developer")]
    Developer,
    #[sea_orm(string_value = "unemployed")]
    Unemployed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    #[sea_orm(string_value = "draft")]
    Draft,
    #[sea_orm(string_value = "published")]
    Published,
    #[sea_orm(string_value = "archived")]
    Archived,
}

/// Star rating, stored as the digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum Rating {
    #[serde(rename = "1")]
    #[sea_orm(string_value = "1")]
    One,
    #[serde(rename = "2")]
    #[sea_orm(string_value = "2")]
    Two,
    #[serde(rename = "3")]
    #[sea_orm(string_value = "3")]
    Three,
    #[serde(rename = "4")]
    #[sea_orm(string_value = "4")]
    Four,
    #[serde(rename = "5")]
    #[sea_orm(string_value = "5")]
    Five,
}

macro_rules! string_code {
    ($($ty:ty => $kind:literal),+ $(,)?) => {
        $(
            impl FromStr for $ty {
                type Err = Error;

                fn from_str(s: &str) -> Result<Self, Self::Err> {
                    parse_code($kind, s)
                }
            }

            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(&self.to_value())
                }
            }
        )+
    };
}

string_code! {
    UserRole => "user role",
    TradeResult => "trade result",
    Gender => "gender",
    Profession => "profession",
    PostStatus => "post status",
    Rating => "rating",
}
