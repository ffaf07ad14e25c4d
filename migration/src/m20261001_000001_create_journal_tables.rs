use sea_orm_migration::prelude::*;

const USER_ROLES: [&str; 4] = ["admin", "basic", "silver", "gold"];
const TRADE_RESULTS: [&str; 3] = ["win", "loss", "breakeven"];

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // users first, every other table points at it
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(primary_key(Users::Id))
                    .col(ColumnDef::new(Users::Username).string().not_null().unique_key())
                    .col(ColumnDef::new(Users::Email).string().not_null().unique_key())
                    .col(ColumnDef::new(Users::Password).string().not_null())
                    .col(
                        ColumnDef::new(Users::Role)
                            .string()
                            .not_null()
                            .default("basic")
                            .check(Expr::col(Users::Role).is_in(USER_ROLES)),
                    )
                    .col(
                        ColumnDef::new(Users::Result)
                            .string()
                            .null()
                            .check(Expr::col(Users::Result).is_in(TRADE_RESULTS)),
                    )
                    .col(timestamp_now(Users::CreatedAt))
                    .col(timestamp_now(Users::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Profiles::Table)
                    .if_not_exists()
                    .col(primary_key(Profiles::Id))
                    .col(ColumnDef::new(Profiles::FirstName).string().null())
                    .col(ColumnDef::new(Profiles::LastName).string().null())
                    .col(ColumnDef::new(Profiles::About).text().null())
                    .col(ColumnDef::new(Profiles::PhotoUrl).string().null())
                    .col(ColumnDef::new(Profiles::UserId).integer().not_null().unique_key())
                    .col(timestamp_now(Profiles::CreatedAt))
                    .col(timestamp_now(Profiles::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_profiles_user")
                            .from(Profiles::Table, Profiles::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Setups::Table)
                    .if_not_exists()
                    .col(primary_key(Setups::Id))
                    .col(ColumnDef::new(Setups::Title).string().not_null())
                    .col(ColumnDef::new(Setups::Description).text().null())
                    .col(ColumnDef::new(Setups::EntryPrice).double().not_null())
                    .col(ColumnDef::new(Setups::StopLoss).double().not_null())
                    .col(ColumnDef::new(Setups::TakeProfit).double().not_null())
                    .col(
                        ColumnDef::new(Setups::Result)
                            .string()
                            .null()
                            .check(Expr::col(Setups::Result).is_in(TRADE_RESULTS)),
                    )
                    .col(ColumnDef::new(Setups::Pnl).double().null()) // realized profit/loss
                    .col(ColumnDef::new(Setups::OwnerId).integer().not_null())
                    .col(timestamp_now(Setups::CreatedAt))
                    .col(timestamp_now(Setups::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_setups_owner")
                            .from(Setups::Table, Setups::OwnerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Both columns reference users, one per direction of the follow edge
        manager
            .create_table(
                Table::create()
                    .table(Subscriptions::Table)
                    .if_not_exists()
                    .col(primary_key(Subscriptions::Id))
                    .col(ColumnDef::new(Subscriptions::FollowerId).integer().not_null())
                    .col(ColumnDef::new(Subscriptions::FollowedId).integer().not_null())
                    .col(timestamp_now(Subscriptions::CreatedAt))
                    .col(timestamp_now(Subscriptions::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_subscriptions_follower")
                            .from(Subscriptions::Table, Subscriptions::FollowerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_subscriptions_followed")
                            .from(Subscriptions::Table, Subscriptions::FollowedId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(UserStats::Table)
                    .if_not_exists()
                    .col(primary_key(UserStats::Id))
                    .col(ColumnDef::new(UserStats::UserId).integer().not_null())
                    .col(
                        ColumnDef::new(UserStats::Month)
                            .integer()
                            .not_null()
                            .check(Expr::col(UserStats::Month).between(1, 12)),
                    )
                    .col(ColumnDef::new(UserStats::Year).integer().not_null())
                    .col(ColumnDef::new(UserStats::TotalTrades).integer().not_null().default(0))
                    .col(ColumnDef::new(UserStats::Wins).integer().not_null().default(0))
                    .col(ColumnDef::new(UserStats::Losses).integer().not_null().default(0))
                    .col(ColumnDef::new(UserStats::ProfitPercent).double().not_null().default(0.0))
                    .col(ColumnDef::new(UserStats::TotalPnl).double().not_null().default(0.0))
                    .col(timestamp_now(UserStats::CreatedAt))
                    .col(timestamp_now(UserStats::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_userstats_user")
                            .from(UserStats::Table, UserStats::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_setups_owner")
                    .table(Setups::Table)
                    .col(Setups::OwnerId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_subscriptions_pair")
                    .table(Subscriptions::Table)
                    .col(Subscriptions::FollowerId)
                    .col(Subscriptions::FollowedId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_subscriptions_followed")
                    .table(Subscriptions::Table)
                    .col(Subscriptions::FollowedId)
                    .to_owned(),
            )
            .await?;

        // one stats row per user per month
        manager
            .create_index(
                Index::create()
                    .name("idx_userstats_user_period")
                    .table(UserStats::Table)
                    .col(UserStats::UserId)
                    .col(UserStats::Year)
                    .col(UserStats::Month)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop tables in reverse order
        manager
            .drop_table(Table::drop().table(UserStats::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Subscriptions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Setups::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Profiles::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await
    }
}

fn primary_key<T: IntoIden>(name: T) -> ColumnDef {
    ColumnDef::new(name).integer().not_null().auto_increment().primary_key().to_owned()
}

fn timestamp_now<T: IntoIden>(name: T) -> ColumnDef {
    ColumnDef::new(name)
        .timestamp()
        .not_null()
        .default(Expr::cust("CURRENT_TIMESTAMP"))
        .to_owned()
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Username,
    Email,
    Password,
    Role,
    Result,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Profiles {
    Table,
    Id,
    FirstName,
    LastName,
    About,
    PhotoUrl,
    UserId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Setups {
    Table,
    Id,
    Title,
    Description,
    EntryPrice,
    StopLoss,
    TakeProfit,
    Result,
    Pnl,
    OwnerId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Subscriptions {
    Table,
    Id,
    FollowerId,
    FollowedId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum UserStats {
    #[sea_orm(iden = "userstats")]
    Table,
    Id,
    UserId,
    Month,
    Year,
    TotalTrades,
    Wins,
    Losses,
    ProfitPercent,
    TotalPnl,
    CreatedAt,
    UpdatedAt,
}
