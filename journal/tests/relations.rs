mod common;

use journal::entity::{profiles, setups, subscriptions, user_stats, users};
use journal::enums::TradeResult;
use journal::repositories::{SubscriptionRepository, UserRepository};
use journal::{Database, Error};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, EntityTrait, IntoActiveModel, PaginatorTrait,
    QueryFilter,
};

async fn add_setup(
    db: &Database,
    owner: &users::Model,
    title: &str,
) -> anyhow::Result<setups::Model> {
    let setup = setups::ActiveModel {
        title: Set(title.to_string()),
        entry_price: Set(100.0),
        stop_loss: Set(95.0),
        take_profit: Set(110.0),
        owner_id: Set(owner.id),
        ..Default::default()
    }
    .insert(db.connection())
    .await?;
    Ok(setup)
}

async fn add_stats(
    db: &Database,
    user: &users::Model,
    year: i32,
    month: i32,
) -> anyhow::Result<user_stats::Model> {
    let stats = user_stats::ActiveModel {
        user_id: Set(user.id),
        year: Set(year),
        month: Set(month),
        total_trades: Set(10),
        wins: Set(6),
        losses: Set(4),
        profit_percent: Set(3.5),
        total_pnl: Set(420.0),
        ..Default::default()
    }
    .insert(db.connection())
    .await?;
    Ok(stats)
}

async fn add_profile(db: &Database, user: &users::Model) -> anyhow::Result<profiles::Model> {
    let profile = profiles::ActiveModel {
        first_name: Set(Some(user.username.clone())),
        photo_url: Set(Some(format!("https://cdn.example.com/{}.png", user.username))),
        user_id: Set(user.id),
        ..Default::default()
    }
    .insert(db.connection())
    .await?;
    Ok(profile)
}

#[tokio::test]
async fn subscription_points_one_way() -> anyhow::Result<()> {
    let db = common::setup().await?;
    let alice = common::create_user(&db, "alice").await?;
    let bob = common::create_user(&db, "bob").await?;
    let subs = SubscriptionRepository::new(db.connection());

    let edge = subs.follow(alice.id, bob.id).await?;
    assert_eq!(edge.follower_id, alice.id);
    assert_eq!(edge.followed_id, bob.id);

    assert_eq!(subs.following(&alice).await?, vec![edge.clone()]);
    assert_eq!(subs.followers(&bob).await?, vec![edge]);
    assert!(subs.followers(&alice).await?.is_empty());
    assert!(subs.following(&bob).await?.is_empty());

    assert_eq!(subs.followed_users(&alice).await?, vec![bob.clone()]);
    assert_eq!(subs.follower_users(&bob).await?, vec![alice.clone()]);
    assert!(subs.followed_users(&bob).await?.is_empty());
    assert!(subs.follower_users(&alice).await?.is_empty());

    assert!(subs.is_following(alice.id, bob.id).await?);
    assert!(!subs.is_following(bob.id, alice.id).await?);
    Ok(())
}

#[tokio::test]
async fn mutual_follows_are_two_edges() -> anyhow::Result<()> {
    let db = common::setup().await?;
    let alice = common::create_user(&db, "alice").await?;
    let bob = common::create_user(&db, "bob").await?;
    let carol = common::create_user(&db, "carol").await?;
    let subs = SubscriptionRepository::new(db.connection());

    subs.follow(alice.id, bob.id).await?;
    subs.follow(bob.id, alice.id).await?;
    subs.follow(carol.id, bob.id).await?;

    assert_eq!(subs.follower_users(&bob).await?, vec![alice.clone(), carol.clone()]);
    assert_eq!(subs.followed_users(&bob).await?, vec![alice.clone()]);
    assert_eq!(subs.following(&carol).await?.len(), 1);

    // following the same trader twice is refused
    assert!(subs.follow(carol.id, bob.id).await.is_err());

    assert!(subs.unfollow(alice.id, bob.id).await?);
    assert!(!subs.unfollow(alice.id, bob.id).await?);
    assert_eq!(subs.follower_users(&bob).await?, vec![carol]);
    assert!(subs.is_following(bob.id, alice.id).await?);
    Ok(())
}

#[tokio::test]
async fn deleting_a_user_removes_everything_they_own() -> anyhow::Result<()> {
    let db = common::setup().await?;
    let alice = common::create_user(&db, "alice").await?;
    let bob = common::create_user(&db, "bob").await?;

    add_profile(&db, &alice).await?;
    for title in ["ETH pullback", "SOL breakout", "BTC short"] {
        add_setup(&db, &alice, title).await?;
    }
    add_stats(&db, &alice, 2026, 8).await?;
    add_stats(&db, &alice, 2026, 9).await?;

    add_profile(&db, &bob).await?;
    let bobs_setup = add_setup(&db, &bob, "XRP range").await?;
    add_stats(&db, &bob, 2026, 9).await?;

    let subs = SubscriptionRepository::new(db.connection());
    subs.follow(alice.id, bob.id).await?;
    subs.follow(bob.id, alice.id).await?;

    let alice_id = alice.id;
    let removed = db
        .with_session(move |s| {
            Box::pin(async move {
                let removed = UserRepository::new(s.tx().await?).delete(alice_id).await?;
                s.commit().await?;
                Ok::<_, Error>(removed)
            })
        })
        .await?;
    assert!(removed);

    let conn = db.connection();
    let setups_left = setups::Entity::find()
        .filter(setups::Column::OwnerId.eq(alice.id))
        .count(conn)
        .await?;
    let stats_left = user_stats::Entity::find()
        .filter(user_stats::Column::UserId.eq(alice.id))
        .count(conn)
        .await?;
    let profiles_left = profiles::Entity::find()
        .filter(profiles::Column::UserId.eq(alice.id))
        .count(conn)
        .await?;
    assert_eq!((setups_left, stats_left, profiles_left), (0, 0, 0));
    assert_eq!(subscriptions::Entity::find().count(conn).await?, 0);

    // bob's own rows are untouched
    assert_eq!(setups::Entity::find().all(conn).await?, vec![bobs_setup]);
    assert_eq!(user_stats::Entity::find().count(conn).await?, 1);
    assert_eq!(profiles::Entity::find().count(conn).await?, 1);
    assert_eq!(users::Entity::find().count(conn).await?, 1);
    Ok(())
}

#[tokio::test]
async fn deleting_an_unknown_user_reports_nothing_removed() -> anyhow::Result<()> {
    let db = common::setup().await?;
    assert!(!UserRepository::new(db.connection()).delete(31_337).await?);
    Ok(())
}

#[tokio::test]
async fn related_rows_load_through_the_owner() -> anyhow::Result<()> {
    let db = common::setup().await?;
    let alice = common::create_user(&db, "alice").await?;
    let repo = UserRepository::new(db.connection());

    assert!(repo.profile(&alice).await?.is_none());
    let profile = add_profile(&db, &alice).await?;
    assert_eq!(repo.profile(&alice).await?, Some(profile));

    let first = add_setup(&db, &alice, "ETH pullback").await?;
    let mut second = add_setup(&db, &alice, "SOL breakout").await?.into_active_model();
    second.result = Set(Some(TradeResult::Loss));
    second.pnl = Set(Some(-5.0));
    let second = second.update(db.connection()).await?;
    assert_eq!(repo.setups(&alice).await?, vec![first, second]);

    let september = add_stats(&db, &alice, 2026, 9).await?;
    let march = add_stats(&db, &alice, 2026, 3).await?;
    let december = add_stats(&db, &alice, 2025, 12).await?;
    assert_eq!(repo.stats(&alice).await?, vec![december, march, september]);

    // one row per user per month
    assert!(add_stats(&db, &alice, 2026, 9).await.is_err());
    Ok(())
}

#[tokio::test]
async fn lookups_by_unique_keys() -> anyhow::Result<()> {
    let db = common::setup().await?;
    let alice = common::create_user(&db, "alice").await?;
    common::create_user(&db, "bob").await?;
    let repo = UserRepository::new(db.connection());

    assert_eq!(repo.find_by_email("alice@example.com").await?, Some(alice.clone()));
    assert_eq!(repo.find_by_id(alice.id).await?, Some(alice.clone()));
    assert_eq!(repo.find_by_username("nobody").await?, None);
    assert_eq!(repo.count().await?, 2);

    let names: Vec<String> = repo.list_all().await?.into_iter().map(|u| u.username).collect();
    assert_eq!(names, vec!["alice", "bob"]);
    Ok(())
}
