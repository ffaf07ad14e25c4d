mod common;

use std::time::Duration;

use journal::entity::users;
use journal::repositories::UserRepository;
use journal::Error;
use sea_orm::{EntityTrait, PaginatorTrait};

async fn user_count(db: &journal::Database) -> anyhow::Result<u64> {
    Ok(users::Entity::find().count(db.connection()).await?)
}

#[tokio::test]
async fn committed_work_is_visible_after_the_call() -> anyhow::Result<()> {
    let db = common::setup().await?;

    let user = db
        .with_session(|s| {
            Box::pin(async move {
                let user = UserRepository::new(s.tx().await?)
                    .create("alice", "alice@example.com", "pw")
                    .await?;
                s.commit().await?;
                Ok::<_, Error>(user)
            })
        })
        .await?;

    // the returned model stays readable after commit
    assert_eq!(user.username, "alice");
    assert!(user.id > 0);

    let stored = UserRepository::new(db.connection())
        .find_by_username("alice")
        .await?
        .expect("alice was committed");
    assert_eq!(stored, user);
    Ok(())
}

#[tokio::test]
async fn failing_operation_rolls_back_and_returns_its_error() -> anyhow::Result<()> {
    let db = common::setup().await?;

    let result: Result<(), anyhow::Error> = db
        .with_session(|s| {
            Box::pin(async move {
                UserRepository::new(s.tx().await?)
                    .create("bob", "bob@example.com", "pw")
                    .await?;
                Err::<(), _>(anyhow::anyhow!("strategy rejected"))
            })
        })
        .await;

    let err = result.expect_err("operation should fail");
    assert_eq!(err.to_string(), "strategy rejected");
    assert_eq!(user_count(&db).await?, 0);
    Ok(())
}

#[tokio::test]
async fn uncommitted_work_is_discarded_on_close() -> anyhow::Result<()> {
    let db = common::setup().await?;

    db.with_session(|s| {
        Box::pin(async move {
            UserRepository::new(s.tx().await?)
                .create("carol", "carol@example.com", "pw")
                .await?;
            Ok::<_, Error>(())
        })
    })
    .await?;

    assert_eq!(user_count(&db).await?, 0);
    Ok(())
}

#[tokio::test]
async fn only_work_after_the_last_commit_is_rolled_back() -> anyhow::Result<()> {
    let db = common::setup().await?;

    let result = db
        .with_session(|s| {
            Box::pin(async move {
                UserRepository::new(s.tx().await?)
                    .create("dave", "dave@example.com", "pw")
                    .await?;
                s.commit().await?;
                UserRepository::new(s.tx().await?)
                    .create("erin", "erin@example.com", "pw")
                    .await?;
                Err::<(), _>(Error::NotFound { entity: "setup", id: 7 })
            })
        })
        .await;

    assert!(matches!(result, Err(Error::NotFound { entity: "setup", id: 7 })));

    let repo = UserRepository::new(db.connection());
    assert!(repo.find_by_username("dave").await?.is_some());
    assert!(repo.find_by_username("erin").await?.is_none());
    Ok(())
}

#[tokio::test]
async fn closing_inside_the_operation_is_harmless() -> anyhow::Result<()> {
    let db = common::setup().await?;

    let closed = db
        .with_session(|s| {
            Box::pin(async move {
                UserRepository::new(s.tx().await?)
                    .create("frank", "frank@example.com", "pw")
                    .await?;
                s.commit().await?;
                s.close().await?;
                Ok::<_, Error>(!s.is_open())
            })
        })
        .await?;

    assert!(closed);
    assert_eq!(user_count(&db).await?, 1);
    Ok(())
}

#[tokio::test]
async fn cancelled_operation_leaves_nothing_behind() -> anyhow::Result<()> {
    let db = common::setup().await?;

    let cancelled = tokio::time::timeout(
        Duration::from_millis(200),
        db.with_session(|s| {
            Box::pin(async move {
                UserRepository::new(s.tx().await?)
                    .create("grace", "grace@example.com", "pw")
                    .await?;
                futures::future::pending::<()>().await;
                Ok::<_, Error>(())
            })
        }),
    )
    .await;

    assert!(cancelled.is_err());
    assert_eq!(user_count(&db).await?, 0);
    Ok(())
}

#[tokio::test]
async fn every_call_gets_its_own_session() -> anyhow::Result<()> {
    let db = common::setup().await?;

    let first = db
        .with_session(|s| Box::pin(async move { Ok::<_, Error>(s.id()) }))
        .await?;
    let second = db
        .with_session(|s| Box::pin(async move { Ok::<_, Error>(s.id()) }))
        .await?;

    assert_ne!(first, second);
    Ok(())
}
