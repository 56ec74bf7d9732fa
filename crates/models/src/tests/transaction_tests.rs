use anyhow::Result;
use chrono::NaiveDate;
use sea_orm::{EntityTrait, TransactionTrait};

use super::{setup_test_db, unique};
use crate::{genre, movie};

/// Test basic transaction commit
#[tokio::test]
async fn test_transaction_commit() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };

    let name = unique("tx_commit_genre");
    let txn = db.begin().await?;
    let created = genre::create(&txn, &name).await?;
    txn.commit().await?;

    let found = genre::Entity::find_by_id(created.id).one(&db).await?;
    assert_eq!(found.map(|g| g.name), Some(name));

    genre::Entity::delete_by_id(created.id).exec(&db).await?;
    Ok(())
}

/// Test transaction rollback
#[tokio::test]
async fn test_transaction_rollback() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };

    let g = genre::create(&db, &unique("tx_rollback_genre")).await?;
    let title = unique("tx_rollback_movie");

    let txn = db.begin().await?;
    let date = NaiveDate::from_ymd_opt(1999, 3, 31).unwrap();
    let created = movie::create(&txn, &title, date, "W", g.id).await?;
    txn.rollback().await?;

    assert!(movie::Entity::find_by_id(created.id).one(&db).await?.is_none());
    assert!(movie::find_by_title(&db, &title).await?.is_none());

    genre::Entity::delete_by_id(g.id).exec(&db).await?;
    Ok(())
}

/// Dropping an unfinished transaction discards its writes
#[tokio::test]
async fn test_transaction_drop_rolls_back() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };

    let name = unique("tx_drop_genre");
    {
        let txn = db.begin().await?;
        genre::create(&txn, &name).await?;
    }
    assert!(genre::find_by_name(&db, &name).await?.is_none());
    Ok(())
}
