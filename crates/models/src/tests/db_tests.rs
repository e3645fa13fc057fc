use anyhow::Result;
use migration::{MigratorTrait, SchemaManager};
use sea_orm::{ActiveModelTrait, EntityTrait, IntoActiveModel, TransactionTrait};

use super::sqlite_config;
use crate::db::connect_with_config;
use crate::{registry, state};

/// Migrations create exactly the tables the registry lists
#[tokio::test]
async fn test_migrations_create_registry_tables() -> Result<()> {
    let db = connect_with_config(&sqlite_config()).await?;
    migration::Migrator::up(&db, None).await?;

    let manager = SchemaManager::new(&db);
    for class in registry::persistable() {
        let table = class.table().unwrap();
        assert!(manager.has_table(table).await?, "missing table {table}");
    }
    Ok(())
}

/// Reset drops every known table
#[tokio::test]
async fn test_reset_drops_tables() -> Result<()> {
    let db = connect_with_config(&sqlite_config()).await?;
    migration::Migrator::up(&db, None).await?;
    migration::Migrator::reset(&db).await?;

    let manager = SchemaManager::new(&db);
    assert!(!manager.has_table("states").await?);
    Ok(())
}

/// Rolled back inserts leave no row behind
#[tokio::test]
async fn test_transaction_rollback() -> Result<()> {
    let db = connect_with_config(&sqlite_config()).await?;
    migration::Migrator::up(&db, None).await?;

    let st = state::Model::new("Oregon")?;
    let txn = db.begin().await?;
    st.clone().into_active_model().reset_all().insert(&txn).await?;
    assert!(state::Entity::find_by_id(st.id.clone()).one(&txn).await?.is_some());
    txn.rollback().await?;

    assert!(state::Entity::find_by_id(st.id).one(&db).await?.is_none());
    Ok(())
}

/// Committed rows come back field-equal, timestamps included
#[tokio::test]
async fn test_commit_round_trips_row() -> Result<()> {
    let db = connect_with_config(&sqlite_config()).await?;
    migration::Migrator::up(&db, None).await?;

    let st = state::Model::new("Nevada")?;
    let txn = db.begin().await?;
    st.clone().into_active_model().reset_all().insert(&txn).await?;
    txn.commit().await?;

    let found = state::Entity::find_by_id(st.id.clone()).one(&db).await?;
    assert_eq!(found, Some(st));
    Ok(())
}
