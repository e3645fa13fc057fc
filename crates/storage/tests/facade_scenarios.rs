//! End-to-end scenarios through the facade, run against both backends.
use anyhow::Result;
use configs::{AppConfig, BackendKind, DatabaseConfig};
use models::{base_model::BaseModel, city, state, user, Object};
use storage::{Storage, StorageError};

fn file_config(label: &str) -> AppConfig {
    let mut cfg = AppConfig::default();
    cfg.storage.file_path = std::env::temp_dir()
        .join(format!("scenario_{label}_{}.json", uuid::Uuid::new_v4()))
        .display()
        .to_string();
    cfg
}

fn db_config() -> AppConfig {
    let path = std::env::temp_dir().join(format!("scenario_{}.sqlite", uuid::Uuid::new_v4()));
    let mut cfg = AppConfig::default();
    cfg.storage.backend = BackendKind::Db;
    cfg.database = DatabaseConfig {
        url: format!("sqlite://{}?mode=rwc", path.display()),
        scheme: "sqlite".into(),
        max_connections: 1,
        min_connections: 1,
        ..DatabaseConfig::default()
    };
    cfg
}

/// Create a State, save, reopen as if in a new process, read it back.
async fn state_survives_restart(cfg: AppConfig) -> Result<()> {
    let california = state::Model::new("California")?;
    let id1 = california.id.clone();
    let created_at = california.created_at;

    let mut first = Storage::open(&cfg).await?;
    first.new(california.into()).await?;
    first.save().await?;
    first.close().await?;
    drop(first);

    let mut second = Storage::open(&cfg).await?;
    let Some(Object::State(found)) = second.get("State", &id1).await? else {
        anyhow::bail!("State.{id1} missing after restart");
    };
    assert_eq!(found.id, id1);
    assert_eq!(found.name, "California");
    assert_eq!(found.created_at, created_at);
    assert_eq!(found.updated_at, created_at);
    second.close().await?;
    Ok(())
}

#[tokio::test]
async fn file_backend_state_survives_restart() -> Result<()> {
    state_survives_restart(file_config("restart")).await
}

#[tokio::test]
async fn db_backend_state_survives_restart() -> Result<()> {
    state_survives_restart(db_config()).await
}

/// Two objects of different classes: unfiltered sees both, filtered sees one.
async fn mixed_classes(cfg: AppConfig) -> Result<()> {
    let st = state::Model::new("Arizona")?;
    let us = user::Model::new("owner@hbnb.io", "secret")?;
    let (e1, e2) = (Object::from(st), Object::from(us));

    let mut storage = Storage::open(&cfg).await?;
    storage.new(e1.clone()).await?;
    storage.new(e2.clone()).await?;

    let everything = storage.all(None).await?;
    assert_eq!(everything.len(), 2);
    assert!(everything.contains_key(&e1.key()) && everything.contains_key(&e2.key()));

    let states = storage.all(Some("State")).await?;
    assert_eq!(states.len(), 1);
    assert_eq!(states.get(&e1.key()), Some(&e1));
    assert_eq!(storage.count(Some("State")).await?, states.len());
    assert_eq!(storage.count(Some("User")).await?, 1);
    assert_eq!(storage.count(Some("City")).await?, 0);

    storage.close().await?;
    Ok(())
}

#[tokio::test]
async fn file_backend_mixed_classes() -> Result<()> {
    mixed_classes(file_config("mixed")).await
}

#[tokio::test]
async fn db_backend_mixed_classes() -> Result<()> {
    mixed_classes(db_config()).await
}

/// Relations are weak: a city may outlive its state.
async fn no_cascade_on_delete(cfg: AppConfig) -> Result<()> {
    let st = state::Model::new("Georgia")?;
    let ct = city::Model::new(&st.id, "Atlanta")?;
    let (st, ct) = (Object::from(st), Object::from(ct));

    let mut storage = Storage::open(&cfg).await?;
    storage.new(st.clone()).await?;
    storage.new(ct.clone()).await?;
    storage.save().await?;
    storage.delete(Some(&st)).await?;
    storage.save().await?;

    assert!(storage.get("State", st.id()).await?.is_none());
    assert_eq!(storage.get("City", ct.id()).await?, Some(ct));
    storage.close().await?;
    Ok(())
}

#[tokio::test]
async fn file_backend_no_cascade_on_delete() -> Result<()> {
    no_cascade_on_delete(file_config("cascade")).await
}

#[tokio::test]
async fn db_backend_no_cascade_on_delete() -> Result<()> {
    no_cascade_on_delete(db_config()).await
}

#[tokio::test]
async fn base_model_is_file_only() -> Result<()> {
    let base: Object = BaseModel::new().into();

    let mut file = Storage::open(&file_config("base")).await?;
    file.new(base.clone()).await?;
    assert_eq!(file.count(Some("BaseModel")).await?, 1);
    file.close().await?;

    let mut db = Storage::open(&db_config()).await?;
    assert!(matches!(db.new(base).await, Err(StorageError::NotPersistable(_))));
    assert_eq!(db.count(Some("BaseModel")).await?, 0);
    db.close().await?;
    Ok(())
}

#[tokio::test]
async fn process_wide_store_is_installed_once() -> Result<()> {
    let cfg = file_config("global");
    assert!(storage::global().is_none());

    let installed = storage::init(&cfg).await?;
    assert!(installed.lock().await.is_open());
    assert!(std::ptr::eq(installed, storage::global().expect("installed")));

    let again = storage::init(&cfg).await;
    assert!(matches!(again, Err(StorageError::AlreadyInitialized)));

    let mut guard = installed.lock().await;
    guard.new(state::Model::new("Hawaii")?.into()).await?;
    assert_eq!(guard.count(None).await?, 1);
    guard.close().await?;
    Ok(())
}
