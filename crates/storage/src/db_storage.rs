use async_trait::async_trait;
use configs::DatabaseConfig;
use migration::MigratorTrait;
use models::{amenity, city, place, registry, review, state, user, Class, Object};
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction, DbErr,
    EntityTrait, IntoActiveModel, TransactionTrait,
};
use tracing::{debug, error, info, warn};

use crate::engine::{Objects, StorageEngine};
use crate::errors::StorageError;

/// Object store backed by a relational database, one table per persistable
/// class.
///
/// `reload` opens a connection and a session (a database transaction).
/// `new` and `delete` only touch that session; nothing is visible to other
/// connections until `save` commits. `close` discards whatever was not saved.
pub struct DbStorage {
    config: DatabaseConfig,
    conn: Option<DatabaseConnection>,
    session: Option<DatabaseTransaction>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Stage {
    Replace,
    Remove,
}

impl DbStorage {
    /// A closed store; no connection is made until `reload`.
    pub fn with_config(config: DatabaseConfig) -> Self {
        Self { config, conn: None, session: None }
    }

    fn session(&self) -> Result<&DatabaseTransaction, StorageError> {
        self.session.as_ref().ok_or(StorageError::StoreNotOpen)
    }

    async fn begin(conn: &DatabaseConnection) -> Result<DatabaseTransaction, StorageError> {
        conn.begin().await.map_err(StorageError::backend("begin session"))
    }
}

async fn fetch_all<E, C>(conn: &C) -> Result<Vec<Object>, DbErr>
where
    E: EntityTrait,
    E::Model: Into<Object>,
    C: ConnectionTrait,
{
    Ok(E::find().all(conn).await?.into_iter().map(Into::into).collect())
}

async fn fetch<C: ConnectionTrait>(conn: &C, class: Class) -> Result<Vec<Object>, DbErr> {
    match class {
        Class::User => fetch_all::<user::Entity, C>(conn).await,
        Class::State => fetch_all::<state::Entity, C>(conn).await,
        Class::City => fetch_all::<city::Entity, C>(conn).await,
        Class::Amenity => fetch_all::<amenity::Entity, C>(conn).await,
        Class::Place => fetch_all::<place::Entity, C>(conn).await,
        Class::Review => fetch_all::<review::Entity, C>(conn).await,
        Class::BaseModel => Ok(Vec::new()),
    }
}

/// Replace is delete-then-insert so it behaves the same on every driver.
async fn stage_row<A, C>(conn: &C, model: <A::Entity as EntityTrait>::Model, op: Stage) -> Result<(), DbErr>
where
    A: ActiveModelTrait + ActiveModelBehavior + Send + 'static,
    <A::Entity as EntityTrait>::Model: IntoActiveModel<A>,
    C: ConnectionTrait,
{
    let active = model.into_active_model().reset_all();
    <A::Entity as EntityTrait>::delete(active.clone()).exec(conn).await?;
    if op == Stage::Replace {
        active.insert(conn).await?;
    }
    Ok(())
}

async fn stage<C: ConnectionTrait>(conn: &C, obj: Object, op: Stage) -> Result<(), StorageError> {
    let staged = match obj {
        Object::User(m) => stage_row::<user::ActiveModel, C>(conn, m, op).await,
        Object::State(m) => stage_row::<state::ActiveModel, C>(conn, m, op).await,
        Object::City(m) => stage_row::<city::ActiveModel, C>(conn, m, op).await,
        Object::Amenity(m) => stage_row::<amenity::ActiveModel, C>(conn, m, op).await,
        Object::Place(m) => stage_row::<place::ActiveModel, C>(conn, m, op).await,
        Object::Review(m) => stage_row::<review::ActiveModel, C>(conn, m, op).await,
        Object::BaseModel(_) => return Err(StorageError::NotPersistable(Class::BaseModel.to_string())),
    };
    staged.map_err(StorageError::backend("stage row"))
}

#[async_trait]
impl StorageEngine for DbStorage {
    /// Connect, make sure every table exists and open a session. In test mode
    /// every known table is dropped first.
    async fn reload(&mut self) -> Result<(), StorageError> {
        self.close().await?;

        let conn = models::db::connect_with_config(&self.config)
            .await
            .map_err(StorageError::backend("connect"))?;
        if self.config.test_mode {
            warn!(event = "drop_all", database = %self.config.name, "test mode: dropping all tables");
            migration::Migrator::reset(&conn).await.map_err(StorageError::backend("drop tables"))?;
        }
        migration::Migrator::up(&conn, None).await.map_err(StorageError::backend("create tables"))?;

        let session = Self::begin(&conn).await?;
        info!(event = "reload", backend = ?conn.get_database_backend(), "database session opened");
        self.conn = Some(conn);
        self.session = Some(session);
        Ok(())
    }

    /// Without a filter this is the union over every persistable class.
    async fn all(&self, class: Option<&str>) -> Result<Objects, StorageError> {
        let session = self.session()?;
        let classes: Vec<Class> = match class {
            Some(name) => {
                let descriptor = registry::resolve(name)?;
                if descriptor.is_persistable() { vec![descriptor.class] } else { Vec::new() }
            }
            None => registry::persistable().collect(),
        };

        let mut objects = Objects::new();
        for class in classes {
            let rows = fetch(session, class).await.map_err(StorageError::backend("query"))?;
            objects.extend(rows.into_iter().map(|obj| (obj.key(), obj)));
        }
        Ok(objects)
    }

    async fn new(&mut self, obj: Object) -> Result<(), StorageError> {
        let session = self.session()?;
        let key = obj.key();
        stage(session, obj, Stage::Replace).await?;
        debug!(event = "new", %key, "row staged");
        Ok(())
    }

    /// Commit the session and start a new one. A failed commit is rolled back
    /// before the error is returned; the store stays open on a fresh session.
    async fn save(&mut self) -> Result<(), StorageError> {
        let session = self.session.take().ok_or(StorageError::StoreNotOpen)?;

        // `commit` consumes the transaction; if it fails, dropping it inside
        // `commit` issues the rollback.
        let committed = session.commit().await;
        if let Err(e) = &committed {
            error!(event = "commit_failed", error = %e, "commit failed; changes rolled back");
        }

        let conn = self.conn.as_ref().ok_or(StorageError::StoreNotOpen)?;
        let reopened = Self::begin(conn).await;
        match (committed, reopened) {
            (Ok(()), Ok(next)) => {
                self.session = Some(next);
                info!(event = "save", "session committed");
                Ok(())
            }
            (Ok(()), Err(e)) => {
                error!(event = "begin_failed", error = %e, "changes committed but no new session");
                Err(StorageError::SessionLost(e.to_string()))
            }
            (Err(e), next) => {
                match next {
                    Ok(next) => self.session = Some(next),
                    Err(begin) => error!(event = "begin_failed", error = %begin, "no new session after failed commit"),
                }
                Err(StorageError::Backend(format!("commit: {e}")))
            }
        }
    }

    /// Staged only; call `save` to make the removal durable.
    async fn delete(&mut self, obj: Option<&Object>) -> Result<(), StorageError> {
        let session = self.session()?;
        let Some(obj) = obj else { return Ok(()) };
        stage(session, obj.clone(), Stage::Remove).await?;
        debug!(event = "delete", key = %obj.key(), "row removal staged");
        Ok(())
    }

    async fn close(&mut self) -> Result<(), StorageError> {
        let rolled_back = match self.session.take() {
            Some(session) => session.rollback().await,
            None => Ok(()),
        };
        let closed = match self.conn.take() {
            Some(conn) => {
                info!(event = "close", "database session closed");
                conn.close().await
            }
            None => Ok(()),
        };
        rolled_back.and(closed).map_err(StorageError::backend("close"))
    }

    fn is_open(&self) -> bool {
        self.session.is_some()
    }
}
