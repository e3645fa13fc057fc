//! The one store an application talks to.
use std::future::Future;
use std::pin::Pin;

use configs::{AppConfig, BackendKind};
use models::{identity_key, Object};
use once_cell::sync::OnceCell;
use tokio::sync::Mutex;
use tracing::info;

use crate::db_storage::DbStorage;
use crate::engine::{Objects, StorageEngine};
use crate::errors::StorageError;
use crate::file_storage::FileStorage;

/// Forwards the store contract to whichever backend the config selected.
pub struct Storage {
    engine: Box<dyn StorageEngine>,
}

/// Future returned by a [`Storage::unit_of_work`] body.
pub type WorkFuture<'s, T> = Pin<Box<dyn Future<Output = Result<T, StorageError>> + Send + 's>>;

impl Storage {
    /// Build the configured backend, still closed.
    pub fn from_config(cfg: &AppConfig) -> Self {
        let engine: Box<dyn StorageEngine> = match cfg.storage.backend {
            BackendKind::File => Box::new(FileStorage::with_path(&cfg.storage.file_path)),
            BackendKind::Db => Box::new(DbStorage::with_config(cfg.database.clone())),
        };
        info!(event = "storage_selected", backend = ?cfg.storage.backend, "storage backend selected");
        Self { engine }
    }

    /// Build the configured backend and `reload` it.
    pub async fn open(cfg: &AppConfig) -> Result<Self, StorageError> {
        let mut storage = Self::from_config(cfg);
        storage.reload().await?;
        Ok(storage)
    }

    pub async fn reload(&mut self) -> Result<(), StorageError> {
        self.engine.reload().await
    }

    pub async fn all(&self, class: Option<&str>) -> Result<Objects, StorageError> {
        self.engine.all(class).await
    }

    pub async fn get(&self, class: &str, id: &str) -> Result<Option<Object>, StorageError> {
        self.engine.get(class, id).await
    }

    /// Like [`Storage::get`], with absence reported as [`StorageError::NotFound`].
    pub async fn require(&self, class: &str, id: &str) -> Result<Object, StorageError> {
        self.get(class, id)
            .await?
            .ok_or_else(|| StorageError::not_found(&identity_key(class, id)))
    }

    pub async fn new(&mut self, obj: Object) -> Result<(), StorageError> {
        self.engine.new(obj).await
    }

    pub async fn save(&mut self) -> Result<(), StorageError> {
        self.engine.save().await
    }

    pub async fn delete(&mut self, obj: Option<&Object>) -> Result<(), StorageError> {
        self.engine.delete(obj).await
    }

    pub async fn count(&self, class: Option<&str>) -> Result<usize, StorageError> {
        self.engine.count(class).await
    }

    pub async fn close(&mut self) -> Result<(), StorageError> {
        self.engine.close().await
    }

    pub fn is_open(&self) -> bool {
        self.engine.is_open()
    }

    /// Open the store, run `work`, and close it again whether `work`
    /// succeeded or not. The error from `work` wins over one from `close`.
    pub async fn unit_of_work<T, F>(&mut self, work: F) -> Result<T, StorageError>
    where
        F: for<'s> FnOnce(&'s mut Storage) -> WorkFuture<'s, T>,
    {
        self.reload().await?;
        let result = work(self).await;
        let closed = self.close().await;
        let value = result?;
        closed?;
        Ok(value)
    }
}

static STORAGE: OnceCell<Mutex<Storage>> = OnceCell::new();

/// Open the process-wide store. Only the first call succeeds; later calls
/// fail with [`StorageError::AlreadyInitialized`].
pub async fn init(cfg: &AppConfig) -> Result<&'static Mutex<Storage>, StorageError> {
    if STORAGE.get().is_some() {
        return Err(StorageError::AlreadyInitialized);
    }
    let storage = Storage::open(cfg).await?;
    STORAGE
        .try_insert(Mutex::new(storage))
        .map_err(|_| StorageError::AlreadyInitialized)
}

/// The store installed by [`init`], if any.
pub fn global() -> Option<&'static Mutex<Storage>> {
    STORAGE.get()
}
