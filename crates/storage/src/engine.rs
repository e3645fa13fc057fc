//! The contract every backend implements.
use std::collections::BTreeMap;

use async_trait::async_trait;
use models::{identity_key, Object};

use crate::errors::StorageError;

/// Snapshot of stored objects keyed by identity key (`"<class>.<id>"`).
/// Owned copies: mutating it never touches the store.
pub type Objects = BTreeMap<String, Object>;

/// Object store lifecycle: `reload` opens, `new`/`delete` stage,
/// `save` makes staged work durable, `close` releases the backend.
///
/// Every operation other than `reload`/`close` fails with
/// [`StorageError::StoreNotOpen`] while the store is closed. Class filters
/// are type tags; unknown tags fail with [`StorageError::UnknownType`].
#[async_trait]
pub trait StorageEngine: Send + Sync {
    async fn reload(&mut self) -> Result<(), StorageError>;

    /// All objects, or only those of class `class` when given.
    async fn all(&self, class: Option<&str>) -> Result<Objects, StorageError>;

    /// Stage `obj`, replacing any object with the same identity key.
    async fn new(&mut self, obj: Object) -> Result<(), StorageError>;

    async fn save(&mut self) -> Result<(), StorageError>;

    /// Remove `obj` if present. `None` is a no-op.
    async fn delete(&mut self, obj: Option<&Object>) -> Result<(), StorageError>;

    async fn get(&self, class: &str, id: &str) -> Result<Option<Object>, StorageError> {
        let key = identity_key(class, id);
        Ok(self.all(Some(class)).await?.remove(&key))
    }

    async fn count(&self, class: Option<&str>) -> Result<usize, StorageError> {
        Ok(self.all(class).await?.len())
    }

    async fn close(&mut self) -> Result<(), StorageError>;

    fn is_open(&self) -> bool;
}
