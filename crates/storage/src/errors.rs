use std::fmt::Display;

use models::ModelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("unknown type: {0}")]
    UnknownType(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("malformed record: {0}")]
    MalformedRecord(String),
    #[error("corrupt store: {0}")]
    CorruptStore(String),
    #[error("store is not open; call reload first")]
    StoreNotOpen,
    #[error("type {0} is not persistable")]
    NotPersistable(String),
    #[error("backend failure: {0}")]
    Backend(String),
    /// `save` committed, but the next session could not be started.
    #[error("changes saved but the store is no longer open: {0}")]
    SessionLost(String),
    #[error("storage already initialized")]
    AlreadyInitialized,
}

impl StorageError {
    pub fn not_found(key: &str) -> Self { Self::NotFound(format!("{key} not found")) }

    /// Wrap an engine/io error with what was being attempted.
    pub(crate) fn backend<E: Display>(context: &'static str) -> impl FnOnce(E) -> Self {
        move |e| Self::Backend(format!("{context}: {e}"))
    }

    /// Conditions a caller should render as "nothing there".
    pub fn is_not_present(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::UnknownType(_))
    }

    /// Conditions that should keep an application from serving at all.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::CorruptStore(_) | Self::Backend(_) | Self::SessionLost(_))
    }
}

impl From<ModelError> for StorageError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::UnknownType(t) => Self::UnknownType(t),
            ModelError::MalformedRecord(m) | ModelError::Validation(m) => Self::MalformedRecord(m),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_errors_map_onto_storage_taxonomy() {
        let e: StorageError = ModelError::UnknownType("Spaceship".into()).into();
        assert!(matches!(e, StorageError::UnknownType(ref t) if t == "Spaceship"));
        assert!(e.is_not_present());

        let e: StorageError = ModelError::MalformedRecord("bad".into()).into();
        assert!(matches!(e, StorageError::MalformedRecord(_)));
        assert!(!e.is_fatal());
    }

    #[test]
    fn fatal_and_absent_are_disjoint() {
        let all = [
            StorageError::not_found("State.1"),
            StorageError::UnknownType("X".into()),
            StorageError::CorruptStore("x".into()),
            StorageError::Backend("x".into()),
            StorageError::StoreNotOpen,
            StorageError::SessionLost("x".into()),
        ];
        for e in &all {
            assert!(!(e.is_fatal() && e.is_not_present()), "{e}");
        }
        assert!(StorageError::backend("commit")("boom").is_fatal());
    }
}
