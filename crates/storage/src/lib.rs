//! Object store with interchangeable backends.
//!
//! - [`Storage`] is the facade applications hold; it picks a backend from
//!   [`configs::AppConfig`] and exposes only the [`StorageEngine`] contract.
//! - [`FileStorage`] keeps objects in memory and persists one JSON document.
//! - [`DbStorage`] keeps one table per persistable class behind a session.

pub mod errors;
pub mod engine;
pub mod file_storage;
pub mod db_storage;
pub mod facade;
#[cfg(test)]
pub mod test_support;

pub use engine::{Objects, StorageEngine};
pub use errors::StorageError;
pub use facade::{global, init, Storage};
pub use file_storage::FileStorage;
pub use db_storage::DbStorage;
