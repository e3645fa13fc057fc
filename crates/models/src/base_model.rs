//! Fields every stored type shares, and the non-persistable `BaseModel` type.
use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Current time truncated to microseconds, the finest precision every
/// backend keeps.
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// A fresh identifier plus creation timestamp for a new entity.
pub(crate) fn fresh() -> (String, DateTime<Utc>) {
    (Uuid::new_v4().to_string(), now())
}

pub(crate) fn required(field: &str, value: &str) -> Result<String, crate::errors::ModelError> {
    if value.trim().is_empty() {
        return Err(crate::errors::ModelError::Validation(format!("{field} required")));
    }
    Ok(value.to_string())
}

/// Bare entity with identity and timestamps only. Lives in the file store;
/// has no table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BaseModel {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BaseModel {
    pub fn new() -> Self {
        let (id, at) = fresh();
        Self { id, created_at: at, updated_at: at }
    }
}

impl Default for BaseModel {
    fn default() -> Self {
        Self::new()
    }
}
