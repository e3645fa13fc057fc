#![cfg(test)]
use std::path::PathBuf;

use configs::DatabaseConfig;

/// Unique JSON store path under the temp dir.
pub fn temp_json(label: &str) -> PathBuf {
    std::env::temp_dir().join(format!("file_storage_{label}_{}.json", uuid::Uuid::new_v4()))
}

/// Database config for a fresh SQLite file. One pooled connection: the
/// session transaction owns it while the store is open.
pub fn sqlite_config() -> DatabaseConfig {
    let path = std::env::temp_dir().join(format!("db_storage_{}.sqlite", uuid::Uuid::new_v4()));
    DatabaseConfig {
        url: format!("sqlite://{}?mode=rwc", path.display()),
        scheme: "sqlite".into(),
        max_connections: 1,
        min_connections: 1,
        ..DatabaseConfig::default()
    }
}
