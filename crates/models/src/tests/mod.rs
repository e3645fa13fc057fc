/// Connection, schema and transaction tests against a throwaway SQLite file
pub mod db_tests;

use configs::DatabaseConfig;

/// Database config pointing at a fresh SQLite file under the temp dir.
pub fn sqlite_config() -> DatabaseConfig {
    let path = std::env::temp_dir().join(format!("models_db_{}.sqlite", uuid::Uuid::new_v4()));
    DatabaseConfig {
        url: format!("sqlite://{}?mode=rwc", path.display()),
        scheme: "sqlite".into(),
        max_connections: 1,
        min_connections: 1,
        ..DatabaseConfig::default()
    }
}
