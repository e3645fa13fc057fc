use std::time::Duration;

use configs::DatabaseConfig;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use tracing::debug;

/// Open a connection pool from the database section of the app config.
///
/// No retry: a refused or timed-out connection is returned to the caller as is.
pub async fn connect_with_config(cfg: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let url = cfg.connection_url();
    let mut opt = ConnectOptions::new(url);
    opt.max_connections(cfg.max_connections)
        .min_connections(cfg.min_connections)
        .connect_timeout(Duration::from_secs(cfg.connect_timeout_secs))
        .acquire_timeout(Duration::from_secs(cfg.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(cfg.idle_timeout_secs))
        .max_lifetime(Duration::from_secs(cfg.max_lifetime_secs))
        .sqlx_logging(cfg.sqlx_logging);
    debug!(scheme = %cfg.scheme, host = %cfg.host, database = %cfg.name, "connecting to database");
    Database::connect(opt).await
}
