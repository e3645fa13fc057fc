//! Migrator creating one table per persistable entity type.
//!
//! References between tables (`state_id`, `city_id`, ...) are plain columns;
//! no foreign keys are declared.
pub use sea_orm_migration::prelude::*;
use sea_orm_migration::{schema::timestamp_with_time_zone, sea_orm::DbBackend};

mod m20240101_000001_create_users;
mod m20240101_000002_create_states;
mod m20240101_000003_create_cities;
mod m20240101_000004_create_amenities;
mod m20240101_000005_create_places;
mod m20240101_000006_create_reviews;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_users::Migration),
            Box::new(m20240101_000002_create_states::Migration),
            Box::new(m20240101_000003_create_cities::Migration),
            Box::new(m20240101_000004_create_amenities::Migration),
            Box::new(m20240101_000005_create_places::Migration),
            Box::new(m20240101_000006_create_reviews::Migration),
        ]
    }
}

/// Non-null UTC timestamp column with microsecond precision. MySQL's bare
/// `timestamp` drops fractional seconds and ends in 2038, so it gets
/// `DATETIME(6)` instead.
pub(crate) fn timestamp_utc<T: IntoIden>(backend: DbBackend, col: T) -> ColumnDef {
    match backend {
        DbBackend::MySql => ColumnDef::new(col).custom(Alias::new("DATETIME(6)")).not_null().to_owned(),
        _ => timestamp_with_time_zone(col),
    }
}
