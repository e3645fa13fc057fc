//! Create `places` table.
//!
//! Holds weak references to `cities` and `users`; numeric counters default to 0.
use sea_orm_migration::{prelude::*, schema::*};

use crate::timestamp_utc;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let backend = manager.get_database_backend();
        manager
            .create_table(
                Table::create()
                    .table(Places::Table)
                    .if_not_exists()
                    .col(string_len(Places::Id, 60).primary_key())
                    .col(timestamp_utc(backend, Places::CreatedAt))
                    .col(timestamp_utc(backend, Places::UpdatedAt))
                    .col(string_len(Places::CityId, 60).not_null())
                    .col(string_len(Places::UserId, 60).not_null())
                    .col(string_len(Places::Name, 128).not_null())
                    .col(string_len_null(Places::Description, 1024))
                    .col(integer(Places::NumberRooms).default(0))
                    .col(integer(Places::NumberBathrooms).default(0))
                    .col(integer(Places::MaxGuest).default(0))
                    .col(integer(Places::PriceByNight).default(0))
                    .col(double_null(Places::Latitude))
                    .col(double_null(Places::Longitude))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Places::Table).if_exists().to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Places {
    Table,
    Id,
    CreatedAt,
    UpdatedAt,
    CityId,
    UserId,
    Name,
    Description,
    NumberRooms,
    NumberBathrooms,
    MaxGuest,
    PriceByNight,
    Latitude,
    Longitude,
}
