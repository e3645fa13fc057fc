//! Create `reviews` table.
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
                    .table(Reviews::Table)
                    .if_not_exists()
                    .col(string_len(Reviews::Id, 60).primary_key())
                    .col(timestamp_utc(backend, Reviews::CreatedAt))
                    .col(timestamp_utc(backend, Reviews::UpdatedAt))
                    .col(string_len(Reviews::PlaceId, 60).not_null())
                    .col(string_len(Reviews::UserId, 60).not_null())
                    .col(string_len(Reviews::Text, 1024).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Reviews::Table).if_exists().to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Reviews { Table, Id, CreatedAt, UpdatedAt, PlaceId, UserId, Text }
