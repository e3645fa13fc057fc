//! Create `cities` table; `state_id` points at `states.id` without a constraint.
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
                    .table(Cities::Table)
                    .if_not_exists()
                    .col(string_len(Cities::Id, 60).primary_key())
                    .col(timestamp_utc(backend, Cities::CreatedAt))
                    .col(timestamp_utc(backend, Cities::UpdatedAt))
                    .col(string_len(Cities::StateId, 60).not_null())
                    .col(string_len(Cities::Name, 128).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Cities::Table).if_exists().to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Cities { Table, Id, CreatedAt, UpdatedAt, StateId, Name }
