//! Create `provider_requests` table: applications to become a provider.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ProviderRequests::Table)
                    .if_not_exists()
                    .col(uuid(ProviderRequests::Id).primary_key())
                    .col(string_len(ProviderRequests::Email, 255))
                    .col(string_len(ProviderRequests::Status, 16).default("pending"))
                    .col(json_binary(ProviderRequests::Extra))
                    .col(timestamp_with_time_zone(ProviderRequests::CreatedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(ProviderRequests::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum ProviderRequests { Table, Id, Email, Status, Extra, CreatedAt }
