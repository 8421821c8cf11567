//! Create `services` table: offerings owned by a provider email.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Services::Table)
                    .if_not_exists()
                    .col(uuid(Services::Id).primary_key())
                    .col(string_len_null(Services::ProviderEmail, 255))
                    .col(string_len(Services::ServiceName, 255).default(""))
                    .col(text_null(Services::Description))
                    .col(string_len(Services::Category, 128).default(""))
                    .col(double(Services::Price).default(0.0))
                    .col(double(Services::Ratings).default(0.0))
                    .col(json_binary(Services::Extra))
                    .col(timestamp_with_time_zone(Services::CreatedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Services::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Services { Table, Id, ProviderEmail, ServiceName, Description, Category, Price, Ratings, Extra, CreatedAt }
