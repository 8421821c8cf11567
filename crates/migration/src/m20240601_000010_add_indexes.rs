use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Provider requests: lookups by applicant
        manager
            .create_index(
                Index::create()
                    .name("idx_provider_requests_email")
                    .table(ProviderRequests::Table)
                    .col(ProviderRequests::Email)
                    .to_owned(),
            )
            .await?;

        // Services: owner filter and category filter
        manager
            .create_index(
                Index::create()
                    .name("idx_services_provider_email")
                    .table(Services::Table)
                    .col(Services::ProviderEmail)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_services_category")
                    .table(Services::Table)
                    .col(Services::Category)
                    .to_owned(),
            )
            .await?;

        // Bookings: customer filter and recency ordering
        manager
            .create_index(
                Index::create()
                    .name("idx_bookings_customer_email")
                    .table(Bookings::Table)
                    .col(Bookings::CustomerEmail)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_bookings_booked_at")
                    .table(Bookings::Table)
                    .col(Bookings::BookedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_provider_requests_email").table(ProviderRequests::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_services_provider_email").table(Services::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_services_category").table(Services::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_bookings_customer_email").table(Bookings::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_bookings_booked_at").table(Bookings::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ProviderRequests { Table, Email }

#[derive(DeriveIden)]
enum Services { Table, ProviderEmail, Category }

#[derive(DeriveIden)]
enum Bookings { Table, CustomerEmail, BookedAt }
