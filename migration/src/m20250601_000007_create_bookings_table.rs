use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Bookings {
    Table,
    Id,
    GigId,
    ComedianId,
    PromoterId,
    OfferId,
    Status,
    PaymentIntentId,
    CreatedAt,
    UpdatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Bookings::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Bookings::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Bookings::GigId).uuid().not_null())
                    .col(ColumnDef::new(Bookings::ComedianId).uuid().not_null())
                    .col(ColumnDef::new(Bookings::PromoterId).uuid().not_null())
                    .col(ColumnDef::new(Bookings::OfferId).uuid())
                    .col(ColumnDef::new(Bookings::Status).string().not_null())
                    .col(ColumnDef::new(Bookings::PaymentIntentId).string())
                    .col(
                        ColumnDef::new(Bookings::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Bookings::UpdatedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        // One booking per offer; a retried accept cannot double-book.
        manager
            .create_index(
                Index::create()
                    .name("idx_bookings_offer_unique")
                    .table(Bookings::Table)
                    .col(Bookings::OfferId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Bookings::Table).to_owned())
            .await
    }
}
