use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Offers {
    Table,
    Id,
    ThreadId,
    FromUserId,
    Amount,
    Currency,
    Terms,
    EventDate,
    ExpiresAt,
    Status,
    CreatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Offers::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Offers::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Offers::ThreadId).uuid().not_null())
                    .col(ColumnDef::new(Offers::FromUserId).uuid().not_null())
                    .col(ColumnDef::new(Offers::Amount).big_integer().not_null())
                    .col(ColumnDef::new(Offers::Currency).string().not_null())
                    .col(ColumnDef::new(Offers::Terms).text().not_null())
                    .col(
                        ColumnDef::new(Offers::EventDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Offers::ExpiresAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(Offers::Status).string().not_null())
                    .col(
                        ColumnDef::new(Offers::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Offers::Table).to_owned())
            .await
    }
}
