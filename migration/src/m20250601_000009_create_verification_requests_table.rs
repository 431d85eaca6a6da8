use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum VerificationRequests {
    Table,
    Id,
    UserId,
    RequestedRole,
    Message,
    DocumentUrls,
    Status,
    ReviewedBy,
    CreatedAt,
    ReviewedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(VerificationRequests::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(VerificationRequests::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(VerificationRequests::UserId).uuid().not_null())
                    .col(
                        ColumnDef::new(VerificationRequests::RequestedRole)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(VerificationRequests::Message)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(VerificationRequests::DocumentUrls)
                            .json_binary()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(VerificationRequests::Status)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(VerificationRequests::ReviewedBy).uuid())
                    .col(
                        ColumnDef::new(VerificationRequests::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(VerificationRequests::ReviewedAt)
                            .timestamp_with_time_zone(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(VerificationRequests::Table).to_owned())
            .await
    }
}
