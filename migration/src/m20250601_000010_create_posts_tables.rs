use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Posts {
    Table,
    Id,
    AuthorId,
    Title,
    Body,
    CreatedAt,
}

#[derive(DeriveIden)]
enum PostVotes {
    Table,
    Id,
    PostId,
    UserId,
    Value,
    CreatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Posts::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Posts::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Posts::AuthorId).uuid().not_null())
                    .col(ColumnDef::new(Posts::Title).string().not_null())
                    .col(ColumnDef::new(Posts::Body).text().not_null())
                    .col(
                        ColumnDef::new(Posts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PostVotes::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(PostVotes::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(PostVotes::PostId).uuid().not_null())
                    .col(ColumnDef::new(PostVotes::UserId).uuid().not_null())
                    .col(ColumnDef::new(PostVotes::Value).small_integer().not_null())
                    .col(
                        ColumnDef::new(PostVotes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // One vote per user per post; re-voting overwrites.
        manager
            .create_index(
                Index::create()
                    .name("idx_post_votes_post_user_unique")
                    .table(PostVotes::Table)
                    .col(PostVotes::PostId)
                    .col(PostVotes::UserId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PostVotes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Posts::Table).to_owned())
            .await
    }
}
