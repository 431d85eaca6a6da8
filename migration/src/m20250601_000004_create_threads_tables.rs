use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Threads {
    Table,
    Id,
    GigId,
    CreatedBy,
    State,
    CreatedAt,
}

#[derive(DeriveIden)]
enum ThreadParticipants {
    Table,
    Id,
    ThreadId,
    UserId,
    CreatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Threads::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Threads::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Threads::GigId).uuid().not_null())
                    .col(ColumnDef::new(Threads::CreatedBy).uuid().not_null())
                    .col(ColumnDef::new(Threads::State).string().not_null())
                    .col(
                        ColumnDef::new(Threads::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ThreadParticipants::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ThreadParticipants::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ThreadParticipants::ThreadId)
                            .uuid()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ThreadParticipants::UserId).uuid().not_null())
                    .col(
                        ColumnDef::new(ThreadParticipants::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // A user joins a thread at most once.
        manager
            .create_index(
                Index::create()
                    .name("idx_thread_participants_thread_user_unique")
                    .table(ThreadParticipants::Table)
                    .col(ThreadParticipants::ThreadId)
                    .col(ThreadParticipants::UserId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ThreadParticipants::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Threads::Table).to_owned())
            .await
    }
}
