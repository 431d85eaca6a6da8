use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Messages {
    Table,
    ThreadId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Offers {
    Table,
    ThreadId,
}

#[derive(DeriveIden)]
enum Bookings {
    Table,
    ComedianId,
    PromoterId,
    GigId,
}

#[derive(DeriveIden)]
enum Reviews {
    Table,
    SubjectUserId,
}

#[derive(DeriveIden)]
enum Gigs {
    Table,
    UserId,
    IsPublished,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Message history is always read per-thread, newest first.
        manager
            .create_index(
                Index::create()
                    .name("idx_messages_thread_created")
                    .table(Messages::Table)
                    .col(Messages::ThreadId)
                    .col(Messages::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_offers_thread")
                    .table(Offers::Table)
                    .col(Offers::ThreadId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_bookings_comedian")
                    .table(Bookings::Table)
                    .col(Bookings::ComedianId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_bookings_promoter")
                    .table(Bookings::Table)
                    .col(Bookings::PromoterId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_bookings_gig")
                    .table(Bookings::Table)
                    .col(Bookings::GigId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reviews_subject")
                    .table(Reviews::Table)
                    .col(Reviews::SubjectUserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_gigs_user")
                    .table(Gigs::Table)
                    .col(Gigs::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_gigs_published")
                    .table(Gigs::Table)
                    .col(Gigs::IsPublished)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for name in [
            "idx_messages_thread_created",
            "idx_offers_thread",
            "idx_bookings_comedian",
            "idx_bookings_promoter",
            "idx_bookings_gig",
            "idx_reviews_subject",
            "idx_gigs_user",
            "idx_gigs_published",
        ] {
            manager
                .drop_index(Index::drop().name(name).to_owned())
                .await?;
        }

        Ok(())
    }
}
