pub use sea_orm_migration::prelude::*;

mod m20250601_000001_create_users_table;
mod m20250601_000002_create_gigs_table;
mod m20250601_000003_create_applications_table;
mod m20250601_000004_create_threads_tables;
mod m20250601_000005_create_messages_table;
mod m20250601_000006_create_offers_table;
mod m20250601_000007_create_bookings_table;
mod m20250601_000008_create_reviews_table;
mod m20250601_000009_create_verification_requests_table;
mod m20250601_000010_create_posts_tables;
mod m20250601_000011_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250601_000001_create_users_table::Migration),
            Box::new(m20250601_000002_create_gigs_table::Migration),
            Box::new(m20250601_000003_create_applications_table::Migration),
            Box::new(m20250601_000004_create_threads_tables::Migration),
            Box::new(m20250601_000005_create_messages_table::Migration),
            Box::new(m20250601_000006_create_offers_table::Migration),
            Box::new(m20250601_000007_create_bookings_table::Migration),
            Box::new(m20250601_000008_create_reviews_table::Migration),
            Box::new(m20250601_000009_create_verification_requests_table::Migration),
            Box::new(m20250601_000010_create_posts_tables::Migration),
            Box::new(m20250601_000011_add_indexes::Migration),
        ]
    }
}
