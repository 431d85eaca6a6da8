use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Gig lifecycle status, independent of the publish flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum Status {
    #[sea_orm(string_value = "open")]
    Open,
    #[sea_orm(string_value = "closed")]
    Closed,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

/// SeaORM entity for the `gigs` table.
///
/// `pay_amount` is in the smallest currency unit (cents). `is_published`
/// controls listing visibility and is gated on the owner's verification.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "gigs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub venue_name: String,
    pub city: String,
    pub pay_amount: i64,
    pub currency: String,
    pub date_start: DateTimeUtc,
    pub date_end: Option<DateTimeUtc>,
    pub status: Status,
    pub is_published: bool,
    pub user_id: Uuid,
    pub created_at: DateTimeUtc,
    pub updated_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::applications::Entity")]
    Applications,
    #[sea_orm(has_many = "super::threads::Entity")]
    Threads,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    User,
}

impl Related<super::applications::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Applications.def()
    }
}

impl Related<super::threads::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Threads.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

#[derive(Debug, Clone, Deserialize)]
pub struct CreateGig {
    pub title: String,
    pub description: String,
    pub venue_name: String,
    pub city: String,
    pub pay_amount: i64,
    pub currency: String,
    pub date_start: DateTimeUtc,
    pub date_end: Option<DateTimeUtc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateGig {
    pub title: Option<String>,
    pub description: Option<String>,
    pub venue_name: Option<String>,
    pub city: Option<String>,
    pub pay_amount: Option<i64>,
    pub currency: Option<String>,
    pub date_start: Option<DateTimeUtc>,
    pub date_end: Option<DateTimeUtc>,
    pub status: Option<Status>,
}

/// Query params for the gig listing. Non-owners only ever see published gigs;
/// `published=false` is for owners reviewing their drafts.
#[derive(Debug, Clone, Deserialize)]
pub struct GigListQuery {
    pub published: Option<bool>,
    pub city: Option<String>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

impl GigListQuery {
    pub fn page(&self) -> u64 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn limit(&self) -> u64 {
        self.limit.unwrap_or(20).min(100)
    }
}
