use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Message kind stored as a lowercase string in the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum Kind {
    #[sea_orm(string_value = "text")]
    Text,
    #[sea_orm(string_value = "file")]
    File,
    #[sea_orm(string_value = "offer")]
    Offer,
    #[sea_orm(string_value = "system")]
    System,
}

/// SeaORM entity for the `messages` table.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "messages")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub thread_id: Uuid,
    pub sender_id: Uuid,
    pub kind: Kind,
    #[sea_orm(column_type = "Text", nullable)]
    pub body: Option<String>,
    pub file_url: Option<String>,
    pub offer_id: Option<Uuid>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::threads::Entity",
        from = "Column::ThreadId",
        to = "super::threads::Column::Id"
    )]
    Thread,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::SenderId",
        to = "super::users::Column::Id"
    )]
    Sender,
    #[sea_orm(
        belongs_to = "super::offers::Entity",
        from = "Column::OfferId",
        to = "super::offers::Column::Id"
    )]
    Offer,
}

impl Related<super::threads::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Thread.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sender.def()
    }
}

impl Related<super::offers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Offer.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

/// DTO for inserting a message (used internally by handlers).
#[derive(Debug, Clone)]
pub struct CreateMessage {
    pub thread_id: Uuid,
    pub sender_id: Uuid,
    pub kind: Kind,
    pub body: Option<String>,
    pub file_url: Option<String>,
    pub offer_id: Option<Uuid>,
}

/// Request body for `POST /api/threads/{id}/messages`.
///
/// For `kind=offer` the embedded `offer` payload is required; the offer row
/// is created first and the message references it.
#[derive(Debug, Clone, Deserialize)]
pub struct PostMessage {
    pub kind: Kind,
    pub body: Option<String>,
    pub file_url: Option<String>,
    pub offer: Option<super::offers::OfferPayload>,
}

/// Query parameters for paginated message history (cursor on created_at + id).
#[derive(Debug, Clone, Deserialize)]
pub struct MessageQuery {
    pub limit: Option<u64>,
    pub cursor_created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub cursor_id: Option<Uuid>,
}

impl MessageQuery {
    pub fn limit(&self) -> u64 {
        self.limit.unwrap_or(50).min(200)
    }
}
