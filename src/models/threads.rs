use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Advisory thread label, relabeled when an offer or acceptance happens.
///
/// Not authoritative: actual negotiation state lives on the offer and booking
/// rows. Nothing gates behavior on this tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum State {
    #[sea_orm(string_value = "open")]
    Open,
    #[sea_orm(string_value = "quote")]
    Quote,
    #[sea_orm(string_value = "booked")]
    Booked,
}

/// SeaORM entity for the `threads` table.
///
/// A conversation scoped to one gig. Participants live in
/// `thread_participants`. Duplicate threads per (gig, participants) are
/// allowed: two parties may open parallel conversations about the same gig.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "threads")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub gig_id: Uuid,
    pub created_by: Uuid,
    pub state: State,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::gigs::Entity",
        from = "Column::GigId",
        to = "super::gigs::Column::Id"
    )]
    Gig,
    #[sea_orm(has_many = "super::messages::Entity")]
    Messages,
    #[sea_orm(has_many = "super::thread_participants::Entity")]
    Participants,
}

impl Related<super::gigs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Gig.def()
    }
}

impl Related<super::messages::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Messages.def()
    }
}

impl Related<super::thread_participants::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Participants.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

#[derive(Debug, Clone, Deserialize)]
pub struct CreateThread {
    pub gig_id: Uuid,
    pub participant_ids: Vec<Uuid>,
    pub initial_message: Option<String>,
}

/// Thread plus its resolved participant list, as returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct ThreadResponse {
    pub id: Uuid,
    pub gig_id: Uuid,
    pub created_by: Uuid,
    pub state: State,
    pub participant_ids: Vec<Uuid>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl ThreadResponse {
    pub fn from_parts(thread: Model, participant_ids: Vec<Uuid>) -> Self {
        Self {
            id: thread.id,
            gig_id: thread.gig_id,
            created_by: thread.created_by,
            state: thread.state,
            participant_ids,
            created_at: thread.created_at,
        }
    }
}
