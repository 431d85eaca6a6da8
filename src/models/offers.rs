use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::users::Roles;

/// Offer status stored as a lowercase string in the database.
///
/// `Pending` is the only non-terminal state. Once an offer is accepted,
/// declined, or withdrawn it never changes again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum Status {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "accepted")]
    Accepted,
    #[sea_orm(string_value = "declined")]
    Declined,
    #[sea_orm(string_value = "withdrawn")]
    Withdrawn,
}

/// SeaORM entity for the `offers` table.
///
/// `amount` is in the smallest currency unit and must be positive.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "offers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub thread_id: Uuid,
    pub from_user_id: Uuid,
    pub amount: i64,
    pub currency: String,
    #[sea_orm(column_type = "Text")]
    pub terms: String,
    pub event_date: DateTimeUtc,
    pub expires_at: Option<DateTimeUtc>,
    pub status: Status,
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
        from = "Column::FromUserId",
        to = "super::users::Column::Id"
    )]
    FromUser,
}

impl Related<super::threads::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Thread.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FromUser.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

/// Request body for `POST /api/offers`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateOffer {
    pub thread_id: Uuid,
    pub amount: i64,
    pub currency: String,
    pub terms: String,
    pub event_date: DateTimeUtc,
    pub expires_at: Option<DateTimeUtc>,
}

/// Offer fields embedded in a `kind=offer` message post.
#[derive(Debug, Clone, Deserialize)]
pub struct OfferPayload {
    pub amount: i64,
    pub currency: String,
    pub terms: String,
    pub event_date: DateTimeUtc,
    pub expires_at: Option<DateTimeUtc>,
}

// ── Resolution rules ──

/// What the caller wants to do with a pending offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Accept,
    Decline,
    Withdraw,
}

/// Why a resolution attempt was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionError {
    /// Actor is not in the offer's thread.
    NotParticipant,
    /// Accept/decline attempted by the offer's author.
    OwnOffer,
    /// Withdraw attempted by someone other than the author.
    NotYourOffer,
    /// Offer already left the Pending state.
    AlreadyResolved,
}

/// Decide the target status for a resolution attempt.
///
/// Permission errors take priority over the Pending check, so an author
/// poking at their own already-accepted offer still sees Forbidden rather
/// than Conflict.
pub fn resolution_target(
    status: Status,
    from_user_id: Uuid,
    actor_id: Uuid,
    actor_is_participant: bool,
    action: Action,
) -> Result<Status, ResolutionError> {
    if !actor_is_participant {
        return Err(ResolutionError::NotParticipant);
    }

    match action {
        Action::Accept | Action::Decline => {
            if actor_id == from_user_id {
                return Err(ResolutionError::OwnOffer);
            }
        }
        Action::Withdraw => {
            if actor_id != from_user_id {
                return Err(ResolutionError::NotYourOffer);
            }
        }
    }

    if status != Status::Pending {
        return Err(ResolutionError::AlreadyResolved);
    }

    Ok(match action {
        Action::Accept => Status::Accepted,
        Action::Decline => Status::Declined,
        Action::Withdraw => Status::Withdrawn,
    })
}

/// On acceptance, whichever party holds the Comedian role becomes the
/// booking's comedian; the counterparty becomes the promoter. Returns
/// `(comedian_id, promoter_id)`, or None when the pair has no comedian or
/// two of them.
pub fn assign_booking_parties(
    from: (Roles, Uuid),
    actor: (Roles, Uuid),
) -> Option<(Uuid, Uuid)> {
    match (from.0, actor.0) {
        (Roles::Comedian, Roles::Comedian) => None,
        (Roles::Comedian, _) => Some((from.1, actor.1)),
        (_, Roles::Comedian) => Some((actor.1, from.1)),
        _ => None,
    }
}
