use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Booking status stored as a lowercase string in the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum Status {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "paid")]
    Paid,
    #[sea_orm(string_value = "completed")]
    Completed,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

/// SeaORM entity for the `bookings` table.
///
/// `offer_id` is set when the booking came out of an accepted offer and is
/// unique: one booking per offer, so a retried accept cannot double-book.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "bookings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub gig_id: Uuid,
    pub comedian_id: Uuid,
    pub promoter_id: Uuid,
    #[sea_orm(unique)]
    pub offer_id: Option<Uuid>,
    pub status: Status,
    pub payment_intent_id: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::gigs::Entity",
        from = "Column::GigId",
        to = "super::gigs::Column::Id"
    )]
    Gig,
    #[sea_orm(
        belongs_to = "super::offers::Entity",
        from = "Column::OfferId",
        to = "super::offers::Column::Id"
    )]
    Offer,
}

impl Related<super::gigs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Gig.def()
    }
}

impl Related<super::offers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Offer.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

/// Used internally by the accept-offer and direct-booking paths.
#[derive(Debug, Clone)]
pub struct CreateBooking {
    pub gig_id: Uuid,
    pub comedian_id: Uuid,
    pub promoter_id: Uuid,
    pub offer_id: Option<Uuid>,
}

/// Request body for `PATCH /api/bookings/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateBooking {
    pub status: Status,
}

// ── Transition rules ──

/// Legal booking status transitions. Paid is reachable only through the pay
/// endpoint; terminal states never move.
pub fn can_transition(from: Status, to: Status) -> bool {
    matches!(
        (from, to),
        (Status::Pending, Status::Paid)
            | (Status::Pending, Status::Cancelled)
            | (Status::Paid, Status::Completed)
            | (Status::Paid, Status::Cancelled)
    )
}

/// Mint the opaque mock payment reference recorded on a paid booking.
pub fn new_payment_intent_id() -> String {
    format!("pi_{}", Uuid::new_v4().simple())
}
