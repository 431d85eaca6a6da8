use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::bookings;

/// SeaORM entity for the `reviews` table. One review per (author, gig),
/// enforced by a unique index.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reviews")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub author_id: Uuid,
    pub subject_user_id: Uuid,
    pub gig_id: Uuid,
    pub rating: i16,
    #[sea_orm(column_type = "Text")]
    pub comment: String,
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
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::AuthorId",
        to = "super::users::Column::Id"
    )]
    Author,
}

impl Related<super::gigs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Gig.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

#[derive(Debug, Clone, Deserialize)]
pub struct CreateReview {
    pub subject_user_id: Uuid,
    pub gig_id: Uuid,
    pub rating: i16,
    pub comment: String,
}

/// Query for `GET /api/reviews`. Exactly one filter must be present; the
/// handler rejects none-or-both.
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewQuery {
    pub subject_user_id: Option<Uuid>,
    pub gig_id: Option<Uuid>,
}

// ── Gating rules ──

/// Minimum comment length accepted by the schema.
pub const MIN_COMMENT_LEN: usize = 10;

/// Field-level schema check on the review body.
pub fn validate_fields(rating: i16, comment: &str) -> Result<(), (&'static str, &'static str)> {
    if !(1..=5).contains(&rating) {
        return Err(("rating", "rating must be an integer between 1 and 5"));
    }
    if comment.chars().count() < MIN_COMMENT_LEN {
        return Err(("comment", "comment must be at least 10 characters"));
    }
    Ok(())
}

/// Whether a booking entitles `author` to review `subject` for its gig:
/// the pair must match the booking's comedian/promoter in either order and
/// the booking must have reached Paid or Completed.
pub fn booking_qualifies(booking: &bookings::Model, author_id: Uuid, subject_id: Uuid) -> bool {
    let parties_match = (booking.comedian_id == author_id && booking.promoter_id == subject_id)
        || (booking.comedian_id == subject_id && booking.promoter_id == author_id);

    parties_match
        && matches!(
            booking.status,
            bookings::Status::Paid | bookings::Status::Completed
        )
}
