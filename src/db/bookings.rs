use sea_orm::*;
use uuid::Uuid;

use crate::models::bookings::{self, CreateBooking, Status};

/// Insert a new booking (defaults to Pending status).
pub async fn insert_booking(
    db: &DatabaseConnection,
    input: CreateBooking,
) -> Result<bookings::Model, DbErr> {
    let new_booking = bookings::ActiveModel {
        id: Set(Uuid::new_v4()),
        gig_id: Set(input.gig_id),
        comedian_id: Set(input.comedian_id),
        promoter_id: Set(input.promoter_id),
        offer_id: Set(input.offer_id),
        status: Set(Status::Pending),
        payment_intent_id: Set(None),
        created_at: Set(chrono::Utc::now()),
        updated_at: Set(None),
    };

    new_booking.insert(db).await
}

/// Fetch a single booking by ID.
pub async fn get_booking_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<bookings::Model>, DbErr> {
    bookings::Entity::find_by_id(id).one(db).await
}

/// Fetch all bookings where the user is either party, deduplicated and
/// sorted by creation time.
pub async fn get_bookings_for_user(
    db: &DatabaseConnection,
    user_id: Uuid,
) -> Result<Vec<bookings::Model>, DbErr> {
    let mut rows = bookings::Entity::find()
        .filter(
            Condition::any()
                .add(bookings::Column::ComedianId.eq(user_id))
                .add(bookings::Column::PromoterId.eq(user_id)),
        )
        .order_by_asc(bookings::Column::CreatedAt)
        .all(db)
        .await?;

    rows.dedup_by_key(|b| b.id);
    Ok(rows)
}

/// Fetch bookings between the two given parties on a gig, in either
/// (comedian, promoter) orientation. Used by the review gate.
pub async fn get_bookings_between(
    db: &DatabaseConnection,
    gig_id: Uuid,
    a: Uuid,
    b: Uuid,
) -> Result<Vec<bookings::Model>, DbErr> {
    bookings::Entity::find()
        .filter(bookings::Column::GigId.eq(gig_id))
        .filter(
            Condition::any()
                .add(
                    Condition::all()
                        .add(bookings::Column::ComedianId.eq(a))
                        .add(bookings::Column::PromoterId.eq(b)),
                )
                .add(
                    Condition::all()
                        .add(bookings::Column::ComedianId.eq(b))
                        .add(bookings::Column::PromoterId.eq(a)),
                ),
        )
        .all(db)
        .await
}

/// Set the booking status. Transition legality is checked by the handler.
pub async fn set_booking_status(
    db: &DatabaseConnection,
    id: Uuid,
    status: Status,
) -> Result<bookings::Model, DbErr> {
    let booking = bookings::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Booking not found".to_string()))?;

    let mut active: bookings::ActiveModel = booking.into();
    active.status = Set(status);
    active.updated_at = Set(Some(chrono::Utc::now()));

    active.update(db).await
}

/// Mark a booking paid and record the payment reference.
pub async fn mark_paid(
    db: &DatabaseConnection,
    id: Uuid,
    payment_intent_id: String,
) -> Result<bookings::Model, DbErr> {
    let booking = bookings::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Booking not found".to_string()))?;

    let mut active: bookings::ActiveModel = booking.into();
    active.status = Set(Status::Paid);
    active.payment_intent_id = Set(Some(payment_intent_id));
    active.updated_at = Set(Some(chrono::Utc::now()));

    active.update(db).await
}
