use actix_web::HttpResponse;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::db::bookings as booking_db;
use crate::db::gigs as gig_db;
use crate::db::threads as thread_db;
use crate::models::users::{Roles, VerificationStatus};
use crate::models::{bookings, gigs, threads};

/// Whether a user may flip a gig's publish flag: Admin always, Promoter and
/// Venue only once their verification is Approved.
pub fn can_publish_gig(role: Roles, verification: VerificationStatus) -> bool {
    match role {
        Roles::Admin => true,
        Roles::Promoter | Roles::Venue => verification == VerificationStatus::Approved,
        _ => false,
    }
}

/// Only comedians apply to gigs.
pub fn can_apply_to_gig(role: Roles) -> bool {
    role == Roles::Comedian
}

/// Roles allowed to own gig listings.
pub fn can_create_gig(role: Roles) -> bool {
    matches!(role, Roles::Promoter | Roles::Venue | Roles::Admin)
}

/// Load a thread and require the user to be one of its participants.
pub async fn verify_thread_participant(
    db: &DatabaseConnection,
    thread_id: Uuid,
    user_id: Uuid,
) -> Result<threads::Model, HttpResponse> {
    let thread = thread_db::get_thread_by_id(db, thread_id)
        .await
        .map_err(|e| {
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }))
        })?
        .ok_or_else(|| {
            HttpResponse::NotFound().json(serde_json::json!({
                "error": format!("Thread {thread_id} not found"),
            }))
        })?;

    let is_member = thread_db::is_participant(db, thread_id, user_id)
        .await
        .map_err(|e| {
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }))
        })?;

    if !is_member {
        return Err(HttpResponse::Forbidden().json(serde_json::json!({
            "error": "You are not a participant of this thread",
        })));
    }

    Ok(thread)
}

/// Load a gig and require the user to be its owner (Admin passes too).
pub async fn verify_gig_owner(
    db: &DatabaseConnection,
    gig_id: Uuid,
    user_id: Uuid,
    role: Roles,
) -> Result<gigs::Model, HttpResponse> {
    match gig_db::get_gig_by_id(db, gig_id).await {
        Ok(Some(gig)) if gig.user_id == user_id || role == Roles::Admin => Ok(gig),
        Ok(Some(_)) => Err(HttpResponse::Forbidden().json(serde_json::json!({
            "error": "You do not own this gig",
        }))),
        Ok(None) => Err(HttpResponse::NotFound().json(serde_json::json!({
            "error": format!("Gig {gig_id} not found"),
        }))),
        Err(e) => Err(HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Database error: {e}"),
        }))),
    }
}

/// Load a booking and require the user to be one of its two parties
/// (Admin passes too).
pub async fn verify_booking_party(
    db: &DatabaseConnection,
    booking_id: Uuid,
    user_id: Uuid,
    role: Roles,
) -> Result<bookings::Model, HttpResponse> {
    let booking = booking_db::get_booking_by_id(db, booking_id)
        .await
        .map_err(|e| {
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }))
        })?
        .ok_or_else(|| {
            HttpResponse::NotFound().json(serde_json::json!({
                "error": format!("Booking {booking_id} not found"),
            }))
        })?;

    let is_party = booking.comedian_id == user_id || booking.promoter_id == user_id;

    if !is_party && role != Roles::Admin {
        return Err(HttpResponse::Forbidden().json(serde_json::json!({
            "error": "You are not a party to this booking",
        })));
    }

    Ok(booking)
}
