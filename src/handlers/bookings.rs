use actix_web::{HttpResponse, Responder, web};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::authorization::verify_booking_party;
use crate::auth::middleware::AuthenticatedUser;
use crate::db::bookings as booking_db;
use crate::db::gigs as gig_db;
use crate::db::messages as message_db;
use crate::db::offers as offer_db;
use crate::db::users as user_db;
use crate::models::bookings::{
    CreateBooking, Status, UpdateBooking, can_transition, new_payment_intent_id,
};
use crate::models::users::Roles;
use crate::rate_limit::{self, RateLimiter};

/// POST /api/bookings — promoter-initiated booking without a prior offer.
///
/// Promoter/Venue/Admin only. The promoter side defaults to the caller;
/// Admins may book on behalf of another promoter.
pub async fn create_booking(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    limiter: web::Data<RateLimiter>,
    body: web::Json<CreateBookingRequest>,
) -> impl Responder {
    let input = body.into_inner();

    if let Err(resp) = rate_limit::enforce(&limiter, "bookings:create", user.0.id) {
        return resp;
    }

    if !matches!(user.0.role, Roles::Promoter | Roles::Venue | Roles::Admin) {
        return HttpResponse::Forbidden().json(serde_json::json!({
            "error": "Only promoters, venues, and admins can create bookings directly",
        }));
    }

    let promoter_id = match input.promoter_id {
        Some(id) if user.0.role == Roles::Admin => id,
        Some(id) if id != user.0.id => {
            return HttpResponse::Forbidden().json(serde_json::json!({
                "error": "You can only create bookings for yourself",
            }));
        }
        _ => user.0.id,
    };

    // 1. Verify the gig exists.
    match gig_db::get_gig_by_id(db.get_ref(), input.gig_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return HttpResponse::NotFound().json(serde_json::json!({
                "error": format!("Gig {} not found", input.gig_id),
            }));
        }
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    }

    // 2. The booked party must exist and be a comedian.
    match user_db::get_user_by_id(db.get_ref(), input.comedian_id).await {
        Ok(Some(comedian)) if comedian.role == Roles::Comedian => {}
        Ok(Some(_)) => {
            return HttpResponse::BadRequest().json(serde_json::json!({
                "error": "The booked user must be a comedian",
                "field": "comedian_id",
            }));
        }
        Ok(None) => {
            return HttpResponse::NotFound().json(serde_json::json!({
                "error": format!("User {} not found", input.comedian_id),
            }));
        }
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    }

    let new_booking = CreateBooking {
        gig_id: input.gig_id,
        comedian_id: input.comedian_id,
        promoter_id,
        offer_id: input.offer_id,
    };

    match booking_db::insert_booking(db.get_ref(), new_booking).await {
        Ok(booking) => HttpResponse::Created().json(booking),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to create booking: {e}"),
        })),
    }
}

/// GET /api/bookings — list bookings where the authenticated user is either
/// party, deduplicated, sorted by creation time.
pub async fn get_bookings(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> impl Responder {
    match booking_db::get_bookings_for_user(db.get_ref(), user.0.id).await {
        Ok(bookings) => HttpResponse::Ok().json(bookings),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Database error: {e}"),
        })),
    }
}

/// GET /api/bookings/{id} — get a single booking (parties or Admin).
pub async fn get_booking(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    match verify_booking_party(db.get_ref(), path.into_inner(), user.0.id, user.0.role).await {
        Ok(booking) => HttpResponse::Ok().json(booking),
        Err(resp) => resp,
    }
}

/// PATCH /api/bookings/{id} — move a booking along its lifecycle.
///
/// Parties or Admin. Only legal transitions are applied; Paid is reachable
/// solely through the pay endpoint.
pub async fn update_booking(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateBooking>,
) -> impl Responder {
    let booking_id = path.into_inner();
    let target = body.status;

    let booking =
        match verify_booking_party(db.get_ref(), booking_id, user.0.id, user.0.role).await {
            Ok(booking) => booking,
            Err(resp) => return resp,
        };

    if target == Status::Paid {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": "Use the pay endpoint to mark a booking paid",
            "field": "status",
        }));
    }

    if !can_transition(booking.status, target) {
        return HttpResponse::Conflict().json(serde_json::json!({
            "error": format!("A {:?} booking cannot move to {:?}", booking.status, target),
        }));
    }

    match booking_db::set_booking_status(db.get_ref(), booking_id, target).await {
        Ok(updated) => HttpResponse::Ok().json(updated),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to update booking: {e}"),
        })),
    }
}

/// POST /api/bookings/{id}/pay — mock payment capture.
///
/// One of the two parties settles the booking: a unique payment reference is
/// recorded, the status moves to Paid, and the originating thread (via the
/// booking's offer) gets a confirmation notice.
pub async fn pay_booking(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    limiter: web::Data<RateLimiter>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let booking_id = path.into_inner();
    let actor_id = user.0.id;

    if let Err(resp) = rate_limit::enforce(&limiter, "bookings:pay", actor_id) {
        return resp;
    }

    let booking = match booking_db::get_booking_by_id(db.get_ref(), booking_id).await {
        Ok(Some(booking)) => booking,
        Ok(None) => {
            return HttpResponse::NotFound().json(serde_json::json!({
                "error": format!("Booking {booking_id} not found"),
            }));
        }
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    };

    // Paying is strictly for the two parties, not admins.
    if booking.comedian_id != actor_id && booking.promoter_id != actor_id {
        return HttpResponse::Forbidden().json(serde_json::json!({
            "error": "Only the booking's parties can pay it",
        }));
    }

    if booking.status != Status::Pending {
        return HttpResponse::Conflict().json(serde_json::json!({
            "error": format!("A {:?} booking cannot be paid", booking.status),
        }));
    }

    let payment_intent_id = new_payment_intent_id();

    let paid = match booking_db::mark_paid(db.get_ref(), booking_id, payment_intent_id.clone())
        .await
    {
        Ok(paid) => paid,
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Failed to mark booking paid: {e}"),
            }));
        }
    };

    // Payment confirmation goes back into the negotiation thread, found
    // through the originating offer. Direct bookings have no thread.
    if let Some(offer_id) = paid.offer_id {
        match offer_db::get_offer_by_id(db.get_ref(), offer_id).await {
            Ok(Some(offer)) => {
                if let Err(e) = message_db::insert_system_message(
                    db.get_ref(),
                    offer.thread_id,
                    actor_id,
                    format!(
                        "Payment received for booking {}. Payout is protected until the show completes.",
                        paid.id
                    ),
                )
                .await
                {
                    tracing::warn!("Failed to append payment notice to thread: {e}");
                }
            }
            Ok(None) => {}
            Err(e) => tracing::warn!("Failed to look up offer for payment notice: {e}"),
        }
    }

    HttpResponse::Ok().json(serde_json::json!({
        "booking": paid,
        "payment_intent_id": payment_intent_id,
    }))
}

// ── Request DTOs ──

/// Request body for POST /api/bookings. `promoter_id` is honored only for
/// Admin callers; everyone else books as themselves.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct CreateBookingRequest {
    pub gig_id: Uuid,
    pub comedian_id: Uuid,
    pub promoter_id: Option<Uuid>,
    pub offer_id: Option<Uuid>,
}
