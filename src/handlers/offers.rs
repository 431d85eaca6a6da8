use actix_web::{HttpResponse, Responder, web};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::authorization::verify_thread_participant;
use crate::auth::middleware::AuthenticatedUser;
use crate::db::bookings as booking_db;
use crate::db::messages as message_db;
use crate::db::offers as offer_db;
use crate::db::threads as thread_db;
use crate::db::users as user_db;
use crate::models::bookings::CreateBooking;
use crate::models::messages::{CreateMessage, Kind};
use crate::models::offers::{
    Action, CreateOffer, ResolutionError, Status, assign_booking_parties, resolution_target,
};
use crate::models::threads::State;
use crate::rate_limit::{self, RateLimiter};

/// POST /api/offers — put a formal offer into a thread.
///
/// Equivalent to posting a `kind=offer` message: the offer row is created,
/// a message referencing it is appended, and the thread is relabeled Quote.
pub async fn create_offer(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    limiter: web::Data<RateLimiter>,
    body: web::Json<CreateOffer>,
) -> impl Responder {
    let from_user_id = user.0.id;
    let input = body.into_inner();

    if let Err(resp) = rate_limit::enforce(&limiter, "offers:create", from_user_id) {
        return resp;
    }

    if let Err(resp) = verify_thread_participant(db.get_ref(), input.thread_id, from_user_id).await
    {
        return resp;
    }

    if input.amount <= 0 {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": "Offer amount must be a positive integer in the smallest currency unit",
            "field": "amount",
        }));
    }

    let offer = match offer_db::insert_offer(db.get_ref(), input, from_user_id).await {
        Ok(offer) => offer,
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Failed to create offer: {e}"),
            }));
        }
    };

    let offer_message = CreateMessage {
        thread_id: offer.thread_id,
        sender_id: from_user_id,
        kind: Kind::Offer,
        body: None,
        file_url: None,
        offer_id: Some(offer.id),
    };
    if let Err(e) = message_db::insert_message(db.get_ref(), offer_message).await {
        tracing::warn!("Offer {} created but message append failed: {e}", offer.id);
    }

    if let Err(e) =
        thread_db::set_thread_state(db.get_ref(), offer.thread_id, State::Quote).await
    {
        tracing::warn!("Failed to relabel thread {} to quote: {e}", offer.thread_id);
    }

    HttpResponse::Created().json(offer)
}

/// GET /api/offers/{id} — fetch a single offer (thread participants only).
pub async fn get_offer(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let offer_id = path.into_inner();

    let offer = match offer_db::get_offer_by_id(db.get_ref(), offer_id).await {
        Ok(Some(offer)) => offer,
        Ok(None) => {
            return HttpResponse::NotFound().json(serde_json::json!({
                "error": format!("Offer {offer_id} not found"),
            }));
        }
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    };

    if let Err(resp) = verify_thread_participant(db.get_ref(), offer.thread_id, user.0.id).await {
        return resp;
    }

    HttpResponse::Ok().json(offer)
}

/// POST /api/offers/{id}/accept — counterparty accepts a pending offer.
pub async fn accept_offer(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    limiter: web::Data<RateLimiter>,
    path: web::Path<Uuid>,
) -> impl Responder {
    resolve_offer(user, db, limiter, path.into_inner(), Action::Accept).await
}

/// POST /api/offers/{id}/decline — counterparty declines a pending offer.
pub async fn decline_offer(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    limiter: web::Data<RateLimiter>,
    path: web::Path<Uuid>,
) -> impl Responder {
    resolve_offer(user, db, limiter, path.into_inner(), Action::Decline).await
}

/// POST /api/offers/{id}/withdraw — author withdraws their pending offer.
pub async fn withdraw_offer(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    limiter: web::Data<RateLimiter>,
    path: web::Path<Uuid>,
) -> impl Responder {
    resolve_offer(user, db, limiter, path.into_inner(), Action::Withdraw).await
}

/// PATCH /api/offers/{id} — status-only patch, routed through the same
/// resolution path as the action endpoints. There is no other write path
/// for offer status.
pub async fn patch_offer(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    limiter: web::Data<RateLimiter>,
    path: web::Path<Uuid>,
    body: web::Json<PatchOfferRequest>,
) -> impl Responder {
    let action = match body.status {
        Status::Accepted => Action::Accept,
        Status::Declined => Action::Decline,
        Status::Withdrawn => Action::Withdraw,
        Status::Pending => {
            return HttpResponse::BadRequest().json(serde_json::json!({
                "error": "An offer cannot be moved back to pending",
                "field": "status",
            }));
        }
    };

    resolve_offer(user, db, limiter, path.into_inner(), action).await
}

/// Shared resolution path: permission checks, the conditional Pending →
/// terminal update, and the accept side effects (booking, thread relabel,
/// system message).
async fn resolve_offer(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    limiter: web::Data<RateLimiter>,
    offer_id: Uuid,
    action: Action,
) -> HttpResponse {
    let actor_id = user.0.id;

    if let Err(resp) = rate_limit::enforce(&limiter, "offers:resolve", actor_id) {
        return resp;
    }

    // 1. Fetch the offer.
    let mut offer = match offer_db::get_offer_by_id(db.get_ref(), offer_id).await {
        Ok(Some(offer)) => offer,
        Ok(None) => {
            return HttpResponse::NotFound().json(serde_json::json!({
                "error": format!("Offer {offer_id} not found"),
            }));
        }
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    };

    // 2. Decide the target status. Permission failures beat the Pending
    //    check, so authors poking a resolved offer still see Forbidden.
    let is_participant =
        match thread_db::is_participant(db.get_ref(), offer.thread_id, actor_id).await {
            Ok(flag) => flag,
            Err(e) => {
                return HttpResponse::InternalServerError().json(serde_json::json!({
                    "error": format!("Database error: {e}"),
                }));
            }
        };

    let target = match resolution_target(
        offer.status,
        offer.from_user_id,
        actor_id,
        is_participant,
        action,
    ) {
        Ok(target) => target,
        Err(ResolutionError::NotParticipant) => {
            return HttpResponse::Forbidden().json(serde_json::json!({
                "error": "You are not a participant of this thread",
            }));
        }
        Err(ResolutionError::OwnOffer) => {
            return HttpResponse::Forbidden().json(serde_json::json!({
                "error": "You cannot accept or decline your own offer",
            }));
        }
        Err(ResolutionError::NotYourOffer) => {
            return HttpResponse::Forbidden().json(serde_json::json!({
                "error": "Only the offer's author can withdraw it",
            }));
        }
        Err(ResolutionError::AlreadyResolved) => {
            return HttpResponse::Conflict().json(serde_json::json!({
                "error": "Offer has already been resolved",
            }));
        }
    };

    // 3. On accept, work out the booking parties before touching the offer,
    //    so a bad pairing cannot strand an accepted offer without a booking.
    let booking_parties = if action == Action::Accept {
        let users = match user_db::get_users_by_ids(
            db.get_ref(),
            vec![offer.from_user_id, actor_id],
        )
        .await
        {
            Ok(users) => users,
            Err(e) => {
                return HttpResponse::InternalServerError().json(serde_json::json!({
                    "error": format!("Database error: {e}"),
                }));
            }
        };

        let from_user = users.iter().find(|u| u.id == offer.from_user_id);
        let actor = users.iter().find(|u| u.id == actor_id);
        let (Some(from_user), Some(actor)) = (from_user, actor) else {
            return HttpResponse::NotFound().json(serde_json::json!({
                "error": "Offer party no longer exists",
            }));
        };

        match assign_booking_parties((from_user.role, from_user.id), (actor.role, actor.id)) {
            Some(parties) => Some(parties),
            None => {
                return HttpResponse::BadRequest().json(serde_json::json!({
                    "error": "An offer must be between a comedian and a promoter or venue",
                }));
            }
        }
    } else {
        None
    };

    // 4. Conditional update: set the terminal status only if still Pending.
    //    Zero rows means another request won the race.
    match offer_db::resolve_pending_offer(db.get_ref(), offer_id, target).await {
        Ok(true) => {}
        Ok(false) => {
            return HttpResponse::Conflict().json(serde_json::json!({
                "error": "Offer has already been resolved",
            }));
        }
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Failed to resolve offer: {e}"),
            }));
        }
    }
    offer.status = target;

    // 5. Side effects per action.
    match action {
        Action::Accept => {
            let Some((comedian_id, promoter_id)) = booking_parties else {
                return HttpResponse::InternalServerError().json(serde_json::json!({
                    "error": "Booking parties missing on accept",
                }));
            };

            let thread =
                match thread_db::get_thread_by_id(db.get_ref(), offer.thread_id).await {
                    Ok(Some(thread)) => thread,
                    Ok(None) => {
                        return HttpResponse::NotFound().json(serde_json::json!({
                            "error": "The thread for this offer no longer exists",
                        }));
                    }
                    Err(e) => {
                        return HttpResponse::InternalServerError().json(serde_json::json!({
                            "error": format!("Database error: {e}"),
                        }));
                    }
                };

            let new_booking = CreateBooking {
                gig_id: thread.gig_id,
                comedian_id,
                promoter_id,
                offer_id: Some(offer.id),
            };

            let booking = match booking_db::insert_booking(db.get_ref(), new_booking).await {
                Ok(booking) => booking,
                Err(e) => {
                    return HttpResponse::InternalServerError().json(serde_json::json!({
                        "error": format!("Offer accepted but booking creation failed: {e}"),
                    }));
                }
            };

            if let Err(e) =
                thread_db::set_thread_state(db.get_ref(), offer.thread_id, State::Booked).await
            {
                tracing::warn!("Failed to relabel thread {} to booked: {e}", offer.thread_id);
            }

            if let Err(e) = message_db::insert_system_message(
                db.get_ref(),
                offer.thread_id,
                actor_id,
                format!("Offer accepted. Booking {} created.", booking.id),
            )
            .await
            {
                tracing::warn!("Failed to append booking notice to thread: {e}");
            }

            HttpResponse::Created().json(serde_json::json!({
                "offer": offer,
                "booking": booking,
            }))
        }
        Action::Decline => {
            if let Err(e) = message_db::insert_system_message(
                db.get_ref(),
                offer.thread_id,
                actor_id,
                "Offer declined.".to_string(),
            )
            .await
            {
                tracing::warn!("Failed to append decline notice to thread: {e}");
            }

            HttpResponse::Ok().json(serde_json::json!({ "ok": true, "offer": offer }))
        }
        Action::Withdraw => {
            if let Err(e) = message_db::insert_system_message(
                db.get_ref(),
                offer.thread_id,
                actor_id,
                "Offer withdrawn.".to_string(),
            )
            .await
            {
                tracing::warn!("Failed to append withdraw notice to thread: {e}");
            }

            HttpResponse::Ok().json(serde_json::json!({ "ok": true, "offer": offer }))
        }
    }
}

// ── Request DTOs ──

/// Request body for PATCH /api/offers/{id}.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct PatchOfferRequest {
    pub status: Status,
}
