use actix_web::{HttpResponse, Responder, web};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::authorization::verify_thread_participant;
use crate::auth::middleware::AuthenticatedUser;
use crate::db::gigs as gig_db;
use crate::db::messages as message_db;
use crate::db::offers as offer_db;
use crate::db::threads as thread_db;
use crate::models::messages::{CreateMessage, Kind, MessageQuery, PostMessage};
use crate::models::offers::CreateOffer;
use crate::models::threads::{CreateThread, State, ThreadResponse};
use crate::rate_limit::{self, RateLimiter};

/// POST /api/threads — open a negotiation thread on a gig.
///
/// Participants are the creator plus the invitees. Duplicate threads for the
/// same gig and people are allowed; nothing deduplicates conversations.
pub async fn create_thread(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    limiter: web::Data<RateLimiter>,
    body: web::Json<CreateThread>,
) -> impl Responder {
    let creator_id = user.0.id;
    let input = body.into_inner();

    if let Err(resp) = rate_limit::enforce(&limiter, "threads:create", creator_id) {
        return resp;
    }

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

    // 2. Participants = creator ∪ invitees, creator first, duplicates dropped.
    let mut participant_ids: Vec<Uuid> = vec![creator_id];
    for id in input.participant_ids {
        if !participant_ids.contains(&id) {
            participant_ids.push(id);
        }
    }

    let thread =
        match thread_db::insert_thread(db.get_ref(), input.gig_id, creator_id, &participant_ids)
            .await
        {
            Ok(thread) => thread,
            Err(e) => {
                return HttpResponse::InternalServerError().json(serde_json::json!({
                    "error": format!("Failed to create thread: {e}"),
                }));
            }
        };

    // 3. Optional opening message.
    if let Some(text) = input.initial_message {
        let first_message = CreateMessage {
            thread_id: thread.id,
            sender_id: creator_id,
            kind: Kind::Text,
            body: Some(text),
            file_url: None,
            offer_id: None,
        };
        if let Err(e) = message_db::insert_message(db.get_ref(), first_message).await {
            tracing::warn!("Thread {} created but opening message failed: {e}", thread.id);
        }
    }

    HttpResponse::Created().json(ThreadResponse::from_parts(thread, participant_ids))
}

/// GET /api/threads — list threads the authenticated user participates in.
pub async fn get_threads(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> impl Responder {
    let threads = match thread_db::get_threads_for_user(db.get_ref(), user.0.id).await {
        Ok(threads) => threads,
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    };

    let thread_ids: Vec<Uuid> = threads.iter().map(|t| t.id).collect();
    let mut participants =
        match thread_db::get_participants_for_threads(db.get_ref(), thread_ids).await {
            Ok(map) => map,
            Err(e) => {
                return HttpResponse::InternalServerError().json(serde_json::json!({
                    "error": format!("Database error: {e}"),
                }));
            }
        };

    let response: Vec<ThreadResponse> = threads
        .into_iter()
        .map(|t| {
            let ids = participants.remove(&t.id).unwrap_or_default();
            ThreadResponse::from_parts(t, ids)
        })
        .collect();

    HttpResponse::Ok().json(response)
}

/// GET /api/threads/{id} — get a single thread (participants only).
pub async fn get_thread(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let thread_id = path.into_inner();

    let thread = match verify_thread_participant(db.get_ref(), thread_id, user.0.id).await {
        Ok(thread) => thread,
        Err(resp) => return resp,
    };

    match thread_db::get_participant_ids(db.get_ref(), thread_id).await {
        Ok(ids) => HttpResponse::Ok().json(ThreadResponse::from_parts(thread, ids)),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Database error: {e}"),
        })),
    }
}

/// POST /api/threads/{id}/messages — post a message into a thread.
///
/// For `kind=offer` the offer row is created first, then the message
/// referencing it, and the thread is relabeled Quote.
pub async fn post_message(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    limiter: web::Data<RateLimiter>,
    path: web::Path<Uuid>,
    body: web::Json<PostMessage>,
) -> impl Responder {
    let thread_id = path.into_inner();
    let sender_id = user.0.id;
    let input = body.into_inner();

    if let Err(resp) = rate_limit::enforce(&limiter, "messages:create", sender_id) {
        return resp;
    }

    if let Err(resp) = verify_thread_participant(db.get_ref(), thread_id, sender_id).await {
        return resp;
    }

    let offer_id = match input.kind {
        Kind::Text => {
            if input.body.as_deref().map_or(true, |b| b.trim().is_empty()) {
                return HttpResponse::BadRequest().json(serde_json::json!({
                    "error": "Text messages need a body",
                    "field": "body",
                }));
            }
            None
        }
        Kind::File => {
            if input.file_url.as_deref().map_or(true, |u| u.is_empty()) {
                return HttpResponse::BadRequest().json(serde_json::json!({
                    "error": "File messages need a file_url",
                    "field": "file_url",
                }));
            }
            None
        }
        Kind::Offer => {
            let Some(payload) = input.offer else {
                return HttpResponse::BadRequest().json(serde_json::json!({
                    "error": "Offer messages need an offer payload",
                    "field": "offer",
                }));
            };
            if payload.amount <= 0 {
                return HttpResponse::BadRequest().json(serde_json::json!({
                    "error": "Offer amount must be a positive integer in the smallest currency unit",
                    "field": "offer.amount",
                }));
            }

            let offer_input = CreateOffer {
                thread_id,
                amount: payload.amount,
                currency: payload.currency,
                terms: payload.terms,
                event_date: payload.event_date,
                expires_at: payload.expires_at,
            };

            let offer = match offer_db::insert_offer(db.get_ref(), offer_input, sender_id).await {
                Ok(offer) => offer,
                Err(e) => {
                    return HttpResponse::InternalServerError().json(serde_json::json!({
                        "error": format!("Failed to create offer: {e}"),
                    }));
                }
            };

            if let Err(e) = thread_db::set_thread_state(db.get_ref(), thread_id, State::Quote).await
            {
                tracing::warn!("Failed to relabel thread {thread_id} to quote: {e}");
            }

            Some(offer.id)
        }
        Kind::System => {
            return HttpResponse::BadRequest().json(serde_json::json!({
                "error": "System messages are generated by the server",
                "field": "kind",
            }));
        }
    };

    let message = CreateMessage {
        thread_id,
        sender_id,
        kind: input.kind,
        body: input.body,
        file_url: input.file_url,
        offer_id,
    };

    match message_db::insert_message(db.get_ref(), message).await {
        Ok(created) => HttpResponse::Created().json(serde_json::json!({
            "message": created,
            "offer_id": offer_id,
        })),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to post message: {e}"),
        })),
    }
}

/// GET /api/threads/{id}/messages — message history, newest first, cursor
/// paginated (participants only).
pub async fn get_messages(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    query: web::Query<MessageQuery>,
) -> impl Responder {
    let thread_id = path.into_inner();

    if let Err(resp) = verify_thread_participant(db.get_ref(), thread_id, user.0.id).await {
        return resp;
    }

    match message_db::get_messages_by_thread(
        db.get_ref(),
        thread_id,
        query.limit(),
        query.cursor_created_at,
        query.cursor_id,
    )
    .await
    {
        Ok(messages) => HttpResponse::Ok().json(messages),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Database error: {e}"),
        })),
    }
}
