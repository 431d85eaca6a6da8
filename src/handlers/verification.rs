use actix_web::{HttpResponse, Responder, web};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::middleware::AuthenticatedUser;
use crate::cache::{RedisCache, keys};
use crate::db::users as user_db;
use crate::db::verification as verification_db;
use crate::models::users::{Roles, VerificationStatus};
use crate::models::verification::{CreateVerificationRequest, Status};
use crate::rate_limit::{self, RateLimiter};

/// POST /api/verification — ask to be verified as a promoter or venue.
///
/// One request may be in flight at a time. Submitting moves the user's
/// profile to Pending until an admin decides.
pub async fn create_request(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    limiter: web::Data<RateLimiter>,
    body: web::Json<CreateVerificationRequest>,
) -> impl Responder {
    let user_id = user.0.id;
    let input = body.into_inner();

    if let Err(resp) = rate_limit::enforce(&limiter, "verification:create", user_id) {
        return resp;
    }

    if !matches!(input.requested_role, Roles::Promoter | Roles::Venue) {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": "Verification is available for promoter and venue roles",
            "field": "requested_role",
        }));
    }

    if input.requested_role != user.0.role {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": "You can only request verification for your own role",
            "field": "requested_role",
        }));
    }

    match verification_db::pending_request_exists(db.get_ref(), user_id).await {
        Ok(true) => {
            return HttpResponse::Conflict().json(serde_json::json!({
                "error": "You already have a verification request awaiting review",
            }));
        }
        Ok(false) => {}
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    }

    let request = match verification_db::insert_request(db.get_ref(), input, user_id).await {
        Ok(request) => request,
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Failed to create verification request: {e}"),
            }));
        }
    };

    if let Err(e) =
        user_db::set_verification_status(db.get_ref(), user_id, VerificationStatus::Pending).await
    {
        tracing::warn!("Failed to mirror pending verification onto user {user_id}: {e}");
    }

    HttpResponse::Created().json(request)
}

/// GET /api/verification/mine — the authenticated user's requests.
pub async fn get_my_requests(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> impl Responder {
    match verification_db::get_requests_by_user(db.get_ref(), user.0.id).await {
        Ok(requests) => HttpResponse::Ok().json(requests),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Database error: {e}"),
        })),
    }
}

/// GET /api/verification/pending — the admin review queue, oldest first.
pub async fn get_pending_requests(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> impl Responder {
    if user.0.role != Roles::Admin {
        return HttpResponse::Forbidden().json(serde_json::json!({
            "error": "Only admins can review verification requests",
        }));
    }

    match verification_db::get_pending_requests(db.get_ref()).await {
        Ok(requests) => HttpResponse::Ok().json(requests),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Database error: {e}"),
        })),
    }
}

/// POST /api/verification/{id}/approve — admin approves a request.
pub async fn approve_request(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<Arc<RedisCache>>,
    path: web::Path<Uuid>,
) -> impl Responder {
    review_request(user, db, cache, path.into_inner(), Status::Approved).await
}

/// POST /api/verification/{id}/reject — admin rejects a request.
pub async fn reject_request(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<Arc<RedisCache>>,
    path: web::Path<Uuid>,
) -> impl Responder {
    review_request(user, db, cache, path.into_inner(), Status::Rejected).await
}

/// Shared admin decision path: record the outcome on the request, then
/// mirror it onto the user's profile.
async fn review_request(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<Arc<RedisCache>>,
    request_id: Uuid,
    decision: Status,
) -> HttpResponse {
    if user.0.role != Roles::Admin {
        return HttpResponse::Forbidden().json(serde_json::json!({
            "error": "Only admins can review verification requests",
        }));
    }

    let request = match verification_db::get_request_by_id(db.get_ref(), request_id).await {
        Ok(Some(request)) => request,
        Ok(None) => {
            return HttpResponse::NotFound().json(serde_json::json!({
                "error": format!("Verification request {request_id} not found"),
            }));
        }
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    };

    if request.status != Status::Pending {
        return HttpResponse::Conflict().json(serde_json::json!({
            "error": format!(
                "Request is already {:?}. Only pending requests can be reviewed.",
                request.status
            ),
        }));
    }

    let updated = match verification_db::set_request_status(
        db.get_ref(),
        request_id,
        decision,
        user.0.id,
    )
    .await
    {
        Ok(updated) => updated,
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Failed to update verification request: {e}"),
            }));
        }
    };

    let mirrored = match decision {
        Status::Approved => VerificationStatus::Approved,
        _ => VerificationStatus::Rejected,
    };

    match user_db::set_verification_status(db.get_ref(), request.user_id, mirrored).await {
        Ok(_) => {
            let _ = cache.delete(&keys::user(&request.user_id.to_string())).await;
        }
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Request updated but user mirror failed: {e}"),
            }));
        }
    }

    HttpResponse::Ok().json(updated)
}
