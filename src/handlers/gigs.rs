use actix_web::{HttpResponse, Responder, web};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::authorization::{can_create_gig, can_publish_gig, verify_gig_owner};
use crate::auth::middleware::AuthenticatedUser;
use crate::cache::{self, RedisCache, keys};
use crate::db::gigs as gig_db;
use crate::models::gigs::{CreateGig, GigListQuery, UpdateGig};
use crate::models::users::Roles;
use crate::rate_limit::{self, RateLimiter};

/// GET /api/gigs — list gigs (requires authentication).
///
/// Everyone sees published listings; Admins may pass ?published=false to
/// inspect drafts.
pub async fn get_gigs(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    query: web::Query<GigListQuery>,
) -> impl Responder {
    let published_only = user.0.role != Roles::Admin;

    match gig_db::get_gigs(db.get_ref(), &query, published_only).await {
        Ok(gigs) => HttpResponse::Ok().json(gigs),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to fetch gigs: {e}"),
        })),
    }
}

/// GET /api/gigs/{id} — get a single gig (requires authentication).
///
/// Unpublished gigs are visible only to their owner and Admins.
pub async fn get_gig(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<Arc<RedisCache>>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let id = path.into_inner();
    let cache_key = keys::gig(&id.to_string());

    // Only published gigs are cached, so a cache hit is always servable.
    match cache.get::<crate::models::gigs::Model>(&cache_key).await {
        Ok(Some(cached)) => return HttpResponse::Ok().json(cached),
        Ok(None) => {}
        Err(e) => tracing::warn!("Cache error: {}", e),
    }

    match gig_db::get_gig_by_id(db.get_ref(), id).await {
        Ok(Some(gig)) => {
            if !gig.is_published && gig.user_id != user.0.id && user.0.role != Roles::Admin {
                return HttpResponse::NotFound().json(serde_json::json!({
                    "error": format!("Gig {id} not found"),
                }));
            }
            if gig.is_published {
                let _ = cache.set(&cache_key, &gig, Some(cache::GIG_TTL_SECS)).await;
            }
            HttpResponse::Ok().json(gig)
        }
        Ok(None) => HttpResponse::NotFound().json(serde_json::json!({
            "error": format!("Gig {id} not found"),
        })),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Database error: {e}"),
        })),
    }
}

/// POST /api/gigs — create a new gig listing (Promoter/Venue/Admin only).
///
/// New gigs start unpublished; publishing is a separate, verification-gated
/// step.
pub async fn create_gig(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    limiter: web::Data<RateLimiter>,
    body: web::Json<CreateGig>,
) -> impl Responder {
    if let Err(resp) = rate_limit::enforce(&limiter, "gigs:create", user.0.id) {
        return resp;
    }

    if !can_create_gig(user.0.role) {
        return HttpResponse::Forbidden().json(serde_json::json!({
            "error": "Only promoters and venues can create gig listings",
        }));
    }

    let input = body.into_inner();
    if input.pay_amount <= 0 {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": "Pay must be a positive amount in the smallest currency unit",
            "field": "pay_amount",
        }));
    }

    match gig_db::insert_gig(db.get_ref(), input, user.0.id).await {
        Ok(gig) => HttpResponse::Created().json(gig),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to create gig: {e}"),
        })),
    }
}

/// PUT /api/gigs/{id} — update a gig (owner or Admin).
pub async fn update_gig(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<Arc<RedisCache>>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateGig>,
) -> impl Responder {
    let id = path.into_inner();

    if let Err(resp) = verify_gig_owner(db.get_ref(), id, user.0.id, user.0.role).await {
        return resp;
    }

    match gig_db::update_gig(db.get_ref(), id, body.into_inner()).await {
        Ok(updated) => {
            let _ = cache.delete(&keys::gig(&id.to_string())).await;
            HttpResponse::Ok().json(updated)
        }
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to update gig: {e}"),
        })),
    }
}

/// POST /api/gigs/{id}/publish — make a gig visible in listings.
///
/// Owner or Admin, and the actor must pass the verification gate.
pub async fn publish_gig(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<Arc<RedisCache>>,
    path: web::Path<Uuid>,
) -> impl Responder {
    set_publish_flag(user, db, cache, path.into_inner(), true).await
}

/// POST /api/gigs/{id}/unpublish — pull a gig from listings.
pub async fn unpublish_gig(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<Arc<RedisCache>>,
    path: web::Path<Uuid>,
) -> impl Responder {
    set_publish_flag(user, db, cache, path.into_inner(), false).await
}

async fn set_publish_flag(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<Arc<RedisCache>>,
    id: Uuid,
    published: bool,
) -> HttpResponse {
    if let Err(resp) = verify_gig_owner(db.get_ref(), id, user.0.id, user.0.role).await {
        return resp;
    }

    if !can_publish_gig(user.0.role, user.0.verification_status) {
        return HttpResponse::Forbidden().json(serde_json::json!({
            "error": "Publishing requires an approved verification",
        }));
    }

    match gig_db::set_published(db.get_ref(), id, published).await {
        Ok(updated) => {
            let _ = cache.delete(&keys::gig(&id.to_string())).await;
            HttpResponse::Ok().json(updated)
        }
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to update gig: {e}"),
        })),
    }
}

/// DELETE /api/gigs/{id} — delete a gig (owner or Admin).
pub async fn delete_gig(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<Arc<RedisCache>>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let id = path.into_inner();

    if let Err(resp) = verify_gig_owner(db.get_ref(), id, user.0.id, user.0.role).await {
        return resp;
    }

    match gig_db::delete_gig(db.get_ref(), id).await {
        Ok(result) => {
            if result.rows_affected > 0 {
                let _ = cache.delete(&keys::gig(&id.to_string())).await;
                HttpResponse::Ok().json(serde_json::json!({
                    "message": format!("Gig {id} deleted"),
                }))
            } else {
                HttpResponse::NotFound().json(serde_json::json!({
                    "error": format!("Gig {id} not found"),
                }))
            }
        }
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to delete gig: {e}"),
        })),
    }
}

/// GET /api/gigs/user/{user_id} — list a user's gigs.
///
/// Owners and Admins see drafts too; everyone else gets published gigs only.
pub async fn get_gigs_by_user_id(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let target_user_id = path.into_inner();

    match gig_db::get_gigs_by_user_id(db.get_ref(), target_user_id).await {
        Ok(gigs) => {
            if user.0.id == target_user_id || user.0.role == Roles::Admin {
                HttpResponse::Ok().json(gigs)
            } else {
                let published: Vec<_> = gigs.into_iter().filter(|g| g.is_published).collect();
                HttpResponse::Ok().json(published)
            }
        }
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Database error: {e}"),
        })),
    }
}
