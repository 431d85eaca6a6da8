use actix_web::{HttpResponse, Responder, web};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::authorization::{can_apply_to_gig, verify_gig_owner};
use crate::auth::middleware::AuthenticatedUser;
use crate::db::applications as application_db;
use crate::db::gigs as gig_db;
use crate::models::applications::{CreateApplication, Status, UpdateApplicationStatus};
use crate::rate_limit::{self, RateLimiter};

/// POST /api/applications — a comedian applies to a gig.
///
/// The comedian id comes from the session. The gig must exist, only the
/// Comedian role may apply, and one application per (gig, comedian) is
/// allowed.
pub async fn create_application(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    limiter: web::Data<RateLimiter>,
    body: web::Json<CreateApplicationRequest>,
) -> impl Responder {
    let comedian_id = user.0.id;
    let gig_id = body.gig_id;

    if let Err(resp) = rate_limit::enforce(&limiter, "applications:create", comedian_id) {
        return resp;
    }

    // 1. Role gate: only comedians apply.
    if !can_apply_to_gig(user.0.role) {
        return HttpResponse::Forbidden().json(serde_json::json!({
            "error": "Only comedians can apply to gigs",
        }));
    }

    // 2. Verify the gig exists.
    let gig = match gig_db::get_gig_by_id(db.get_ref(), gig_id).await {
        Ok(Some(gig)) => gig,
        Ok(None) => {
            return HttpResponse::NotFound().json(serde_json::json!({
                "error": format!("Gig {gig_id} not found"),
            }));
        }
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    };

    if gig.user_id == comedian_id {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": "You cannot apply to your own gig",
        }));
    }

    // 3. Check for a duplicate application.
    match application_db::application_exists(db.get_ref(), gig_id, comedian_id).await {
        Ok(true) => {
            return HttpResponse::Conflict().json(serde_json::json!({
                "error": "You have already applied to this gig",
            }));
        }
        Ok(false) => {}
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    }

    // 4. Create the application.
    let input = CreateApplication {
        gig_id,
        comedian_id,
        note: body.note.clone(),
    };

    match application_db::insert_application(db.get_ref(), input).await {
        Ok(application) => HttpResponse::Created().json(application),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to create application: {e}"),
        })),
    }
}

/// GET /api/applications — list applications relevant to the authenticated
/// user: those they sent, plus those received on gigs they own.
pub async fn get_applications(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> impl Responder {
    let user_id = user.0.id;

    let sent = match application_db::get_applications_by_comedian_id(db.get_ref(), user_id).await {
        Ok(applications) => applications,
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    };

    let own_gigs = match gig_db::get_gigs_by_user_id(db.get_ref(), user_id).await {
        Ok(gigs) => gigs,
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    };

    let mut received = Vec::new();
    for gig in &own_gigs {
        match application_db::get_applications_by_gig_id(db.get_ref(), gig.id).await {
            Ok(applications) => received.extend(applications),
            Err(e) => {
                return HttpResponse::InternalServerError().json(serde_json::json!({
                    "error": format!("Database error: {e}"),
                }));
            }
        }
    }

    let mut all = sent;
    for application in received {
        if !all.iter().any(|a| a.id == application.id) {
            all.push(application);
        }
    }

    HttpResponse::Ok().json(all)
}

/// GET /api/applications/gig/{gig_id} — all applications on a gig
/// (gig owner or Admin only).
pub async fn get_applications_by_gig(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let gig_id = path.into_inner();

    if let Err(resp) = verify_gig_owner(db.get_ref(), gig_id, user.0.id, user.0.role).await {
        return resp;
    }

    match application_db::get_applications_by_gig_id(db.get_ref(), gig_id).await {
        Ok(applications) => HttpResponse::Ok().json(applications),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Database error: {e}"),
        })),
    }
}

/// PUT /api/applications/{id}/status — gig owner accepts or rejects an
/// application. Only Pending applications move.
pub async fn update_status(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateApplicationStatus>,
) -> impl Responder {
    let application_id = path.into_inner();

    let application = match application_db::get_application_by_id(db.get_ref(), application_id)
        .await
    {
        Ok(Some(a)) => a,
        Ok(None) => {
            return HttpResponse::NotFound().json(serde_json::json!({
                "error": format!("Application {application_id} not found"),
            }));
        }
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    };

    if let Err(resp) =
        verify_gig_owner(db.get_ref(), application.gig_id, user.0.id, user.0.role).await
    {
        return resp;
    }

    if application.status != Status::Pending {
        return HttpResponse::Conflict().json(serde_json::json!({
            "error": format!(
                "Application is already {:?}. Only pending applications can be updated.",
                application.status
            ),
        }));
    }

    match application_db::update_application_status(db.get_ref(), application_id, body.into_inner())
        .await
    {
        Ok(updated) => HttpResponse::Ok().json(updated),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to update application status: {e}"),
        })),
    }
}

/// DELETE /api/applications/{id} — comedian withdraws a pending application.
pub async fn delete_application(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let application_id = path.into_inner();

    let application = match application_db::get_application_by_id(db.get_ref(), application_id)
        .await
    {
        Ok(Some(a)) => a,
        Ok(None) => {
            return HttpResponse::NotFound().json(serde_json::json!({
                "error": format!("Application {application_id} not found"),
            }));
        }
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    };

    if application.comedian_id != user.0.id {
        return HttpResponse::Forbidden().json(serde_json::json!({
            "error": "You can only withdraw your own applications",
        }));
    }

    if application.status != Status::Pending {
        return HttpResponse::Conflict().json(serde_json::json!({
            "error": format!(
                "Application is already {:?}. Only pending applications can be withdrawn.",
                application.status
            ),
        }));
    }

    match application_db::delete_application(db.get_ref(), application_id).await {
        Ok(result) => {
            if result.rows_affected > 0 {
                HttpResponse::Ok().json(serde_json::json!({
                    "message": format!("Application {application_id} withdrawn"),
                }))
            } else {
                HttpResponse::NotFound().json(serde_json::json!({
                    "error": format!("Application {application_id} not found"),
                }))
            }
        }
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to delete application: {e}"),
        })),
    }
}

// ── Request DTOs ──

/// Request body for POST /api/applications.
/// The comedian id comes from the session, not the body.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct CreateApplicationRequest {
    pub gig_id: Uuid,
    pub note: Option<String>,
}
