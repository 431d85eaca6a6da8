use actix_web::{HttpResponse, Responder, web};
use sea_orm::DatabaseConnection;

use crate::auth::middleware::AuthenticatedUser;
use crate::db::bookings as booking_db;
use crate::db::gigs as gig_db;
use crate::db::reviews as review_db;
use crate::models::reviews::{CreateReview, ReviewQuery, booking_qualifies, validate_fields};
use crate::rate_limit::{self, RateLimiter};

/// POST /api/reviews — review the counterparty of a finished show.
///
/// The gate, in order: no self-review, gig exists, a booking links the two
/// parties in either orientation, that booking is Paid or Completed, the
/// show date has passed, and the author has not already reviewed this gig.
pub async fn create_review(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    limiter: web::Data<RateLimiter>,
    body: web::Json<CreateReview>,
) -> impl Responder {
    let author_id = user.0.id;
    let input = body.into_inner();

    if let Err(resp) = rate_limit::enforce(&limiter, "reviews:create", author_id) {
        return resp;
    }

    if let Err((field, message)) = validate_fields(input.rating, &input.comment) {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": message,
            "field": field,
        }));
    }

    // 1. No reviewing yourself.
    if input.subject_user_id == author_id {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": "You cannot review yourself",
        }));
    }

    // 2. The gig must exist.
    let gig = match gig_db::get_gig_by_id(db.get_ref(), input.gig_id).await {
        Ok(Some(gig)) => gig,
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
    };

    // 3. A booking must link author and subject on this gig, either way
    //    around.
    let bookings = match booking_db::get_bookings_between(
        db.get_ref(),
        input.gig_id,
        author_id,
        input.subject_user_id,
    )
    .await
    {
        Ok(bookings) => bookings,
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    };

    if bookings.is_empty() {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": "No booking between you and this user for this gig",
        }));
    }

    // 4. The booking must have reached Paid or Completed.
    if !bookings
        .iter()
        .any(|b| booking_qualifies(b, author_id, input.subject_user_id))
    {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": "Reviews require a paid or completed booking",
        }));
    }

    // 5. The show must have happened.
    if gig.date_start > chrono::Utc::now() {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": "Reviews are available after the show",
        }));
    }

    // 6. One review per (author, gig).
    match review_db::review_exists(db.get_ref(), author_id, input.gig_id).await {
        Ok(true) => {
            return HttpResponse::Conflict().json(serde_json::json!({
                "error": "You have already reviewed this gig",
            }));
        }
        Ok(false) => {}
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    }

    // 7. Persist.
    match review_db::insert_review(db.get_ref(), input, author_id).await {
        Ok(review) => HttpResponse::Created().json(review),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to create review: {e}"),
        })),
    }
}

/// GET /api/reviews?subject_user_id=|gig_id= — list reviews by exactly one
/// filter.
pub async fn get_reviews(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    query: web::Query<ReviewQuery>,
) -> impl Responder {
    match (query.subject_user_id, query.gig_id) {
        (Some(subject_user_id), None) => {
            match review_db::get_reviews_for_user(db.get_ref(), subject_user_id).await {
                Ok(reviews) => HttpResponse::Ok().json(reviews),
                Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
                    "error": format!("Database error: {e}"),
                })),
            }
        }
        (None, Some(gig_id)) => match review_db::get_reviews_for_gig(db.get_ref(), gig_id).await {
            Ok(reviews) => HttpResponse::Ok().json(reviews),
            Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            })),
        },
        _ => HttpResponse::BadRequest().json(serde_json::json!({
            "error": "Provide exactly one of subject_user_id or gig_id",
        })),
    }
}
