use actix_web::{HttpResponse, Responder, web};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::middleware::AuthenticatedUser;
use crate::db::posts as post_db;
use crate::models::PaginationQuery;
use crate::models::post_votes::VoteRequest;
use crate::models::posts::{CreatePost, PostResponse};
use crate::models::users::Roles;
use crate::rate_limit::{self, RateLimiter};

/// POST /api/posts — publish a community board post.
pub async fn create_post(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    limiter: web::Data<RateLimiter>,
    body: web::Json<CreatePost>,
) -> impl Responder {
    let input = body.into_inner();

    if let Err(resp) = rate_limit::enforce(&limiter, "posts:create", user.0.id) {
        return resp;
    }

    if input.title.trim().is_empty() {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": "Title must not be empty",
            "field": "title",
        }));
    }
    if input.body.trim().is_empty() {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": "Body must not be empty",
            "field": "body",
        }));
    }

    match post_db::insert_post(db.get_ref(), input, user.0.id).await {
        Ok(post) => HttpResponse::Created().json(PostResponse::from_parts(post, 0)),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to create post: {e}"),
        })),
    }
}

/// GET /api/posts — list posts with scores, newest first.
pub async fn get_posts(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    query: web::Query<PaginationQuery>,
) -> impl Responder {
    let posts = match post_db::get_posts_paginated(db.get_ref(), query.page(), query.limit()).await
    {
        Ok(posts) => posts,
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    };

    let post_ids: Vec<Uuid> = posts.iter().map(|p| p.id).collect();
    let scores = match post_db::get_scores_for_posts(db.get_ref(), post_ids).await {
        Ok(scores) => scores,
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    };

    let response: Vec<PostResponse> = posts
        .into_iter()
        .map(|p| {
            let score = scores.get(&p.id).copied().unwrap_or(0);
            PostResponse::from_parts(p, score)
        })
        .collect();

    HttpResponse::Ok().json(response)
}

/// GET /api/posts/{id} — a single post with its score.
pub async fn get_post(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let id = path.into_inner();

    let post = match post_db::get_post_by_id(db.get_ref(), id).await {
        Ok(Some(post)) => post,
        Ok(None) => {
            return HttpResponse::NotFound().json(serde_json::json!({
                "error": format!("Post {id} not found"),
            }));
        }
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    };

    match post_db::get_post_score(db.get_ref(), id).await {
        Ok(score) => HttpResponse::Ok().json(PostResponse::from_parts(post, score)),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Database error: {e}"),
        })),
    }
}

/// DELETE /api/posts/{id} — author or Admin removes a post.
pub async fn delete_post(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let id = path.into_inner();

    let post = match post_db::get_post_by_id(db.get_ref(), id).await {
        Ok(Some(post)) => post,
        Ok(None) => {
            return HttpResponse::NotFound().json(serde_json::json!({
                "error": format!("Post {id} not found"),
            }));
        }
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    };

    if post.author_id != user.0.id && user.0.role != Roles::Admin {
        return HttpResponse::Forbidden().json(serde_json::json!({
            "error": "You can only delete your own posts",
        }));
    }

    match post_db::delete_post(db.get_ref(), id).await {
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({
            "message": format!("Post {id} deleted"),
        })),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to delete post: {e}"),
        })),
    }
}

/// POST /api/posts/{id}/vote — up- or down-vote a post. Re-voting replaces
/// the previous vote.
pub async fn vote_post(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    limiter: web::Data<RateLimiter>,
    path: web::Path<Uuid>,
    body: web::Json<VoteRequest>,
) -> impl Responder {
    let post_id = path.into_inner();
    let value = body.value;

    if let Err(resp) = rate_limit::enforce(&limiter, "posts:vote", user.0.id) {
        return resp;
    }

    if value != 1 && value != -1 {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": "Vote value must be 1 or -1",
            "field": "value",
        }));
    }

    match post_db::get_post_by_id(db.get_ref(), post_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return HttpResponse::NotFound().json(serde_json::json!({
                "error": format!("Post {post_id} not found"),
            }));
        }
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    }

    if let Err(e) = post_db::upsert_vote(db.get_ref(), post_id, user.0.id, value).await {
        return HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to record vote: {e}"),
        }));
    }

    match post_db::get_post_score(db.get_ref(), post_id).await {
        Ok(score) => HttpResponse::Ok().json(serde_json::json!({
            "post_id": post_id,
            "score": score,
        })),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Database error: {e}"),
        })),
    }
}
