use actix_web::cookie::{Cookie, SameSite, time};
use actix_web::{HttpResponse, Responder, web};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::jwt::{self, SESSION_TTL_SECS};
use crate::auth::middleware::{AuthenticatedUser, SESSION_COOKIE, SessionSecret};
use crate::auth::password;
use crate::db::users as user_db;
use crate::models::users::{CreateUser, LoginUser, RegisterUser, UserResponse};
use crate::rate_limit::RateLimiter;

fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, token)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::seconds(SESSION_TTL_SECS))
        .finish()
}

/// POST /api/auth/register — create an account and start a session.
///
/// The role is chosen here and never changes through the API afterwards.
pub async fn register(
    db: web::Data<DatabaseConnection>,
    secret: web::Data<SessionSecret>,
    limiter: web::Data<RateLimiter>,
    body: web::Json<RegisterUser>,
) -> impl Responder {
    let input = body.into_inner();

    // Pre-auth endpoint: key the rate limit on the claimed email.
    if !limiter.check(&format!("auth:register:{}", input.email)) {
        return HttpResponse::TooManyRequests().json(serde_json::json!({
            "error": "Rate limit exceeded, try again later",
        }));
    }

    if !input.email.contains('@') {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": "Invalid email address",
            "field": "email",
        }));
    }
    if input.password.len() < 8 {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": "Password must be at least 8 characters",
            "field": "password",
        }));
    }

    match user_db::get_user_by_email(db.get_ref(), &input.email).await {
        Ok(Some(_)) => {
            return HttpResponse::Conflict().json(serde_json::json!({
                "error": "An account with this email already exists",
            }));
        }
        Ok(None) => {}
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    }

    let password_hash = match password::hash_password(&input.password) {
        Ok(hash) => hash,
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Failed to hash password: {e}"),
            }));
        }
    };

    let new_user = CreateUser {
        id: Uuid::new_v4(),
        email: input.email,
        username: input.username,
        display_name: input.display_name,
        password_hash,
        role: input.role,
    };

    let user = match user_db::insert_user(db.get_ref(), new_user).await {
        Ok(user) => user,
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Failed to create user: {e}"),
            }));
        }
    };

    let token = match jwt::mint_token(user.id, user.role, &secret.0, SESSION_TTL_SECS) {
        Ok(token) => token,
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Failed to mint session token: {e}"),
            }));
        }
    };

    HttpResponse::Created()
        .cookie(session_cookie(token.clone()))
        .json(serde_json::json!({
            "user": UserResponse::from(user),
            "token": token,
        }))
}

/// POST /api/auth/login — verify credentials and start a session.
pub async fn login(
    db: web::Data<DatabaseConnection>,
    secret: web::Data<SessionSecret>,
    limiter: web::Data<RateLimiter>,
    body: web::Json<LoginUser>,
) -> impl Responder {
    let input = body.into_inner();

    if !limiter.check(&format!("auth:login:{}", input.email)) {
        return HttpResponse::TooManyRequests().json(serde_json::json!({
            "error": "Rate limit exceeded, try again later",
        }));
    }

    let user = match user_db::get_user_by_email(db.get_ref(), &input.email).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return HttpResponse::Unauthorized().json(serde_json::json!({
                "error": "Invalid email or password",
            }));
        }
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    };

    if !password::verify_password(&input.password, &user.password_hash) {
        return HttpResponse::Unauthorized().json(serde_json::json!({
            "error": "Invalid email or password",
        }));
    }

    let token = match jwt::mint_token(user.id, user.role, &secret.0, SESSION_TTL_SECS) {
        Ok(token) => token,
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Failed to mint session token: {e}"),
            }));
        }
    };

    HttpResponse::Ok()
        .cookie(session_cookie(token.clone()))
        .json(serde_json::json!({
            "user": UserResponse::from(user),
            "token": token,
        }))
}

/// POST /api/auth/logout — clear the session cookie.
pub async fn logout(_user: AuthenticatedUser) -> impl Responder {
    let mut expired = Cookie::build(SESSION_COOKIE, "")
        .path("/")
        .http_only(true)
        .finish();
    expired.make_removal();

    HttpResponse::Ok().cookie(expired).json(serde_json::json!({
        "message": "Logged out",
    }))
}

/// GET /api/auth/me — return the currently authenticated user's profile.
pub async fn me(user: AuthenticatedUser) -> impl Responder {
    HttpResponse::Ok().json(UserResponse::from(user.0))
}
