use actix_web::FromRequest;
use actix_web::{Error, HttpRequest, dev::Payload, web};
use sea_orm::DatabaseConnection;
use std::future::Future;
use std::pin::Pin;

use crate::auth::jwt;
use crate::db::users::get_user_by_id;
use crate::models::users;

/// Name of the session cookie set on login.
pub const SESSION_COOKIE: &str = "session";

/// Wrapper type to store the HS256 session secret in Actix app data.
#[derive(Clone)]
pub struct SessionSecret(pub String);

pub struct AuthenticatedUser(pub users::Model);

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            // 1. Take the token from the session cookie; fall back to a
            //    Bearer header for non-browser API clients.
            let token = match req.cookie(SESSION_COOKIE) {
                Some(cookie) => cookie.value().to_string(),
                None => req
                    .headers()
                    .get("Authorization")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.strip_prefix("Bearer "))
                    .map(str::to_string)
                    .ok_or_else(|| {
                        actix_web::error::ErrorUnauthorized("Missing session cookie")
                    })?,
            };

            // 2. Get the signing secret from app data.
            let secret = req.app_data::<web::Data<SessionSecret>>().ok_or_else(|| {
                actix_web::error::ErrorInternalServerError("Session secret not configured")
            })?;

            // 3. Validate signature and expiry.
            let claims = jwt::validate_token(&token, &secret.0)
                .map_err(|e| actix_web::error::ErrorUnauthorized(format!("Invalid session: {e}")))?;

            let user_id = claims
                .user_id()
                .map_err(actix_web::error::ErrorUnauthorized)?;

            // 4. Load the user row; role and verification checks always run
            //    against current data, never against token claims.
            let db = req
                .app_data::<web::Data<DatabaseConnection>>()
                .ok_or_else(|| {
                    actix_web::error::ErrorInternalServerError("Database not configured")
                })?;

            let user = get_user_by_id(db.get_ref(), user_id)
                .await
                .map_err(|e| {
                    actix_web::error::ErrorInternalServerError(format!("Database error: {e}"))
                })?
                .ok_or_else(|| {
                    actix_web::error::ErrorUnauthorized("Session user no longer exists")
                })?;

            Ok(AuthenticatedUser(user))
        })
    }
}
