pub mod authorization;
pub mod jwt;
pub mod middleware;
pub mod password;

use thiserror::Error;

/// Failures in the session-token and password layer.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
    #[error("invalid user id in token subject: {0}")]
    BadSubject(String),
    #[error("password hash error: {0}")]
    PasswordHash(String),
}
