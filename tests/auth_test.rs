//! Integration tests for the session-token and password layer.
//!
//! Tokens are minted and validated with the same HS256 secret the server
//! would load from `SESSION_SECRET`. No running server or database is
//! needed.
//!
//! Run with: `cargo test --test auth_test`
use uuid::Uuid;

use stagetime_backend::auth::jwt::{SESSION_TTL_SECS, mint_token, validate_token};
use stagetime_backend::auth::password::{hash_password, verify_password};
use stagetime_backend::models::users::Roles;

/// A fake secret for testing — never use the real one in tests committed to git.
const TEST_SECRET: &str = "test-secret-at-least-256-bits-long-for-hs256-xxxxxxx";

#[test]
fn test_valid_token_round_trips() {
    let user_id = Uuid::new_v4();
    let token =
        mint_token(user_id, Roles::Comedian, TEST_SECRET, SESSION_TTL_SECS).expect("mint failed");

    let claims = validate_token(&token, TEST_SECRET).expect("Token should be valid");

    assert_eq!(claims.sub, user_id.to_string());
    assert_eq!(claims.user_id().unwrap(), user_id);
    assert_eq!(claims.role, Roles::Comedian);
    assert!(claims.exp > claims.iat);
}

#[test]
fn test_expired_token_is_rejected() {
    let user_id = Uuid::new_v4();
    // Expired 5 minutes ago, well past the 60s default leeway.
    let token = mint_token(user_id, Roles::Fan, TEST_SECRET, -300).expect("mint failed");

    let result = validate_token(&token, TEST_SECRET);
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("ExpiredSignature"));
}

#[test]
fn test_wrong_secret_is_rejected() {
    let token = mint_token(
        Uuid::new_v4(),
        Roles::Promoter,
        TEST_SECRET,
        SESSION_TTL_SECS,
    )
    .expect("mint failed");

    let result = validate_token(&token, "completely-wrong-secret-xxxxxxxxxxxxxxxxxxx");
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("InvalidSignature"));
}

#[test]
fn test_garbage_token_is_rejected() {
    let result = validate_token("not.a.valid.jwt", TEST_SECRET);
    assert!(result.is_err());
}

#[test]
fn test_password_hash_round_trip() {
    let hash = hash_password("correct horse battery staple").expect("hash failed");

    // PHC string, not the password itself.
    assert!(hash.starts_with("$argon2"));
    assert!(!hash.contains("correct horse"));

    assert!(verify_password("correct horse battery staple", &hash));
    assert!(!verify_password("wrong password", &hash));
}

#[test]
fn test_malformed_hash_verifies_false() {
    assert!(!verify_password("anything", "not-a-phc-string"));
    assert!(!verify_password("anything", ""));
}

#[test]
fn test_two_hashes_of_same_password_differ() {
    // Fresh salt per hash.
    let a = hash_password("same-password").unwrap();
    let b = hash_password("same-password").unwrap();
    assert_ne!(a, b);
    assert!(verify_password("same-password", &a));
    assert!(verify_password("same-password", &b));
}
