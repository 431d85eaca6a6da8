//! Tests for the fixed-window rate limiter. Time is injected through
//! `check_at`, so no test sleeps.
//!
//! Run with: `cargo test --test rate_limit_test`
use std::time::{Duration, Instant};
use uuid::Uuid;

use stagetime_backend::rate_limit::{DEFAULT_MAX_REQUESTS, DEFAULT_WINDOW, RateLimiter, key};

#[test]
fn test_allows_exactly_thirty_in_a_window() {
    let limiter = RateLimiter::default();
    let now = Instant::now();
    let k = key("offers:create", Uuid::new_v4());

    for i in 0..DEFAULT_MAX_REQUESTS {
        assert!(limiter.check_at(&k, now), "request {} should pass", i + 1);
    }

    // The 31st is refused.
    assert!(!limiter.check_at(&k, now));
}

#[test]
fn test_refusals_continue_until_window_lapses() {
    let limiter = RateLimiter::new(5, Duration::from_secs(60));
    let start = Instant::now();

    for _ in 0..5 {
        assert!(limiter.check_at("k", start));
    }

    // Still inside the window: refused, even late in it.
    assert!(!limiter.check_at("k", start + Duration::from_secs(59)));

    // Window lapsed: the counter resets lazily on next access.
    assert!(limiter.check_at("k", start + Duration::from_secs(60)));
}

#[test]
fn test_reset_window_gets_full_budget() {
    let limiter = RateLimiter::new(3, Duration::from_secs(60));
    let start = Instant::now();

    for _ in 0..3 {
        assert!(limiter.check_at("k", start));
    }
    assert!(!limiter.check_at("k", start));

    let later = start + Duration::from_secs(61);
    for _ in 0..3 {
        assert!(limiter.check_at("k", later));
    }
    assert!(!limiter.check_at("k", later));
}

#[test]
fn test_keys_are_isolated() {
    let limiter = RateLimiter::new(1, DEFAULT_WINDOW);
    let now = Instant::now();
    let user_a = Uuid::new_v4();
    let user_b = Uuid::new_v4();

    assert!(limiter.check_at(&key("offers:create", user_a), now));
    assert!(!limiter.check_at(&key("offers:create", user_a), now));

    // Same action, different identity: unaffected.
    assert!(limiter.check_at(&key("offers:create", user_b), now));

    // Same identity, different action: unaffected.
    assert!(limiter.check_at(&key("bookings:pay", user_a), now));
}

#[test]
fn test_key_format() {
    let id = Uuid::new_v4();
    assert_eq!(key("offers:create", id), format!("offers:create:{id}"));
}
