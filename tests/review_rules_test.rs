//! Tests for the review gate: field validation and the booking
//! qualification check.
//!
//! Run with: `cargo test --test review_rules_test`
use uuid::Uuid;

use stagetime_backend::models::bookings;
use stagetime_backend::models::reviews::{booking_qualifies, validate_fields};

fn booking(comedian_id: Uuid, promoter_id: Uuid, status: bookings::Status) -> bookings::Model {
    bookings::Model {
        id: Uuid::new_v4(),
        gig_id: Uuid::new_v4(),
        comedian_id,
        promoter_id,
        offer_id: Some(Uuid::new_v4()),
        status,
        payment_intent_id: None,
        created_at: chrono::Utc::now(),
        updated_at: None,
    }
}

#[test]
fn test_rating_bounds() {
    assert!(validate_fields(1, "plenty long comment").is_ok());
    assert!(validate_fields(5, "plenty long comment").is_ok());

    for bad in [0, 6, -1] {
        let err = validate_fields(bad, "plenty long comment").unwrap_err();
        assert_eq!(err.0, "rating");
    }
}

#[test]
fn test_comment_minimum_length() {
    let err = validate_fields(4, "too short").unwrap_err();
    assert_eq!(err.0, "comment");

    // Exactly ten characters passes.
    assert!(validate_fields(4, "ab cd ef g").is_ok());
}

#[test]
fn test_paid_booking_qualifies_in_either_orientation() {
    let comedian = Uuid::new_v4();
    let promoter = Uuid::new_v4();
    let b = booking(comedian, promoter, bookings::Status::Paid);

    // Comedian reviewing promoter and promoter reviewing comedian.
    assert!(booking_qualifies(&b, comedian, promoter));
    assert!(booking_qualifies(&b, promoter, comedian));
}

#[test]
fn test_completed_booking_qualifies() {
    let comedian = Uuid::new_v4();
    let promoter = Uuid::new_v4();
    let b = booking(comedian, promoter, bookings::Status::Completed);
    assert!(booking_qualifies(&b, comedian, promoter));
}

#[test]
fn test_pending_and_cancelled_bookings_do_not_qualify() {
    let comedian = Uuid::new_v4();
    let promoter = Uuid::new_v4();

    for status in [bookings::Status::Pending, bookings::Status::Cancelled] {
        let b = booking(comedian, promoter, status);
        assert!(!booking_qualifies(&b, comedian, promoter));
    }
}

#[test]
fn test_unrelated_pair_does_not_qualify() {
    let b = booking(Uuid::new_v4(), Uuid::new_v4(), bookings::Status::Paid);
    assert!(!booking_qualifies(&b, Uuid::new_v4(), Uuid::new_v4()));
}

#[test]
fn test_partial_party_match_does_not_qualify() {
    let comedian = Uuid::new_v4();
    let promoter = Uuid::new_v4();
    let stranger = Uuid::new_v4();
    let b = booking(comedian, promoter, bookings::Status::Paid);

    // The author is on the booking, but the subject is not.
    assert!(!booking_qualifies(&b, comedian, stranger));
}
