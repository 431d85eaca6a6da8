//! Tests for booking status transitions and the mock payment reference.
//!
//! Run with: `cargo test --test booking_rules_test`
use std::collections::HashSet;

use stagetime_backend::models::bookings::{Status, can_transition, new_payment_intent_id};

#[test]
fn test_pending_can_be_paid_or_cancelled() {
    assert!(can_transition(Status::Pending, Status::Paid));
    assert!(can_transition(Status::Pending, Status::Cancelled));
    assert!(!can_transition(Status::Pending, Status::Completed));
}

#[test]
fn test_paid_can_complete_or_cancel() {
    assert!(can_transition(Status::Paid, Status::Completed));
    assert!(can_transition(Status::Paid, Status::Cancelled));
    assert!(!can_transition(Status::Paid, Status::Pending));
}

#[test]
fn test_terminal_states_never_move() {
    for terminal in [Status::Completed, Status::Cancelled] {
        for target in [
            Status::Pending,
            Status::Paid,
            Status::Completed,
            Status::Cancelled,
        ] {
            assert!(
                !can_transition(terminal, target),
                "{terminal:?} -> {target:?} should be rejected"
            );
        }
    }
}

#[test]
fn test_no_self_transitions() {
    for status in [Status::Pending, Status::Paid] {
        assert!(!can_transition(status, status));
    }
}

#[test]
fn test_paid_is_not_reachable_backwards() {
    assert!(!can_transition(Status::Completed, Status::Paid));
    assert!(!can_transition(Status::Cancelled, Status::Paid));
}

#[test]
fn test_payment_intent_id_format() {
    let id = new_payment_intent_id();
    assert!(id.starts_with("pi_"));
    // 32 hex chars of a simple-formatted uuid after the prefix.
    assert_eq!(id.len(), 3 + 32);
    assert!(id[3..].chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn test_payment_intent_ids_are_unique() {
    let ids: HashSet<String> = (0..100).map(|_| new_payment_intent_id()).collect();
    assert_eq!(ids.len(), 100);
}
