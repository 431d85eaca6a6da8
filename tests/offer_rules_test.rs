//! Tests for the offer resolution rules: who may move a pending offer where,
//! and how the booking parties are assigned on acceptance.
//!
//! Run with: `cargo test --test offer_rules_test`
use uuid::Uuid;

use stagetime_backend::models::offers::{
    Action, ResolutionError, Status, assign_booking_parties, resolution_target,
};
use stagetime_backend::models::users::Roles;

fn ids() -> (Uuid, Uuid) {
    (Uuid::new_v4(), Uuid::new_v4())
}

#[test]
fn test_counterparty_can_accept_pending_offer() {
    let (author, counterparty) = ids();
    let result = resolution_target(Status::Pending, author, counterparty, true, Action::Accept);
    assert_eq!(result, Ok(Status::Accepted));
}

#[test]
fn test_counterparty_can_decline_pending_offer() {
    let (author, counterparty) = ids();
    let result = resolution_target(Status::Pending, author, counterparty, true, Action::Decline);
    assert_eq!(result, Ok(Status::Declined));
}

#[test]
fn test_author_can_withdraw_pending_offer() {
    let (author, _) = ids();
    let result = resolution_target(Status::Pending, author, author, true, Action::Withdraw);
    assert_eq!(result, Ok(Status::Withdrawn));
}

#[test]
fn test_author_cannot_accept_own_offer() {
    let (author, _) = ids();
    let result = resolution_target(Status::Pending, author, author, true, Action::Accept);
    assert_eq!(result, Err(ResolutionError::OwnOffer));
}

#[test]
fn test_author_cannot_decline_own_offer() {
    let (author, _) = ids();
    let result = resolution_target(Status::Pending, author, author, true, Action::Decline);
    assert_eq!(result, Err(ResolutionError::OwnOffer));
}

#[test]
fn test_counterparty_cannot_withdraw() {
    let (author, counterparty) = ids();
    let result = resolution_target(Status::Pending, author, counterparty, true, Action::Withdraw);
    assert_eq!(result, Err(ResolutionError::NotYourOffer));
}

#[test]
fn test_outsider_is_rejected_for_every_action() {
    let (author, outsider) = ids();
    for action in [Action::Accept, Action::Decline, Action::Withdraw] {
        let result = resolution_target(Status::Pending, author, outsider, false, action);
        assert_eq!(result, Err(ResolutionError::NotParticipant));
    }
}

#[test]
fn test_terminal_offers_never_move_again() {
    let (author, counterparty) = ids();
    for terminal in [Status::Accepted, Status::Declined, Status::Withdrawn] {
        // Counterparty retries accept/decline after resolution.
        for action in [Action::Accept, Action::Decline] {
            let result = resolution_target(terminal, author, counterparty, true, action);
            assert_eq!(result, Err(ResolutionError::AlreadyResolved));
        }
        // Author retries withdraw after resolution.
        let result = resolution_target(terminal, author, author, true, Action::Withdraw);
        assert_eq!(result, Err(ResolutionError::AlreadyResolved));
    }
}

#[test]
fn test_author_poking_resolved_offer_sees_forbidden_not_conflict() {
    let (author, _) = ids();
    let result = resolution_target(Status::Accepted, author, author, true, Action::Accept);
    assert_eq!(result, Err(ResolutionError::OwnOffer));
}

#[test]
fn test_comedian_author_becomes_comedian_on_accept() {
    let (comedian, promoter) = ids();
    let parties = assign_booking_parties((Roles::Comedian, comedian), (Roles::Promoter, promoter));
    assert_eq!(parties, Some((comedian, promoter)));
}

#[test]
fn test_comedian_acceptor_becomes_comedian_on_accept() {
    let (promoter, comedian) = ids();
    let parties = assign_booking_parties((Roles::Promoter, promoter), (Roles::Comedian, comedian));
    assert_eq!(parties, Some((comedian, promoter)));
}

#[test]
fn test_venue_counterparty_takes_promoter_side() {
    let (venue, comedian) = ids();
    let parties = assign_booking_parties((Roles::Venue, venue), (Roles::Comedian, comedian));
    assert_eq!(parties, Some((comedian, venue)));
}

#[test]
fn test_no_comedian_in_pair_is_rejected() {
    let (promoter, venue) = ids();
    assert_eq!(
        assign_booking_parties((Roles::Promoter, promoter), (Roles::Venue, venue)),
        None
    );
}

#[test]
fn test_two_comedians_in_pair_is_rejected() {
    let (a, b) = ids();
    assert_eq!(
        assign_booking_parties((Roles::Comedian, a), (Roles::Comedian, b)),
        None
    );
}
