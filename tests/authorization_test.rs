//! Tests for the pure role predicates behind the authorization gate.
//!
//! Run with: `cargo test --test authorization_test`
use stagetime_backend::auth::authorization::{can_apply_to_gig, can_create_gig, can_publish_gig};
use stagetime_backend::models::users::{Roles, VerificationStatus};

#[test]
fn test_admin_publishes_regardless_of_verification() {
    for verification in [
        VerificationStatus::Unverified,
        VerificationStatus::Pending,
        VerificationStatus::Approved,
        VerificationStatus::Rejected,
    ] {
        assert!(can_publish_gig(Roles::Admin, verification));
    }
}

#[test]
fn test_promoter_publishes_only_when_approved() {
    assert!(can_publish_gig(Roles::Promoter, VerificationStatus::Approved));
    assert!(!can_publish_gig(Roles::Promoter, VerificationStatus::Pending));
    assert!(!can_publish_gig(
        Roles::Promoter,
        VerificationStatus::Unverified
    ));
    assert!(!can_publish_gig(
        Roles::Promoter,
        VerificationStatus::Rejected
    ));
}

#[test]
fn test_venue_publishes_only_when_approved() {
    assert!(can_publish_gig(Roles::Venue, VerificationStatus::Approved));
    assert!(!can_publish_gig(Roles::Venue, VerificationStatus::Pending));
}

#[test]
fn test_comedians_and_fans_never_publish() {
    for role in [Roles::Comedian, Roles::Fan] {
        assert!(!can_publish_gig(role, VerificationStatus::Approved));
    }
}

#[test]
fn test_only_comedians_apply() {
    assert!(can_apply_to_gig(Roles::Comedian));
    for role in [Roles::Promoter, Roles::Venue, Roles::Fan, Roles::Admin] {
        assert!(!can_apply_to_gig(role));
    }
}

#[test]
fn test_gig_creation_roles() {
    for role in [Roles::Promoter, Roles::Venue, Roles::Admin] {
        assert!(can_create_gig(role));
    }
    for role in [Roles::Comedian, Roles::Fan] {
        assert!(!can_create_gig(role));
    }
}
