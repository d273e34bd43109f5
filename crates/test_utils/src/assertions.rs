//! Custom Test Assertions
//!
//! Specialized assertion helpers for domain types that give more meaningful
//! error messages than standard assertions.

use core_kernel::UserId;
use domain_claims::{Claim, ClaimStatus};
use domain_posts::{Post, PostStatus};

/// Asserts that a post is Unclaimed with no winner recorded
pub fn assert_post_unclaimed(post: &Post) {
    assert_eq!(
        post.status,
        PostStatus::Unclaimed,
        "expected post {} to be unclaimed, was {}",
        post.id,
        post.status
    );
    assert!(
        post.claimed_by.is_none() && post.found_by.is_none(),
        "unclaimed post {} must not record a winner",
        post.id
    );
}

/// Asserts that a post is ClaimInProgress
pub fn assert_post_claim_in_progress(post: &Post) {
    assert_eq!(
        post.status,
        PostStatus::ClaimInProgress,
        "expected post {} to be claim_in_progress, was {}",
        post.id,
        post.status
    );
}

/// Asserts that a FOUND post was claimed by the given user
pub fn assert_post_claimed_by(post: &Post, user: UserId) {
    assert_eq!(
        post.status,
        PostStatus::Claimed,
        "expected post {} to be claimed, was {}",
        post.id,
        post.status
    );
    assert_eq!(
        post.claimed_by,
        Some(user),
        "post {} claimed_by mismatch",
        post.id
    );
}

/// Asserts that a LOST post's item was found by the given user
pub fn assert_post_found_by(post: &Post, user: UserId) {
    assert_eq!(
        post.status,
        PostStatus::Claimed,
        "expected post {} to be claimed, was {}",
        post.id,
        post.status
    );
    assert_eq!(
        post.found_by,
        Some(user),
        "post {} found_by mismatch",
        post.id
    );
}

/// Asserts that a claim is Pending
pub fn assert_claim_pending(claim: &Claim) {
    assert_eq!(
        claim.status,
        ClaimStatus::Pending,
        "expected claim {} to be pending, was {}",
        claim.id,
        claim.status
    );
}

/// Asserts that a claim is Approved with its timestamp stamped
pub fn assert_claim_approved(claim: &Claim) {
    assert_eq!(
        claim.status,
        ClaimStatus::Approved,
        "expected claim {} to be approved, was {}",
        claim.id,
        claim.status
    );
    assert!(
        claim.approved_at.is_some(),
        "approved claim {} must have approved_at",
        claim.id
    );
}

/// Asserts that a claim is Denied with its timestamp stamped
pub fn assert_claim_denied(claim: &Claim) {
    assert_eq!(
        claim.status,
        ClaimStatus::Denied,
        "expected claim {} to be denied, was {}",
        claim.id,
        claim.status
    );
    assert!(
        claim.denied_at.is_some(),
        "denied claim {} must have denied_at",
        claim.id
    );
}
