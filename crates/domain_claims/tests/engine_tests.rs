//! Claim engine tests: the post/claim state machine end to end against the
//! in-memory stores

use std::sync::Arc;

use core_kernel::ports::mock::MockObjectStore;
use core_kernel::{PageRequest, PhotoUpload, UserId};
use domain_claims::ports::mock::MockClaimStore;
use domain_claims::{
    ClaimEngine, ClaimError, ClaimQuery, ClaimStatus, ClaimStore, ClaimType,
    CreateClaimRequest, DeletionRole,
};
use domain_posts::ports::mock::MockPostStore;
use domain_posts::{Post, PostStatus, PostStore, PostType};
use test_utils::{
    assert_claim_approved, assert_claim_denied, assert_claim_pending,
    assert_post_claim_in_progress, assert_post_claimed_by, assert_post_found_by,
    assert_post_unclaimed, TestClaimBuilder, TestPostBuilder,
};

struct Harness {
    claims: Arc<MockClaimStore>,
    posts: Arc<MockPostStore>,
    objects: Arc<MockObjectStore>,
    engine: ClaimEngine,
}

fn harness() -> Harness {
    let claims = Arc::new(MockClaimStore::new());
    let posts = Arc::new(MockPostStore::new());
    let objects = Arc::new(MockObjectStore::new());
    let engine = ClaimEngine::new(claims.clone(), posts.clone(), objects.clone());
    Harness {
        claims,
        posts,
        objects,
        engine,
    }
}

async fn seed_found_post(harness: &Harness) -> Post {
    let post = TestPostBuilder::new().with_type(PostType::Found).build();
    harness.posts.seed_post(post.clone()).await;
    post
}

async fn seed_lost_post(harness: &Harness) -> Post {
    let post = TestPostBuilder::new().with_type(PostType::Lost).build();
    harness.posts.seed_post(post.clone()).await;
    post
}

fn claim_request(post: &Post, claimant: UserId) -> CreateClaimRequest {
    CreateClaimRequest {
        post_id: post.id,
        claimant_id: claimant,
        claim_type: ClaimType::required_for(post.post_type),
        message: Some("that's my item, it has my initials on it".to_string()),
        photo_proof: None,
    }
}

// ============================================================================
// Creation
// ============================================================================

mod create_tests {
    use super::*;

    #[tokio::test]
    async fn test_create_claim_flips_post_to_claim_in_progress() {
        let h = harness();
        let post = seed_found_post(&h).await;

        let claim = h.engine.create_claim(claim_request(&post, UserId::new_v7())).await.unwrap();

        assert_claim_pending(&claim);
        assert_eq!(claim.post_id, post.id);
        let post = h.posts.find(post.id).await.unwrap().unwrap();
        assert_post_claim_in_progress(&post);
    }

    #[tokio::test]
    async fn test_create_claim_unknown_post_is_not_found() {
        let h = harness();
        let phantom = TestPostBuilder::new().build();

        let result = h.engine.create_claim(claim_request(&phantom, UserId::new_v7())).await;

        assert!(matches!(result, Err(ClaimError::PostNotFound(_))));
    }

    #[tokio::test]
    async fn test_create_claim_on_claimed_post_conflicts() {
        let h = harness();
        let post = TestPostBuilder::new()
            .with_type(PostType::Found)
            .with_status(PostStatus::Claimed)
            .build();
        h.posts.seed_post(post.clone()).await;

        let result = h.engine.create_claim(claim_request(&post, UserId::new_v7())).await;

        assert!(matches!(result, Err(ClaimError::PostAlreadyClaimed)));
    }

    #[tokio::test]
    async fn test_create_claim_own_post_is_forbidden() {
        let h = harness();
        let post = seed_found_post(&h).await;

        let result = h.engine.create_claim(claim_request(&post, post.owner_id)).await;

        let error = result.unwrap_err();
        assert!(matches!(error, ClaimError::OwnPost));
        assert!(error.is_forbidden());
    }

    #[tokio::test]
    async fn test_create_claim_type_must_match_post_type() {
        let h = harness();
        let lost = seed_lost_post(&h).await;
        let found = seed_found_post(&h).await;

        let mut request = claim_request(&lost, UserId::new_v7());
        request.claim_type = ClaimType::OwnershipClaim;
        assert!(matches!(
            h.engine.create_claim(request).await,
            Err(ClaimError::WrongClaimType { .. })
        ));

        let mut request = claim_request(&found, UserId::new_v7());
        request.claim_type = ClaimType::FinderClaim;
        assert!(matches!(
            h.engine.create_claim(request).await,
            Err(ClaimError::WrongClaimType { .. })
        ));

        // Reserved type never matches
        let mut request = claim_request(&found, UserId::new_v7());
        request.claim_type = ClaimType::OwnerRequest;
        assert!(matches!(
            h.engine.create_claim(request).await,
            Err(ClaimError::WrongClaimType { .. })
        ));
    }

    #[tokio::test]
    async fn test_found_post_requires_message() {
        let h = harness();
        let post = seed_found_post(&h).await;

        let mut request = claim_request(&post, UserId::new_v7());
        request.message = Some("   ".to_string());
        assert!(matches!(
            h.engine.create_claim(request).await,
            Err(ClaimError::MessageRequired)
        ));

        // And the rejected precondition left the post untouched
        let post = h.posts.find(post.id).await.unwrap().unwrap();
        assert_post_unclaimed(&post);
    }

    #[tokio::test]
    async fn test_lost_post_blank_message_gets_canned_text() {
        let h = harness();
        let post = seed_lost_post(&h).await;

        let mut request = claim_request(&post, UserId::new_v7());
        request.message = None;
        let claim = h.engine.create_claim(request).await.unwrap();

        assert!(claim.message.contains("found your lost item"));
    }

    #[tokio::test]
    async fn test_duplicate_claim_conflicts_and_leaves_post_alone() {
        let h = harness();
        let post = seed_found_post(&h).await;
        let claimant = UserId::new_v7();

        // Pre-existing claim without the status flip (simulates the race
        // where the insert wins but this request's precheck ran first)
        h.claims
            .seed_claim(
                TestClaimBuilder::new()
                    .with_post(post.id)
                    .with_claimant(claimant)
                    .with_type(ClaimType::OwnershipClaim)
                    .build(),
            )
            .await;

        let result = h.engine.create_claim(claim_request(&post, claimant)).await;

        let error = result.unwrap_err();
        assert!(matches!(error, ClaimError::DuplicateClaim));
        assert!(error.is_conflict());

        // The failed create must not have mutated the post
        let post = h.posts.find(post.id).await.unwrap().unwrap();
        assert_post_unclaimed(&post);
    }

    #[tokio::test]
    async fn test_second_claimant_succeeds_and_flip_is_idempotent() {
        let h = harness();
        let post = seed_found_post(&h).await;

        h.engine.create_claim(claim_request(&post, UserId::new_v7())).await.unwrap();
        let second = h.engine.create_claim(claim_request(&post, UserId::new_v7())).await.unwrap();

        assert_claim_pending(&second);
        let post = h.posts.find(post.id).await.unwrap().unwrap();
        assert_post_claim_in_progress(&post);
    }

    #[tokio::test]
    async fn test_photo_proof_is_validated_before_upload() {
        let h = harness();
        let post = seed_found_post(&h).await;

        let mut request = claim_request(&post, UserId::new_v7());
        request.photo_proof = Some(PhotoUpload::new(vec![0u8; 64], "proof.gif", "image/gif"));
        assert!(matches!(
            h.engine.create_claim(request).await,
            Err(ClaimError::UnsupportedImageType(_))
        ));
        // Nothing reached object storage
        assert_eq!(h.objects.upload_count().await, 0);

        let mut request = claim_request(&post, UserId::new_v7());
        request.photo_proof = Some(PhotoUpload::new(
            vec![0u8; 6 * 1024 * 1024],
            "proof.jpg",
            "image/jpeg",
        ));
        assert!(matches!(
            h.engine.create_claim(request).await,
            Err(ClaimError::PhotoTooLarge { .. })
        ));
        assert_eq!(h.objects.upload_count().await, 0);
    }

    #[tokio::test]
    async fn test_photo_proof_upload_records_url() {
        let h = harness();
        let post = seed_found_post(&h).await;

        let mut request = claim_request(&post, UserId::new_v7());
        request.photo_proof = Some(PhotoUpload::new(vec![0u8; 256], "receipt.png", "image/png"));
        let claim = h.engine.create_claim(request).await.unwrap();

        assert!(claim.photo_proof.unwrap().ends_with("receipt.png"));
        assert_eq!(h.objects.upload_count().await, 1);
    }
}

// ============================================================================
// Approval
// ============================================================================

mod approve_tests {
    use super::*;

    #[tokio::test]
    async fn test_approve_ownership_claim_marks_post_claimed() {
        let h = harness();
        let post = seed_found_post(&h).await;
        let claimant = UserId::new_v7();
        let claim = h.engine.create_claim(claim_request(&post, claimant)).await.unwrap();

        let approved = h.engine.approve_claim(claim.id, post.owner_id).await.unwrap();

        assert_claim_approved(&approved);
        let post = h.posts.find(post.id).await.unwrap().unwrap();
        assert_post_claimed_by(&post, claimant);
        assert!(post.claimed_at.is_some());
    }

    #[tokio::test]
    async fn test_approve_finder_claim_sets_found_by() {
        let h = harness();
        let post = seed_lost_post(&h).await;
        let finder = UserId::new_v7();
        let claim = h.engine.create_claim(claim_request(&post, finder)).await.unwrap();

        h.engine.approve_claim(claim.id, post.owner_id).await.unwrap();

        let post = h.posts.find(post.id).await.unwrap().unwrap();
        assert_post_found_by(&post, finder);
        assert!(post.claimed_by.is_none());
    }

    #[tokio::test]
    async fn test_approve_denies_pending_siblings() {
        let h = harness();
        let post = seed_found_post(&h).await;
        let winner_user = UserId::new_v7();

        let c1 = h.engine.create_claim(claim_request(&post, winner_user)).await.unwrap();
        let c2 = h.engine.create_claim(claim_request(&post, UserId::new_v7())).await.unwrap();
        let c3 = h.engine.create_claim(claim_request(&post, UserId::new_v7())).await.unwrap();

        h.engine.approve_claim(c1.id, post.owner_id).await.unwrap();

        let c1 = h.claims.find(c1.id).await.unwrap().unwrap();
        let c2 = h.claims.find(c2.id).await.unwrap().unwrap();
        let c3 = h.claims.find(c3.id).await.unwrap().unwrap();
        assert_claim_approved(&c1);
        assert_claim_denied(&c2);
        assert_claim_denied(&c3);
        assert!(c2.denied_at.is_some());

        let post = h.posts.find(post.id).await.unwrap().unwrap();
        assert_post_claimed_by(&post, winner_user);
    }

    #[tokio::test]
    async fn test_approve_requires_post_owner() {
        let h = harness();
        let post = seed_found_post(&h).await;
        let claim = h.engine.create_claim(claim_request(&post, UserId::new_v7())).await.unwrap();

        let result = h.engine.approve_claim(claim.id, UserId::new_v7()).await;

        assert!(matches!(result, Err(ClaimError::NotPostOwner)));
        let claim = h.claims.find(claim.id).await.unwrap().unwrap();
        assert_claim_pending(&claim);
    }

    #[tokio::test]
    async fn test_approval_is_terminal() {
        let h = harness();
        let post = seed_found_post(&h).await;
        let claim = h.engine.create_claim(claim_request(&post, UserId::new_v7())).await.unwrap();

        h.engine.approve_claim(claim.id, post.owner_id).await.unwrap();

        assert!(matches!(
            h.engine.approve_claim(claim.id, post.owner_id).await,
            Err(ClaimError::AlreadyProcessed)
        ));
        assert!(matches!(
            h.engine.deny_claim(claim.id, post.owner_id, None).await,
            Err(ClaimError::AlreadyProcessed)
        ));
    }

    #[tokio::test]
    async fn test_approve_reserved_claim_type_is_invalid() {
        let h = harness();
        let post = seed_found_post(&h).await;
        let claim = TestClaimBuilder::new()
            .with_post(post.id)
            .with_type(ClaimType::OwnerRequest)
            .build();
        h.claims.seed_claim(claim.clone()).await;

        let result = h.engine.approve_claim(claim.id, post.owner_id).await;

        assert!(matches!(result, Err(ClaimError::InvalidForApproval(_))));
    }

    #[tokio::test]
    async fn test_approve_claim_unknown_id_is_not_found() {
        let h = harness();
        let ghost = TestClaimBuilder::new().build();

        let result = h.engine.approve_claim(ghost.id, UserId::new_v7()).await;

        assert!(matches!(result, Err(ClaimError::ClaimNotFound(_))));
    }

    #[tokio::test]
    async fn test_approve_claim_on_deleted_post_is_not_found() {
        let h = harness();
        let post = seed_found_post(&h).await;
        let claim = h.engine.create_claim(claim_request(&post, UserId::new_v7())).await.unwrap();

        h.posts.delete(post.id).await.unwrap();

        let result = h.engine.approve_claim(claim.id, post.owner_id).await;
        assert!(matches!(result, Err(ClaimError::PostNotFound(_))));
    }
}

// ============================================================================
// Denial
// ============================================================================

mod deny_tests {
    use super::*;

    #[tokio::test]
    async fn test_deny_records_reason_and_timestamp() {
        let h = harness();
        let post = seed_found_post(&h).await;
        let claim = h.engine.create_claim(claim_request(&post, UserId::new_v7())).await.unwrap();

        h.engine
            .deny_claim(claim.id, post.owner_id, Some("no receipt".to_string()))
            .await
            .unwrap();

        let claim = h.claims.find(claim.id).await.unwrap().unwrap();
        assert_claim_denied(&claim);
        assert_eq!(claim.denial_reason.as_deref(), Some("no receipt"));
        assert!(claim.denied_at.is_some());
    }

    #[tokio::test]
    async fn test_denying_last_pending_claim_reopens_post() {
        let h = harness();
        let post = seed_found_post(&h).await;
        let claim = h.engine.create_claim(claim_request(&post, UserId::new_v7())).await.unwrap();

        h.engine.deny_claim(claim.id, post.owner_id, None).await.unwrap();

        let post = h.posts.find(post.id).await.unwrap().unwrap();
        assert_post_unclaimed(&post);
        let claim = h.claims.find(claim.id).await.unwrap().unwrap();
        assert_eq!(claim.denial_reason.as_deref(), Some(""));
    }

    #[tokio::test]
    async fn test_denying_one_of_two_keeps_claim_in_progress() {
        let h = harness();
        let post = seed_found_post(&h).await;
        let first = h.engine.create_claim(claim_request(&post, UserId::new_v7())).await.unwrap();
        h.engine.create_claim(claim_request(&post, UserId::new_v7())).await.unwrap();

        h.engine.deny_claim(first.id, post.owner_id, None).await.unwrap();

        let post = h.posts.find(post.id).await.unwrap().unwrap();
        assert_post_claim_in_progress(&post);
    }

    #[tokio::test]
    async fn test_deny_requires_post_owner() {
        let h = harness();
        let post = seed_found_post(&h).await;
        let claim = h.engine.create_claim(claim_request(&post, UserId::new_v7())).await.unwrap();

        let result = h.engine.deny_claim(claim.id, UserId::new_v7(), None).await;

        assert!(matches!(result, Err(ClaimError::NotPostOwner)));
    }
}

// ============================================================================
// Deletion
// ============================================================================

mod delete_tests {
    use super::*;

    #[tokio::test]
    async fn test_claimant_deletes_own_claim() {
        let h = harness();
        let post = seed_found_post(&h).await;
        let claimant = UserId::new_v7();
        let claim = h.engine.create_claim(claim_request(&post, claimant)).await.unwrap();

        h.engine
            .delete_claim(claim.id, claimant, DeletionRole::Claimant)
            .await
            .unwrap();

        assert!(h.claims.find(claim.id).await.unwrap().is_none());
        // Last pending claim gone: the post reopened
        let post = h.posts.find(post.id).await.unwrap().unwrap();
        assert_post_unclaimed(&post);
    }

    #[tokio::test]
    async fn test_claimant_role_rejects_other_users() {
        let h = harness();
        let post = seed_found_post(&h).await;
        let claim = h.engine.create_claim(claim_request(&post, UserId::new_v7())).await.unwrap();

        let result = h
            .engine
            .delete_claim(claim.id, UserId::new_v7(), DeletionRole::Claimant)
            .await;

        assert!(matches!(result, Err(ClaimError::NotClaimant)));
    }

    #[tokio::test]
    async fn test_post_owner_deletes_claim_on_their_post() {
        let h = harness();
        let post = seed_found_post(&h).await;
        let claim = h.engine.create_claim(claim_request(&post, UserId::new_v7())).await.unwrap();

        h.engine
            .delete_claim(claim.id, post.owner_id, DeletionRole::PostOwner)
            .await
            .unwrap();

        assert!(h.claims.find(claim.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_post_owner_role_rejects_non_owner() {
        let h = harness();
        let post = seed_found_post(&h).await;
        let claim = h.engine.create_claim(claim_request(&post, UserId::new_v7())).await.unwrap();

        let result = h
            .engine
            .delete_claim(claim.id, UserId::new_v7(), DeletionRole::PostOwner)
            .await;

        assert!(matches!(result, Err(ClaimError::NotPostOwner)));
    }

    #[tokio::test]
    async fn test_claimant_can_delete_after_post_is_gone() {
        let h = harness();
        let post = seed_found_post(&h).await;
        let claimant = UserId::new_v7();
        let claim = h.engine.create_claim(claim_request(&post, claimant)).await.unwrap();

        h.posts.delete(post.id).await.unwrap();

        // "Post deleted" is not a barrier to claim cleanup
        h.engine
            .delete_claim(claim.id, claimant, DeletionRole::Claimant)
            .await
            .unwrap();
        assert!(h.claims.find(claim.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_post_owner_role_unavailable_after_post_is_gone() {
        let h = harness();
        let post = seed_found_post(&h).await;
        let claim = h.engine.create_claim(claim_request(&post, UserId::new_v7())).await.unwrap();

        h.posts.delete(post.id).await.unwrap();

        let result = h
            .engine
            .delete_claim(claim.id, post.owner_id, DeletionRole::PostOwner)
            .await;
        assert!(matches!(result, Err(ClaimError::PostNotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_with_remaining_pending_keeps_claim_in_progress() {
        let h = harness();
        let post = seed_found_post(&h).await;
        let claimant = UserId::new_v7();
        let first = h.engine.create_claim(claim_request(&post, claimant)).await.unwrap();
        h.engine.create_claim(claim_request(&post, UserId::new_v7())).await.unwrap();

        h.engine
            .delete_claim(first.id, claimant, DeletionRole::Claimant)
            .await
            .unwrap();

        let post = h.posts.find(post.id).await.unwrap().unwrap();
        assert_post_claim_in_progress(&post);
    }

    #[tokio::test]
    async fn test_delete_denied_claim_never_reopens_claimed_post() {
        let h = harness();
        let post = seed_found_post(&h).await;
        let winner = UserId::new_v7();
        let loser = UserId::new_v7();
        let winning = h.engine.create_claim(claim_request(&post, winner)).await.unwrap();
        let losing = h.engine.create_claim(claim_request(&post, loser)).await.unwrap();

        h.engine.approve_claim(winning.id, post.owner_id).await.unwrap();

        // The denied loser cleans up their claim; the post stays Claimed
        h.engine
            .delete_claim(losing.id, loser, DeletionRole::Claimant)
            .await
            .unwrap();

        let post = h.posts.find(post.id).await.unwrap().unwrap();
        assert_post_claimed_by(&post, winner);
    }
}

// ============================================================================
// Queries
// ============================================================================

mod query_tests {
    use super::*;

    #[tokio::test]
    async fn test_claims_for_post_is_owner_only() {
        let h = harness();
        let post = seed_found_post(&h).await;
        h.engine.create_claim(claim_request(&post, UserId::new_v7())).await.unwrap();

        let result = h
            .engine
            .claims_for_post(post.id, UserId::new_v7(), ClaimQuery::default(), PageRequest::default())
            .await;
        assert!(matches!(result, Err(ClaimError::NotPostOwner)));

        let page = h
            .engine
            .claims_for_post(post.id, post.owner_id, ClaimQuery::default(), PageRequest::default())
            .await
            .unwrap();
        assert_eq!(page.claims.len(), 1);
    }

    #[tokio::test]
    async fn test_claims_for_post_stats_group_by_status() {
        let h = harness();
        let post = seed_found_post(&h).await;

        let c1 = h.engine.create_claim(claim_request(&post, UserId::new_v7())).await.unwrap();
        let c2 = h.engine.create_claim(claim_request(&post, UserId::new_v7())).await.unwrap();
        h.engine.create_claim(claim_request(&post, UserId::new_v7())).await.unwrap();
        h.engine.deny_claim(c2.id, post.owner_id, None).await.unwrap();
        h.engine.approve_claim(c1.id, post.owner_id).await.unwrap();

        let page = h
            .engine
            .claims_for_post(post.id, post.owner_id, ClaimQuery::default(), PageRequest::default())
            .await
            .unwrap();

        assert_eq!(page.stats.total, 3);
        assert_eq!(page.stats.approved, 1);
        assert_eq!(page.stats.denied, 2);
        assert_eq!(page.stats.pending, 0);
    }

    #[tokio::test]
    async fn test_claims_for_post_filters_by_status() {
        let h = harness();
        let post = seed_found_post(&h).await;
        let c1 = h.engine.create_claim(claim_request(&post, UserId::new_v7())).await.unwrap();
        h.engine.create_claim(claim_request(&post, UserId::new_v7())).await.unwrap();
        h.engine.deny_claim(c1.id, post.owner_id, None).await.unwrap();

        let page = h
            .engine
            .claims_for_post(
                post.id,
                post.owner_id,
                ClaimQuery {
                    status: Some(ClaimStatus::Pending),
                    ..Default::default()
                },
                PageRequest::default(),
            )
            .await
            .unwrap();

        assert_eq!(page.claims.len(), 1);
        assert!(page.claims.iter().all(|c| c.status == ClaimStatus::Pending));
    }

    #[tokio::test]
    async fn test_claims_for_user_surfaces_deleted_posts_as_none() {
        let h = harness();
        let post = seed_found_post(&h).await;
        let kept = seed_found_post(&h).await;
        let claimant = UserId::new_v7();
        h.engine.create_claim(claim_request(&post, claimant)).await.unwrap();
        h.engine.create_claim(claim_request(&kept, claimant)).await.unwrap();

        h.posts.delete(post.id).await.unwrap();

        let page = h
            .engine
            .claims_for_user(claimant, ClaimQuery::default(), PageRequest::default())
            .await
            .unwrap();

        assert_eq!(page.claims.len(), 2);
        let orphaned = page
            .claims
            .iter()
            .find(|c| c.claim.post_id == post.id)
            .unwrap();
        assert!(orphaned.post.is_none());
        let intact = page
            .claims
            .iter()
            .find(|c| c.claim.post_id == kept.id)
            .unwrap();
        assert!(intact.post.is_some());
    }

    #[tokio::test]
    async fn test_check_existing_claim_counts_all_claims() {
        let h = harness();
        let post = seed_found_post(&h).await;
        let claimant = UserId::new_v7();
        h.engine.create_claim(claim_request(&post, claimant)).await.unwrap();
        h.engine.create_claim(claim_request(&post, UserId::new_v7())).await.unwrap();

        let check = h.engine.check_existing_claim(post.id, claimant).await.unwrap();
        assert!(check.has_claimed);
        assert_eq!(check.total_claims, 2);

        let check = h
            .engine
            .check_existing_claim(post.id, UserId::new_v7())
            .await
            .unwrap();
        assert!(!check.has_claimed);
        assert_eq!(check.total_claims, 2);
    }
}

// ============================================================================
// The full scenario from the board's intended flow
// ============================================================================

#[tokio::test]
async fn test_found_post_two_claimants_full_lifecycle() {
    let h = harness();

    // Post P (type=FOUND, owner=U1, status=UNCLAIMED)
    let post = seed_found_post(&h).await;
    let u1 = post.owner_id;
    let u2 = UserId::new_v7();
    let u3 = UserId::new_v7();

    // U2 claims -> C1 PENDING, P -> CLAIM_IN_PROGRESS
    let c1 = h
        .engine
        .create_claim(CreateClaimRequest {
            post_id: post.id,
            claimant_id: u2,
            claim_type: ClaimType::OwnershipClaim,
            message: Some("mine".to_string()),
            photo_proof: None,
        })
        .await
        .unwrap();
    assert_claim_pending(&c1);
    assert_post_claim_in_progress(&h.posts.find(post.id).await.unwrap().unwrap());

    // U3 claims -> C2 PENDING
    let c2 = h
        .engine
        .create_claim(CreateClaimRequest {
            post_id: post.id,
            claimant_id: u3,
            claim_type: ClaimType::OwnershipClaim,
            message: Some("no, mine".to_string()),
            photo_proof: None,
        })
        .await
        .unwrap();
    assert_claim_pending(&c2);

    // U1 approves C1 -> C1 APPROVED, C2 DENIED, P CLAIMED by U2
    h.engine.approve_claim(c1.id, u1).await.unwrap();
    let c1 = h.claims.find(c1.id).await.unwrap().unwrap();
    let c2 = h.claims.find(c2.id).await.unwrap().unwrap();
    assert_claim_approved(&c1);
    assert_claim_denied(&c2);
    assert_post_claimed_by(&h.posts.find(post.id).await.unwrap().unwrap(), u2);

    // U1 approves C2 -> Conflict
    let result = h.engine.approve_claim(c2.id, u1).await;
    assert!(matches!(result, Err(ClaimError::AlreadyProcessed)));
}
