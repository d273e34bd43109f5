//! Claim lifecycle engine
//!
//! One state-transition operation per incoming request; no in-process state.
//! Every precondition is checked before any mutation, and every status write
//! goes through a conditional store update so concurrent requests interleave
//! safely (see the port documentation for the exact guarantees).

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info, warn};

use core_kernel::{
    ClaimId, ObjectStore, PageInfo, PageRequest, PhotoUpload, PostId, UserId,
};
use domain_posts::{Post, PostStatus, PostStore, PostType};

use crate::claim::{Claim, ClaimType, NewClaim};
use crate::error::ClaimError;
use crate::ports::{ClaimQuery, ClaimStats, ClaimStore};
use crate::proof::validate_photo_proof;

/// Message recorded for a blank finder report on a LOST post
pub const DEFAULT_FINDER_MESSAGE: &str =
    "I found your lost item! Please contact me to arrange return.";

/// Request for creating a claim
#[derive(Debug, Clone)]
pub struct CreateClaimRequest {
    pub post_id: PostId,
    pub claimant_id: UserId,
    pub claim_type: ClaimType,
    pub message: Option<String>,
    pub photo_proof: Option<PhotoUpload>,
}

/// Which capability a deletion request invokes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeletionRole {
    /// The claimant removing their own claim; works even when the post is gone
    Claimant,
    /// The post owner clearing a claim on their post
    PostOwner,
}

/// Result of the has-claimed check
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ClaimCheck {
    pub has_claimed: bool,
    pub total_claims: u64,
}

/// One page of a post's claims, owner view
#[derive(Debug, Clone, Serialize)]
pub struct PostClaimsPage {
    pub claims: Vec<Claim>,
    pub stats: ClaimStats,
    pub pagination: PageInfo,
}

/// A claim in the claimant's view; `post` is None when the post was deleted
#[derive(Debug, Clone, Serialize)]
pub struct MyClaim {
    pub claim: Claim,
    pub post: Option<Post>,
}

/// One page of a user's claims
#[derive(Debug, Clone, Serialize)]
pub struct MyClaimsPage {
    pub claims: Vec<MyClaim>,
    pub pagination: PageInfo,
}

/// The claim lifecycle engine
///
/// Holds explicitly injected store handles; there is no process-wide
/// connection state.
pub struct ClaimEngine {
    claims: Arc<dyn ClaimStore>,
    posts: Arc<dyn PostStore>,
    objects: Arc<dyn ObjectStore>,
}

impl ClaimEngine {
    pub fn new(
        claims: Arc<dyn ClaimStore>,
        posts: Arc<dyn PostStore>,
        objects: Arc<dyn ObjectStore>,
    ) -> Self {
        Self {
            claims,
            posts,
            objects,
        }
    }

    /// Creates a claim against a post.
    ///
    /// Preconditions, first failure wins: the post exists, is not already
    /// claimed, is not the claimant's own, and accepts the claim type; FOUND
    /// posts require a message while LOST posts fall back to a canned one;
    /// no duplicate (post, claimant, type) claim exists. A valid photo proof
    /// is uploaded before the insert.
    ///
    /// On success the post is flipped `Unclaimed -> ClaimInProgress` after -
    /// and only after - the insert commits, so a failed insert never mutates
    /// the post.
    pub async fn create_claim(&self, request: CreateClaimRequest) -> Result<Claim, ClaimError> {
        let post = self
            .posts
            .find(request.post_id)
            .await?
            .ok_or_else(|| ClaimError::PostNotFound(request.post_id.to_string()))?;

        if post.status == PostStatus::Claimed {
            return Err(ClaimError::PostAlreadyClaimed);
        }
        if post.is_owned_by(request.claimant_id) {
            return Err(ClaimError::OwnPost);
        }
        if !request.claim_type.matches_post_type(post.post_type) {
            return Err(ClaimError::WrongClaimType {
                post_type: post.post_type,
                claim_type: request.claim_type,
            });
        }

        let message = request
            .message
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty());
        let message = match (post.post_type, message) {
            (PostType::Found, None) => return Err(ClaimError::MessageRequired),
            (PostType::Lost, None) => DEFAULT_FINDER_MESSAGE.to_string(),
            (_, Some(message)) => message.to_string(),
        };

        // Advisory duplicate check; the unique index on the insert below is
        // the authority under concurrency.
        if self
            .claims
            .find_by_claimant(post.id, request.claimant_id, request.claim_type)
            .await?
            .is_some()
        {
            return Err(ClaimError::DuplicateClaim);
        }

        let photo_proof = match request.photo_proof {
            Some(photo) => {
                validate_photo_proof(&photo)?;
                let stored = self
                    .objects
                    .upload(photo)
                    .await
                    .map_err(|e| ClaimError::UploadFailed(e.to_string()))?;
                Some(stored.url)
            }
            None => None,
        };

        let claim = self
            .claims
            .insert(NewClaim {
                post_id: post.id,
                claimant_id: request.claimant_id,
                claim_type: request.claim_type,
                message,
                photo_proof,
            })
            .await
            .map_err(|e| {
                if e.is_conflict() {
                    // Lost the duplicate race: the index turned the second
                    // insert into a typed conflict.
                    ClaimError::DuplicateClaim
                } else {
                    ClaimError::Store(e)
                }
            })?;

        // The insert committed; now flip the post. The conditional update is
        // a no-op when another claim already moved it to ClaimInProgress.
        self.posts.begin_claim(post.id).await?;

        info!(
            claim_id = %claim.id,
            post_id = %post.id,
            claim_type = %claim.claim_type,
            "claim created"
        );
        Ok(claim)
    }

    /// Approves a pending claim.
    ///
    /// The claim's own approval is a compare-and-swap and commits first;
    /// only then is the post marked Claimed and the remaining pending
    /// same-type claims denied. A reader observing the post as Claimed
    /// therefore always finds the winning claim already Approved.
    pub async fn approve_claim(
        &self,
        claim_id: ClaimId,
        acting_user: UserId,
    ) -> Result<Claim, ClaimError> {
        let claim = self
            .claims
            .find(claim_id)
            .await?
            .ok_or_else(|| ClaimError::ClaimNotFound(claim_id.to_string()))?;

        if claim.is_terminal() {
            return Err(ClaimError::AlreadyProcessed);
        }

        let post = self
            .posts
            .find(claim.post_id)
            .await?
            .ok_or_else(|| ClaimError::PostNotFound(claim.post_id.to_string()))?;
        if !post.is_owned_by(acting_user) {
            return Err(ClaimError::NotPostOwner);
        }

        match claim.claim_type {
            ClaimType::OwnershipClaim | ClaimType::FinderClaim => {}
            other => return Err(ClaimError::InvalidForApproval(other)),
        }

        let now = Utc::now();

        // One-shot transition: re-checked against the latest persisted state.
        if !self.claims.approve_pending(claim_id, now).await? {
            return Err(ClaimError::AlreadyProcessed);
        }

        self.posts
            .mark_claimed(post.id, claim.claimant_id, now)
            .await?;

        let denied = self
            .claims
            .deny_pending_siblings(post.id, claim_id, claim.claim_type, now)
            .await?;
        if denied > 0 {
            debug!(post_id = %post.id, denied, "denied sibling claims");
        }

        info!(
            claim_id = %claim_id,
            post_id = %post.id,
            claimant = %claim.claimant_id,
            "claim approved"
        );

        self.claims
            .find(claim_id)
            .await?
            .ok_or_else(|| ClaimError::ClaimNotFound(claim_id.to_string()))
    }

    /// Denies a pending claim.
    ///
    /// When the fresh pending count afterwards is zero, the post reopens to
    /// Unclaimed (a Claimed post is never overwritten).
    pub async fn deny_claim(
        &self,
        claim_id: ClaimId,
        acting_user: UserId,
        reason: Option<String>,
    ) -> Result<(), ClaimError> {
        let claim = self
            .claims
            .find(claim_id)
            .await?
            .ok_or_else(|| ClaimError::ClaimNotFound(claim_id.to_string()))?;

        if claim.is_terminal() {
            return Err(ClaimError::AlreadyProcessed);
        }

        let post = self
            .posts
            .find(claim.post_id)
            .await?
            .ok_or_else(|| ClaimError::PostNotFound(claim.post_id.to_string()))?;
        if !post.is_owned_by(acting_user) {
            return Err(ClaimError::NotPostOwner);
        }

        let now = Utc::now();
        let reason = reason.unwrap_or_default();

        if !self.claims.deny_pending(claim_id, now, &reason).await? {
            return Err(ClaimError::AlreadyProcessed);
        }

        // Fresh count after this denial, not a stale value.
        let remaining = self.claims.count_pending_for_post(post.id).await?;
        if remaining == 0 {
            self.posts.reopen(post.id).await?;
            debug!(post_id = %post.id, "last pending claim denied, post reopened");
        }

        info!(claim_id = %claim_id, post_id = %post.id, "claim denied");
        Ok(())
    }

    /// Deletes a claim under one of two capabilities: the claimant removing
    /// their own claim (possible even after the post is gone), or the post
    /// owner clearing a claim on their post.
    ///
    /// When the post survives in ClaimInProgress with no pending claims
    /// left, it reopens to Unclaimed.
    pub async fn delete_claim(
        &self,
        claim_id: ClaimId,
        acting_user: UserId,
        role: DeletionRole,
    ) -> Result<(), ClaimError> {
        let claim = self
            .claims
            .find(claim_id)
            .await?
            .ok_or_else(|| ClaimError::ClaimNotFound(claim_id.to_string()))?;

        match role {
            DeletionRole::Claimant => {
                if claim.claimant_id != acting_user {
                    return Err(ClaimError::NotClaimant);
                }
            }
            DeletionRole::PostOwner => {
                let post = self
                    .posts
                    .find(claim.post_id)
                    .await?
                    .ok_or_else(|| ClaimError::PostNotFound(claim.post_id.to_string()))?;
                if !post.is_owned_by(acting_user) {
                    return Err(ClaimError::NotPostOwner);
                }
            }
        }

        self.claims.delete(claim_id).await?;

        // "Post deleted" is not a barrier to claim cleanup; reopening only
        // applies when the post still exists.
        if let Some(post) = self.posts.find(claim.post_id).await? {
            if post.status == PostStatus::ClaimInProgress
                && self.claims.count_pending_for_post(post.id).await? == 0
            {
                self.posts.reopen_if_claim_in_progress(post.id).await?;
                debug!(post_id = %post.id, "last claim deleted, post reopened");
            }
        }

        info!(claim_id = %claim_id, ?role, "claim deleted");
        Ok(())
    }

    /// Lists a post's claims for its owner, with grouped status counts
    pub async fn claims_for_post(
        &self,
        post_id: PostId,
        acting_user: UserId,
        query: ClaimQuery,
        page: PageRequest,
    ) -> Result<PostClaimsPage, ClaimError> {
        let post = self
            .posts
            .find(post_id)
            .await?
            .ok_or_else(|| ClaimError::PostNotFound(post_id.to_string()))?;
        if !post.is_owned_by(acting_user) {
            return Err(ClaimError::NotPostOwner);
        }

        let (claims, total) = self.claims.list_for_post(post_id, &query, page).await?;
        let stats = self.claims.stats_for_post(post_id).await?;

        Ok(PostClaimsPage {
            claims,
            stats,
            pagination: PageInfo::from_total(page, total),
        })
    }

    /// Lists the claims a user has made. Posts that were deleted surface as
    /// `None` references; deletion of a post never cascades to its claims.
    pub async fn claims_for_user(
        &self,
        claimant: UserId,
        query: ClaimQuery,
        page: PageRequest,
    ) -> Result<MyClaimsPage, ClaimError> {
        let (claims, total) = self.claims.list_for_claimant(claimant, &query, page).await?;

        let mut entries = Vec::with_capacity(claims.len());
        for claim in claims {
            let post = self.posts.find(claim.post_id).await?;
            if post.is_none() {
                warn!(claim_id = %claim.id, post_id = %claim.post_id, "claim references deleted post");
            }
            entries.push(MyClaim { claim, post });
        }

        Ok(MyClaimsPage {
            claims: entries,
            pagination: PageInfo::from_total(page, total),
        })
    }

    /// Whether the user already has a claim on the post, with the post's
    /// total claim count
    pub async fn check_existing_claim(
        &self,
        post_id: PostId,
        user: UserId,
    ) -> Result<ClaimCheck, ClaimError> {
        let has_claimed = self.claims.exists_for_claimant(post_id, user).await?;
        let total_claims = self.claims.count_for_post(post_id).await?;
        Ok(ClaimCheck {
            has_claimed,
            total_claims,
        })
    }
}
