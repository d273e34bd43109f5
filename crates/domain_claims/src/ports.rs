//! Claims Domain Port
//!
//! The `ClaimStore` trait captures exactly what the claim engine requires
//! from the document store:
//!
//! - a unique composite index on (post_id, claimant_id, claim_type) -
//!   `insert` returns a typed `PortError::Conflict` on violation, so the
//!   engine never inspects storage-engine error shapes;
//! - conditional single-document updates - the `*_pending` methods only
//!   write when the claim is still Pending and report whether they did;
//! - count and grouped-count queries filtered by post and status.
//!
//! Adapters: PostgreSQL (infra_db) and an in-memory mock for tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

use core_kernel::{ClaimId, DomainPort, PageRequest, PortError, PostId, UserId};

use crate::claim::{Claim, ClaimStatus, ClaimType, NewClaim};

/// Query parameters for listing claims
#[derive(Debug, Clone, Default)]
pub struct ClaimQuery {
    /// Filter by status
    pub status: Option<ClaimStatus>,
    /// Filter by claim type
    pub claim_type: Option<ClaimType>,
}

/// Grouped claim counts for a post
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ClaimStats {
    pub total: u64,
    pub pending: u64,
    pub approved: u64,
    pub denied: u64,
}

/// The main port trait for claim storage
#[async_trait]
pub trait ClaimStore: DomainPort {
    /// Looks up a claim by id; `None` when it does not resolve
    async fn find(&self, id: ClaimId) -> Result<Option<Claim>, PortError>;

    /// Persists a new claim.
    ///
    /// Returns `PortError::Conflict` when a claim for the same
    /// (post, claimant, claim type) already exists; the uniqueness check and
    /// the insert are a single atomic operation at the store level.
    async fn insert(&self, claim: NewClaim) -> Result<Claim, PortError>;

    /// Finds the claim a user made against a post with the given type
    async fn find_by_claimant(
        &self,
        post_id: PostId,
        claimant: UserId,
        claim_type: ClaimType,
    ) -> Result<Option<Claim>, PortError>;

    /// True when the user has any claim (either type) on the post
    async fn exists_for_claimant(
        &self,
        post_id: PostId,
        claimant: UserId,
    ) -> Result<bool, PortError>;

    /// Conditionally approves: writes only when the claim is still Pending.
    ///
    /// Returns whether the transition happened.
    async fn approve_pending(&self, id: ClaimId, at: DateTime<Utc>) -> Result<bool, PortError>;

    /// Conditionally denies: writes only when the claim is still Pending.
    async fn deny_pending(
        &self,
        id: ClaimId,
        at: DateTime<Utc>,
        reason: &str,
    ) -> Result<bool, PortError>;

    /// Denies every other Pending claim of the given type on the post.
    ///
    /// The Pending filter is applied at update time, so a concurrently
    /// approved claim is never demoted. Returns the number of claims denied.
    async fn deny_pending_siblings(
        &self,
        post_id: PostId,
        keep: ClaimId,
        claim_type: ClaimType,
        at: DateTime<Utc>,
    ) -> Result<u64, PortError>;

    /// Deletes a claim; returns false when it did not exist
    async fn delete(&self, id: ClaimId) -> Result<bool, PortError>;

    /// Number of Pending claims on a post (fresh count)
    async fn count_pending_for_post(&self, post_id: PostId) -> Result<u64, PortError>;

    /// Number of claims on a post, any status
    async fn count_for_post(&self, post_id: PostId) -> Result<u64, PortError>;

    /// Lists a post's claims matching the query, newest first, with the
    /// total matching count
    async fn list_for_post(
        &self,
        post_id: PostId,
        query: &ClaimQuery,
        page: PageRequest,
    ) -> Result<(Vec<Claim>, u64), PortError>;

    /// Lists a user's claims matching the query, newest first, with the
    /// total matching count
    async fn list_for_claimant(
        &self,
        claimant: UserId,
        query: &ClaimQuery,
        page: PageRequest,
    ) -> Result<(Vec<Claim>, u64), PortError>;

    /// Grouped status counts for a post
    async fn stats_for_post(&self, post_id: PostId) -> Result<ClaimStats, PortError>;
}

/// In-memory mock implementation of ClaimStore for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    /// Mirrors the store guarantees the engine depends on: the unique
    /// composite index and conditional status updates.
    #[derive(Debug, Default)]
    pub struct MockClaimStore {
        claims: Arc<RwLock<HashMap<ClaimId, Claim>>>,
    }

    impl MockClaimStore {
        pub fn new() -> Self {
            Self::default()
        }

        /// Inserts a claim directly, bypassing the unique index (test setup)
        pub async fn seed_claim(&self, claim: Claim) {
            self.claims.write().await.insert(claim.id, claim);
        }
    }

    impl DomainPort for MockClaimStore {}

    fn matches_query(claim: &Claim, query: &ClaimQuery) -> bool {
        if let Some(status) = query.status {
            if claim.status != status {
                return false;
            }
        }
        if let Some(claim_type) = query.claim_type {
            if claim.claim_type != claim_type {
                return false;
            }
        }
        true
    }

    fn page_of(mut matches: Vec<Claim>, page: PageRequest) -> (Vec<Claim>, u64) {
        matches.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        let total = matches.len() as u64;
        let items = matches
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .collect();
        (items, total)
    }

    #[async_trait]
    impl ClaimStore for MockClaimStore {
        async fn find(&self, id: ClaimId) -> Result<Option<Claim>, PortError> {
            Ok(self.claims.read().await.get(&id).cloned())
        }

        async fn insert(&self, claim: NewClaim) -> Result<Claim, PortError> {
            let mut claims = self.claims.write().await;

            // The unique composite index on (post_id, claimant_id, claim_type):
            // the check and the insert happen under one write lock, the same
            // all-or-nothing guarantee the database index provides.
            let duplicate = claims.values().any(|c| {
                c.post_id == claim.post_id
                    && c.claimant_id == claim.claimant_id
                    && c.claim_type == claim.claim_type
            });
            if duplicate {
                return Err(PortError::conflict(
                    "claim already exists for this post, claimant, and type",
                ));
            }

            let claim = Claim::new(claim);
            claims.insert(claim.id, claim.clone());
            Ok(claim)
        }

        async fn find_by_claimant(
            &self,
            post_id: PostId,
            claimant: UserId,
            claim_type: ClaimType,
        ) -> Result<Option<Claim>, PortError> {
            Ok(self
                .claims
                .read()
                .await
                .values()
                .find(|c| {
                    c.post_id == post_id
                        && c.claimant_id == claimant
                        && c.claim_type == claim_type
                })
                .cloned())
        }

        async fn exists_for_claimant(
            &self,
            post_id: PostId,
            claimant: UserId,
        ) -> Result<bool, PortError> {
            Ok(self
                .claims
                .read()
                .await
                .values()
                .any(|c| c.post_id == post_id && c.claimant_id == claimant))
        }

        async fn approve_pending(
            &self,
            id: ClaimId,
            at: DateTime<Utc>,
        ) -> Result<bool, PortError> {
            let mut claims = self.claims.write().await;
            Ok(claims.get_mut(&id).map(|c| c.approve(at)).unwrap_or(false))
        }

        async fn deny_pending(
            &self,
            id: ClaimId,
            at: DateTime<Utc>,
            reason: &str,
        ) -> Result<bool, PortError> {
            let mut claims = self.claims.write().await;
            Ok(claims.get_mut(&id).map(|c| c.deny(at, reason)).unwrap_or(false))
        }

        async fn deny_pending_siblings(
            &self,
            post_id: PostId,
            keep: ClaimId,
            claim_type: ClaimType,
            at: DateTime<Utc>,
        ) -> Result<u64, PortError> {
            let mut claims = self.claims.write().await;
            let mut denied = 0;
            for claim in claims.values_mut() {
                if claim.post_id == post_id
                    && claim.id != keep
                    && claim.claim_type == claim_type
                    && claim.is_pending()
                    && claim.deny(at, "")
                {
                    denied += 1;
                }
            }
            Ok(denied)
        }

        async fn delete(&self, id: ClaimId) -> Result<bool, PortError> {
            Ok(self.claims.write().await.remove(&id).is_some())
        }

        async fn count_pending_for_post(&self, post_id: PostId) -> Result<u64, PortError> {
            Ok(self
                .claims
                .read()
                .await
                .values()
                .filter(|c| c.post_id == post_id && c.is_pending())
                .count() as u64)
        }

        async fn count_for_post(&self, post_id: PostId) -> Result<u64, PortError> {
            Ok(self
                .claims
                .read()
                .await
                .values()
                .filter(|c| c.post_id == post_id)
                .count() as u64)
        }

        async fn list_for_post(
            &self,
            post_id: PostId,
            query: &ClaimQuery,
            page: PageRequest,
        ) -> Result<(Vec<Claim>, u64), PortError> {
            let matches: Vec<Claim> = self
                .claims
                .read()
                .await
                .values()
                .filter(|c| c.post_id == post_id && matches_query(c, query))
                .cloned()
                .collect();
            Ok(page_of(matches, page))
        }

        async fn list_for_claimant(
            &self,
            claimant: UserId,
            query: &ClaimQuery,
            page: PageRequest,
        ) -> Result<(Vec<Claim>, u64), PortError> {
            let matches: Vec<Claim> = self
                .claims
                .read()
                .await
                .values()
                .filter(|c| c.claimant_id == claimant && matches_query(c, query))
                .cloned()
                .collect();
            Ok(page_of(matches, page))
        }

        async fn stats_for_post(&self, post_id: PostId) -> Result<ClaimStats, PortError> {
            let claims = self.claims.read().await;
            let mut stats = ClaimStats::default();
            for claim in claims.values().filter(|c| c.post_id == post_id) {
                stats.total += 1;
                match claim.status {
                    ClaimStatus::Pending => stats.pending += 1,
                    ClaimStatus::Approved => stats.approved += 1,
                    ClaimStatus::Denied => stats.denied += 1,
                }
            }
            Ok(stats)
        }
    }
}
