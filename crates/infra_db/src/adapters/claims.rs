//! PostgreSQL Claim Store Adapter
//!
//! Implements the `ClaimStore` trait using the `ClaimRepository`. The unique
//! composite index violation arrives here as `DatabaseError::DuplicateEntry`
//! and leaves as a typed `PortError::Conflict`, keeping the claim engine
//! free of storage-engine error shapes.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use core_kernel::{ClaimId, DomainPort, PageRequest, PortError, PostId, UserId};
use domain_claims::{Claim, ClaimQuery, ClaimStats, ClaimStore, ClaimType, NewClaim};

use crate::repositories::claims::{ClaimRepository, ClaimRow};

/// PostgreSQL-backed implementation of the ClaimStore trait
#[derive(Debug, Clone)]
pub struct PostgresClaimStore {
    repository: ClaimRepository,
}

impl PostgresClaimStore {
    /// Creates a new adapter over the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: ClaimRepository::new(pool),
        }
    }

    /// Returns a reference to the underlying repository
    pub fn repository(&self) -> &ClaimRepository {
        &self.repository
    }
}

impl DomainPort for PostgresClaimStore {}

fn row_to_claim(row: ClaimRow) -> Result<Claim, PortError> {
    Ok(Claim {
        id: ClaimId::from(row.id),
        post_id: PostId::from(row.post_id),
        claimant_id: UserId::from(row.claimant_id),
        claim_type: row
            .claim_type
            .parse()
            .map_err(|e| PortError::internal(format!("corrupt claim row: {e}")))?,
        message: row.message,
        photo_proof: row.photo_proof,
        status: row
            .status
            .parse()
            .map_err(|e| PortError::internal(format!("corrupt claim row: {e}")))?,
        denial_reason: row.denial_reason,
        approved_at: row.approved_at,
        denied_at: row.denied_at,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

fn claim_to_row(claim: &Claim) -> ClaimRow {
    ClaimRow {
        id: Uuid::from(claim.id),
        post_id: Uuid::from(claim.post_id),
        claimant_id: Uuid::from(claim.claimant_id),
        claim_type: claim.claim_type.as_str().to_string(),
        message: claim.message.clone(),
        photo_proof: claim.photo_proof.clone(),
        status: claim.status.as_str().to_string(),
        denial_reason: claim.denial_reason.clone(),
        approved_at: claim.approved_at,
        denied_at: claim.denied_at,
        created_at: claim.created_at,
        updated_at: claim.updated_at,
    }
}

#[async_trait]
impl ClaimStore for PostgresClaimStore {
    async fn find(&self, id: ClaimId) -> Result<Option<Claim>, PortError> {
        self.repository
            .find_by_id(id.into())
            .await?
            .map(row_to_claim)
            .transpose()
    }

    async fn insert(&self, claim: NewClaim) -> Result<Claim, PortError> {
        let claim = Claim::new(claim);
        // The unique index is the authority on duplicates; its violation
        // surfaces here as a typed Conflict.
        self.repository.insert(&claim_to_row(&claim)).await?;
        debug!(claim_id = %claim.id, "claim row inserted");
        Ok(claim)
    }

    async fn find_by_claimant(
        &self,
        post_id: PostId,
        claimant: UserId,
        claim_type: ClaimType,
    ) -> Result<Option<Claim>, PortError> {
        self.repository
            .find_by_claimant(post_id.into(), claimant.into(), claim_type.as_str())
            .await?
            .map(row_to_claim)
            .transpose()
    }

    async fn exists_for_claimant(
        &self,
        post_id: PostId,
        claimant: UserId,
    ) -> Result<bool, PortError> {
        Ok(self
            .repository
            .exists_for_claimant(post_id.into(), claimant.into())
            .await?)
    }

    async fn approve_pending(&self, id: ClaimId, at: DateTime<Utc>) -> Result<bool, PortError> {
        Ok(self.repository.approve_pending(id.into(), at).await?)
    }

    async fn deny_pending(
        &self,
        id: ClaimId,
        at: DateTime<Utc>,
        reason: &str,
    ) -> Result<bool, PortError> {
        Ok(self.repository.deny_pending(id.into(), at, reason).await?)
    }

    async fn deny_pending_siblings(
        &self,
        post_id: PostId,
        keep: ClaimId,
        claim_type: ClaimType,
        at: DateTime<Utc>,
    ) -> Result<u64, PortError> {
        Ok(self
            .repository
            .deny_pending_siblings(post_id.into(), keep.into(), claim_type, at)
            .await?)
    }

    async fn delete(&self, id: ClaimId) -> Result<bool, PortError> {
        Ok(self.repository.delete(id.into()).await?)
    }

    async fn count_pending_for_post(&self, post_id: PostId) -> Result<u64, PortError> {
        Ok(self.repository.count_pending_for_post(post_id.into()).await?)
    }

    async fn count_for_post(&self, post_id: PostId) -> Result<u64, PortError> {
        Ok(self.repository.count_for_post(post_id.into()).await?)
    }

    async fn list_for_post(
        &self,
        post_id: PostId,
        query: &ClaimQuery,
        page: PageRequest,
    ) -> Result<(Vec<Claim>, u64), PortError> {
        let (rows, total) = self
            .repository
            .list_for_post(post_id.into(), query, page)
            .await?;
        let claims = rows
            .into_iter()
            .map(row_to_claim)
            .collect::<Result<Vec<_>, _>>()?;
        Ok((claims, total))
    }

    async fn list_for_claimant(
        &self,
        claimant: UserId,
        query: &ClaimQuery,
        page: PageRequest,
    ) -> Result<(Vec<Claim>, u64), PortError> {
        let (rows, total) = self
            .repository
            .list_for_claimant(claimant.into(), query, page)
            .await?;
        let claims = rows
            .into_iter()
            .map(row_to_claim)
            .collect::<Result<Vec<_>, _>>()?;
        Ok((claims, total))
    }

    async fn stats_for_post(&self, post_id: PostId) -> Result<ClaimStats, PortError> {
        let rows = self.repository.stats_for_post(post_id.into()).await?;
        let mut stats = ClaimStats::default();
        for row in rows {
            let count = row.count as u64;
            stats.total += count;
            match row.status.as_str() {
                "pending" => stats.pending = count,
                "approved" => stats.approved = count,
                "denied" => stats.denied = count,
                other => {
                    return Err(PortError::internal(format!(
                        "corrupt claim row: unknown status '{other}'"
                    )))
                }
            }
        }
        Ok(stats)
    }
}
