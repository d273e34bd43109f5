//! Claims repository implementation
//!
//! Row-level database access for the claim lifecycle. The duplicate-claim
//! race is closed by the unique composite index on
//! `(post_id, claimant_id, claim_type)`; the insert surfaces its violation
//! as `DatabaseError::DuplicateEntry`. Approval and denial are conditional
//! updates filtered on `status = 'pending'`, so a double transition loses
//! the compare-and-swap instead of overwriting a terminal state.

use chrono::{DateTime, Utc};
use sqlx::{PgPool, QueryBuilder};
use uuid::Uuid;

use core_kernel::PageRequest;
use domain_claims::{ClaimQuery, ClaimType};

use crate::error::DatabaseError;

const CLAIM_COLUMNS: &str = "id, post_id, claimant_id, claim_type, message, photo_proof, \
                             status, denial_reason, approved_at, denied_at, created_at, \
                             updated_at";

/// Database row for a claim
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ClaimRow {
    pub id: Uuid,
    pub post_id: Uuid,
    pub claimant_id: Uuid,
    pub claim_type: String,
    pub message: String,
    pub photo_proof: Option<String>,
    pub status: String,
    pub denial_reason: Option<String>,
    pub approved_at: Option<DateTime<Utc>>,
    pub denied_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One row of the grouped status count
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct StatusCount {
    pub status: String,
    pub count: i64,
}

/// Repository for claim rows
#[derive(Debug, Clone)]
pub struct ClaimRepository {
    pool: PgPool,
}

impl ClaimRepository {
    /// Creates a new ClaimRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Retrieves a claim by id
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<ClaimRow>, DatabaseError> {
        let row = sqlx::query_as::<_, ClaimRow>(&format!(
            "SELECT {CLAIM_COLUMNS} FROM claims WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// Inserts a claim row.
    ///
    /// A violation of the unique (post_id, claimant_id, claim_type) index
    /// comes back as `DatabaseError::DuplicateEntry`.
    pub async fn insert(&self, claim: &ClaimRow) -> Result<(), DatabaseError> {
        sqlx::query(
            "INSERT INTO claims (id, post_id, claimant_id, claim_type, message, photo_proof, \
             status, denial_reason, approved_at, denied_at, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)",
        )
        .bind(claim.id)
        .bind(claim.post_id)
        .bind(claim.claimant_id)
        .bind(&claim.claim_type)
        .bind(&claim.message)
        .bind(&claim.photo_proof)
        .bind(&claim.status)
        .bind(&claim.denial_reason)
        .bind(claim.approved_at)
        .bind(claim.denied_at)
        .bind(claim.created_at)
        .bind(claim.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Finds the claim a user made against a post with the given type
    pub async fn find_by_claimant(
        &self,
        post_id: Uuid,
        claimant: Uuid,
        claim_type: &str,
    ) -> Result<Option<ClaimRow>, DatabaseError> {
        let row = sqlx::query_as::<_, ClaimRow>(&format!(
            "SELECT {CLAIM_COLUMNS} FROM claims \
             WHERE post_id = $1 AND claimant_id = $2 AND claim_type = $3"
        ))
        .bind(post_id)
        .bind(claimant)
        .bind(claim_type)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// True when the user has any claim on the post
    pub async fn exists_for_claimant(
        &self,
        post_id: Uuid,
        claimant: Uuid,
    ) -> Result<bool, DatabaseError> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM claims WHERE post_id = $1 AND claimant_id = $2)",
        )
        .bind(post_id)
        .bind(claimant)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    /// Compare-and-swap approval: only a pending claim transitions
    pub async fn approve_pending(
        &self,
        id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<bool, DatabaseError> {
        let result = sqlx::query(
            "UPDATE claims SET status = 'approved', approved_at = $2, updated_at = $2 \
             WHERE id = $1 AND status = 'pending'",
        )
        .bind(id)
        .bind(at)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Compare-and-swap denial: only a pending claim transitions
    pub async fn deny_pending(
        &self,
        id: Uuid,
        at: DateTime<Utc>,
        reason: &str,
    ) -> Result<bool, DatabaseError> {
        let result = sqlx::query(
            "UPDATE claims SET status = 'denied', denied_at = $2, updated_at = $2, \
             denial_reason = $3 \
             WHERE id = $1 AND status = 'pending'",
        )
        .bind(id)
        .bind(at)
        .bind(reason)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Denies every other pending claim of the given type on the post.
    ///
    /// The pending filter is evaluated at update time, so a concurrently
    /// approved claim is never demoted.
    pub async fn deny_pending_siblings(
        &self,
        post_id: Uuid,
        keep: Uuid,
        claim_type: ClaimType,
        at: DateTime<Utc>,
    ) -> Result<u64, DatabaseError> {
        let result = sqlx::query(
            "UPDATE claims SET status = 'denied', denied_at = $3, updated_at = $3 \
             WHERE post_id = $1 AND id <> $2 AND claim_type = $4 AND status = 'pending'",
        )
        .bind(post_id)
        .bind(keep)
        .bind(at)
        .bind(claim_type.as_str())
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Deletes a claim; returns whether a row existed
    pub async fn delete(&self, id: Uuid) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM claims WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Fresh count of pending claims for a post
    pub async fn count_pending_for_post(&self, post_id: Uuid) -> Result<u64, DatabaseError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM claims WHERE post_id = $1 AND status = 'pending'",
        )
        .bind(post_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(count as u64)
    }

    /// Count of claims for a post, any status
    pub async fn count_for_post(&self, post_id: Uuid) -> Result<u64, DatabaseError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM claims WHERE post_id = $1")
            .bind(post_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count as u64)
    }

    /// Lists a post's claims matching the query, newest first
    pub async fn list_for_post(
        &self,
        post_id: Uuid,
        query: &ClaimQuery,
        page: PageRequest,
    ) -> Result<(Vec<ClaimRow>, u64), DatabaseError> {
        self.list_where(" AND post_id = ", post_id, query, page).await
    }

    /// Lists a user's claims matching the query, newest first
    pub async fn list_for_claimant(
        &self,
        claimant: Uuid,
        query: &ClaimQuery,
        page: PageRequest,
    ) -> Result<(Vec<ClaimRow>, u64), DatabaseError> {
        self.list_where(" AND claimant_id = ", claimant, query, page).await
    }

    async fn list_where(
        &self,
        anchor_clause: &str,
        anchor: Uuid,
        query: &ClaimQuery,
        page: PageRequest,
    ) -> Result<(Vec<ClaimRow>, u64), DatabaseError> {
        let total: i64 = {
            let mut builder = QueryBuilder::new("SELECT COUNT(*) FROM claims WHERE 1=1");
            builder.push(anchor_clause);
            builder.push_bind(anchor);
            push_claim_filters(&mut builder, query);
            builder.build_query_scalar().fetch_one(&self.pool).await?
        };

        let rows = {
            let mut builder =
                QueryBuilder::new(format!("SELECT {CLAIM_COLUMNS} FROM claims WHERE 1=1"));
            builder.push(anchor_clause);
            builder.push_bind(anchor);
            push_claim_filters(&mut builder, query);
            builder.push(" ORDER BY created_at DESC LIMIT ");
            builder.push_bind(page.limit() as i64);
            builder.push(" OFFSET ");
            builder.push_bind(page.offset() as i64);
            builder
                .build_query_as::<ClaimRow>()
                .fetch_all(&self.pool)
                .await?
        };

        Ok((rows, total as u64))
    }

    /// Grouped status counts for a post
    pub async fn stats_for_post(&self, post_id: Uuid) -> Result<Vec<StatusCount>, DatabaseError> {
        let rows = sqlx::query_as::<_, StatusCount>(
            "SELECT status, COUNT(*) AS count FROM claims WHERE post_id = $1 GROUP BY status",
        )
        .bind(post_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}

fn push_claim_filters(builder: &mut QueryBuilder<'_, sqlx::Postgres>, query: &ClaimQuery) {
    if let Some(status) = query.status {
        builder.push(" AND status = ");
        builder.push_bind(status.as_str());
    }
    if let Some(claim_type) = query.claim_type {
        builder.push(" AND claim_type = ");
        builder.push_bind(claim_type.as_str());
    }
}
