//! Posts repository implementation
//!
//! Row-level database access for posts, media, and categories. Status
//! transitions are conditional updates whose affected-row count reports
//! whether the write won; the adapters turn that into the port's
//! compare-and-swap contract.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{PgPool, QueryBuilder};
use uuid::Uuid;

use core_kernel::PageRequest;
use domain_posts::{PostQuery, PostUpdate};

use crate::error::DatabaseError;

const POST_COLUMNS: &str = "id, owner_id, post_type, category_id, custom_category, location, \
                            date, description, status, claimed_by, found_by, claimed_at, \
                            created_at, updated_at";

/// Database row for a post
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PostRow {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub post_type: String,
    pub category_id: Option<Uuid>,
    pub custom_category: Option<String>,
    pub location: String,
    pub date: NaiveDate,
    pub description: String,
    pub status: String,
    pub claimed_by: Option<Uuid>,
    pub found_by: Option<Uuid>,
    pub claimed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database row for a media attachment
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MediaRow {
    pub id: Uuid,
    pub post_id: Uuid,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
}

/// Database row for a category
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CategoryRow {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Repository for post, media, and category rows
#[derive(Debug, Clone)]
pub struct PostRepository {
    pool: PgPool,
}

impl PostRepository {
    /// Creates a new PostRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Retrieves a post by id
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<PostRow>, DatabaseError> {
        let row = sqlx::query_as::<_, PostRow>(&format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// Inserts a post row
    pub async fn insert(&self, post: &PostRow) -> Result<(), DatabaseError> {
        sqlx::query(
            "INSERT INTO posts (id, owner_id, post_type, category_id, custom_category, \
             location, date, description, status, claimed_by, found_by, claimed_at, \
             created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)",
        )
        .bind(post.id)
        .bind(post.owner_id)
        .bind(&post.post_type)
        .bind(post.category_id)
        .bind(&post.custom_category)
        .bind(&post.location)
        .bind(post.date)
        .bind(&post.description)
        .bind(&post.status)
        .bind(post.claimed_by)
        .bind(post.found_by)
        .bind(post.claimed_at)
        .bind(post.created_at)
        .bind(post.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Applies an owner update to the routine fields; status is untouchable
    /// from this path
    pub async fn update_details(
        &self,
        id: Uuid,
        update: &PostUpdate,
    ) -> Result<PostRow, DatabaseError> {
        let row = sqlx::query_as::<_, PostRow>(&format!(
            "UPDATE posts SET \
             description = COALESCE($2, description), \
             location = COALESCE($3, location), \
             updated_at = $4 \
             WHERE id = $1 \
             RETURNING {POST_COLUMNS}"
        ))
        .bind(id)
        .bind(&update.description)
        .bind(&update.location)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found("Post", id))?;
        Ok(row)
    }

    /// Deletes a post; returns whether a row existed
    pub async fn delete(&self, id: Uuid) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Lists posts matching the query, newest first, plus the total count
    pub async fn list(
        &self,
        query: &PostQuery,
        page: PageRequest,
    ) -> Result<(Vec<PostRow>, u64), DatabaseError> {
        let total: i64 = {
            let mut builder = QueryBuilder::new("SELECT COUNT(*) FROM posts WHERE 1=1");
            push_post_filters(&mut builder, query);
            builder
                .build_query_scalar()
                .fetch_one(&self.pool)
                .await?
        };

        let rows = {
            let mut builder =
                QueryBuilder::new(format!("SELECT {POST_COLUMNS} FROM posts WHERE 1=1"));
            push_post_filters(&mut builder, query);
            builder.push(" ORDER BY created_at DESC LIMIT ");
            builder.push_bind(page.limit() as i64);
            builder.push(" OFFSET ");
            builder.push_bind(page.offset() as i64);
            builder
                .build_query_as::<PostRow>()
                .fetch_all(&self.pool)
                .await?
        };

        Ok((rows, total as u64))
    }

    /// Conditional flip `unclaimed -> claim_in_progress`
    pub async fn begin_claim(&self, id: Uuid) -> Result<bool, DatabaseError> {
        let result = sqlx::query(
            "UPDATE posts SET status = 'claim_in_progress', updated_at = $2 \
             WHERE id = $1 AND status = 'unclaimed'",
        )
        .bind(id)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Marks the post claimed, recording the winner in the column matching
    /// the post type
    pub async fn mark_claimed(
        &self,
        id: Uuid,
        claimant: Uuid,
        at: DateTime<Utc>,
    ) -> Result<bool, DatabaseError> {
        let result = sqlx::query(
            "UPDATE posts SET \
             status = 'claimed', \
             claimed_at = $3, \
             updated_at = $3, \
             claimed_by = CASE WHEN post_type = 'found' THEN $2 ELSE claimed_by END, \
             found_by = CASE WHEN post_type = 'lost' THEN $2 ELSE found_by END \
             WHERE id = $1",
        )
        .bind(id)
        .bind(claimant)
        .bind(at)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Reverts to `unclaimed`; a claimed post is never overwritten
    pub async fn reopen(&self, id: Uuid) -> Result<bool, DatabaseError> {
        let result = sqlx::query(
            "UPDATE posts SET status = 'unclaimed', updated_at = $2 \
             WHERE id = $1 AND status <> 'claimed'",
        )
        .bind(id)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Reverts to `unclaimed` only from `claim_in_progress`
    pub async fn reopen_if_claim_in_progress(&self, id: Uuid) -> Result<bool, DatabaseError> {
        let result = sqlx::query(
            "UPDATE posts SET status = 'unclaimed', updated_at = $2 \
             WHERE id = $1 AND status = 'claim_in_progress'",
        )
        .bind(id)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    // ========================================================================
    // Media
    // ========================================================================

    pub async fn insert_media(&self, media: &MediaRow) -> Result<(), DatabaseError> {
        sqlx::query(
            "INSERT INTO media (id, post_id, image_url, created_at) VALUES ($1, $2, $3, $4)",
        )
        .bind(media.id)
        .bind(media.post_id)
        .bind(&media.image_url)
        .bind(media.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn find_media_by_post(
        &self,
        post_id: Uuid,
    ) -> Result<Option<MediaRow>, DatabaseError> {
        let row = sqlx::query_as::<_, MediaRow>(
            "SELECT id, post_id, image_url, created_at FROM media WHERE post_id = $1",
        )
        .bind(post_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn delete_media_by_post(&self, post_id: Uuid) -> Result<u64, DatabaseError> {
        let result = sqlx::query("DELETE FROM media WHERE post_id = $1")
            .bind(post_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    // ========================================================================
    // Categories
    // ========================================================================

    /// Case-insensitive category lookup by name
    pub async fn find_category_by_name(
        &self,
        name: &str,
    ) -> Result<Option<CategoryRow>, DatabaseError> {
        let row = sqlx::query_as::<_, CategoryRow>(
            "SELECT id, name, created_at FROM categories WHERE LOWER(name) = LOWER($1)",
        )
        .bind(name.trim())
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn list_categories(&self) -> Result<Vec<CategoryRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            "SELECT id, name, created_at FROM categories ORDER BY name ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}

fn push_post_filters(builder: &mut QueryBuilder<'_, sqlx::Postgres>, query: &PostQuery) {
    if let Some(post_type) = query.post_type {
        builder.push(" AND post_type = ");
        builder.push_bind(post_type.as_str());
    }
    if let Some(category_id) = query.category_id {
        builder.push(" AND category_id = ");
        builder.push_bind(Uuid::from(category_id));
    }
    if let Some(start) = query.start_date {
        builder.push(" AND date >= ");
        builder.push_bind(start);
    }
    if let Some(end) = query.end_date {
        builder.push(" AND date <= ");
        builder.push_bind(end);
    }
    if let Some(owner) = query.owner_id {
        builder.push(" AND owner_id = ");
        builder.push_bind(Uuid::from(owner));
    }
    if let Some(ref keyword) = query.keyword {
        let pattern = format!("%{}%", keyword);
        builder.push(" AND (description ILIKE ");
        builder.push_bind(pattern.clone());
        builder.push(" OR location ILIKE ");
        builder.push_bind(pattern.clone());
        builder.push(" OR custom_category ILIKE ");
        builder.push_bind(pattern);
        builder.push(")");
    }
}
