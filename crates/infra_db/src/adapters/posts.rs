//! PostgreSQL Post Store Adapter
//!
//! Implements the `PostStore` trait using the `PostRepository`, translating
//! between database rows and domain models and between database errors and
//! typed port errors.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use core_kernel::{DomainPort, PageRequest, PortError, PostId, UserId};
use domain_posts::{
    Category, Media, NewMedia, Post, PostQuery, PostStore, PostUpdate,
};

use crate::repositories::posts::{CategoryRow, MediaRow, PostRepository, PostRow};

/// PostgreSQL-backed implementation of the PostStore trait
#[derive(Debug, Clone)]
pub struct PostgresPostStore {
    repository: PostRepository,
}

impl PostgresPostStore {
    /// Creates a new adapter over the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: PostRepository::new(pool),
        }
    }

    /// Returns a reference to the underlying repository
    pub fn repository(&self) -> &PostRepository {
        &self.repository
    }
}

impl DomainPort for PostgresPostStore {}

fn row_to_post(row: PostRow) -> Result<Post, PortError> {
    Ok(Post {
        id: PostId::from(row.id),
        owner_id: UserId::from(row.owner_id),
        post_type: row
            .post_type
            .parse()
            .map_err(|e| PortError::internal(format!("corrupt post row: {e}")))?,
        category_id: row.category_id.map(Into::into),
        custom_category: row.custom_category,
        location: row.location,
        date: row.date,
        description: row.description,
        status: row
            .status
            .parse()
            .map_err(|e| PortError::internal(format!("corrupt post row: {e}")))?,
        claimed_by: row.claimed_by.map(Into::into),
        found_by: row.found_by.map(Into::into),
        claimed_at: row.claimed_at,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

fn post_to_row(post: &Post) -> PostRow {
    PostRow {
        id: Uuid::from(post.id),
        owner_id: Uuid::from(post.owner_id),
        post_type: post.post_type.as_str().to_string(),
        category_id: post.category_id.map(Into::into),
        custom_category: post.custom_category.clone(),
        location: post.location.clone(),
        date: post.date,
        description: post.description.clone(),
        status: post.status.as_str().to_string(),
        claimed_by: post.claimed_by.map(Into::into),
        found_by: post.found_by.map(Into::into),
        claimed_at: post.claimed_at,
        created_at: post.created_at,
        updated_at: post.updated_at,
    }
}

fn row_to_media(row: MediaRow) -> Media {
    Media {
        id: row.id.into(),
        post_id: row.post_id.into(),
        image_url: row.image_url,
        created_at: row.created_at,
    }
}

fn row_to_category(row: CategoryRow) -> Category {
    Category {
        id: row.id.into(),
        name: row.name,
        created_at: row.created_at,
    }
}

#[async_trait]
impl PostStore for PostgresPostStore {
    async fn find(&self, id: PostId) -> Result<Option<Post>, PortError> {
        self.repository
            .find_by_id(id.into())
            .await?
            .map(row_to_post)
            .transpose()
    }

    async fn insert(&self, post: Post) -> Result<Post, PortError> {
        self.repository.insert(&post_to_row(&post)).await?;
        debug!(post_id = %post.id, "post row inserted");
        Ok(post)
    }

    async fn update_details(&self, id: PostId, update: PostUpdate) -> Result<Post, PortError> {
        let row = self.repository.update_details(id.into(), &update).await?;
        row_to_post(row)
    }

    async fn delete(&self, id: PostId) -> Result<bool, PortError> {
        Ok(self.repository.delete(id.into()).await?)
    }

    async fn list(
        &self,
        query: &PostQuery,
        page: PageRequest,
    ) -> Result<(Vec<Post>, u64), PortError> {
        let (rows, total) = self.repository.list(query, page).await?;
        let posts = rows
            .into_iter()
            .map(row_to_post)
            .collect::<Result<Vec<_>, _>>()?;
        Ok((posts, total))
    }

    async fn begin_claim(&self, id: PostId) -> Result<bool, PortError> {
        Ok(self.repository.begin_claim(id.into()).await?)
    }

    async fn mark_claimed(
        &self,
        id: PostId,
        claimant: UserId,
        at: DateTime<Utc>,
    ) -> Result<bool, PortError> {
        Ok(self
            .repository
            .mark_claimed(id.into(), claimant.into(), at)
            .await?)
    }

    async fn reopen(&self, id: PostId) -> Result<bool, PortError> {
        Ok(self.repository.reopen(id.into()).await?)
    }

    async fn reopen_if_claim_in_progress(&self, id: PostId) -> Result<bool, PortError> {
        Ok(self.repository.reopen_if_claim_in_progress(id.into()).await?)
    }

    async fn attach_media(&self, media: NewMedia) -> Result<Media, PortError> {
        let media = Media::new(media);
        self.repository
            .insert_media(&MediaRow {
                id: media.id.into(),
                post_id: media.post_id.into(),
                image_url: media.image_url.clone(),
                created_at: media.created_at,
            })
            .await?;
        Ok(media)
    }

    async fn find_media(&self, post_id: PostId) -> Result<Option<Media>, PortError> {
        Ok(self
            .repository
            .find_media_by_post(post_id.into())
            .await?
            .map(row_to_media))
    }

    async fn delete_media(&self, post_id: PostId) -> Result<u64, PortError> {
        Ok(self.repository.delete_media_by_post(post_id.into()).await?)
    }

    async fn find_category_by_name(&self, name: &str) -> Result<Option<Category>, PortError> {
        Ok(self
            .repository
            .find_category_by_name(name)
            .await?
            .map(row_to_category))
    }

    async fn list_categories(&self) -> Result<Vec<Category>, PortError> {
        Ok(self
            .repository
            .list_categories()
            .await?
            .into_iter()
            .map(row_to_category)
            .collect())
    }
}
