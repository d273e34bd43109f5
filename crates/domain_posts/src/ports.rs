//! Posts Domain Port
//!
//! The `PostStore` trait defines everything the posts domain and the claim
//! engine need from the document store for posts, media, and categories.
//! Adapters: PostgreSQL (infra_db) and an in-memory mock for tests.
//!
//! The status-transition methods are deliberately conditional: they express
//! compare-and-swap semantics so that concurrent writers can never overwrite
//! a `Claimed` post or double-flip `Unclaimed -> ClaimInProgress`.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use core_kernel::{CategoryId, DomainPort, PageRequest, PortError, PostId, UserId};

use crate::category::Category;
use crate::media::{Media, NewMedia};
use crate::post::{Post, PostType, PostUpdate};

/// Query parameters for listing posts
#[derive(Debug, Clone, Default)]
pub struct PostQuery {
    /// Filter by post type
    pub post_type: Option<PostType>,
    /// Filter by known category
    pub category_id: Option<CategoryId>,
    /// Items lost/found on or after this date
    pub start_date: Option<NaiveDate>,
    /// Items lost/found on or before this date
    pub end_date: Option<NaiveDate>,
    /// Case-insensitive match against description, location, and custom category
    pub keyword: Option<String>,
    /// Restrict to a single owner ("only mine")
    pub owner_id: Option<UserId>,
}

/// The main port trait for post storage
///
/// All methods are async and return `Result<T, PortError>` for consistent
/// error handling across adapter implementations.
#[async_trait]
pub trait PostStore: DomainPort {
    // ========================================================================
    // CRUD
    // ========================================================================

    /// Looks up a post by id; `None` when it does not resolve
    async fn find(&self, id: PostId) -> Result<Option<Post>, PortError>;

    /// Persists a new post
    async fn insert(&self, post: Post) -> Result<Post, PortError>;

    /// Applies an owner update to the routine (non-status) fields
    async fn update_details(&self, id: PostId, update: PostUpdate) -> Result<Post, PortError>;

    /// Deletes a post; returns false when it did not exist.
    ///
    /// Claims referencing the post are left in place.
    async fn delete(&self, id: PostId) -> Result<bool, PortError>;

    /// Lists posts matching the query, newest first, with the total count
    async fn list(
        &self,
        query: &PostQuery,
        page: PageRequest,
    ) -> Result<(Vec<Post>, u64), PortError>;

    // ========================================================================
    // Claim-engine status transitions (conditional updates)
    // ========================================================================

    /// Flips `Unclaimed -> ClaimInProgress`; returns false for any other
    /// prior status without writing
    async fn begin_claim(&self, id: PostId) -> Result<bool, PortError>;

    /// Marks the post `Claimed`, recording the winning claimant in
    /// `claimed_by` (FOUND) or `found_by` (LOST); returns false when the
    /// post does not resolve
    async fn mark_claimed(
        &self,
        id: PostId,
        claimant: UserId,
        at: DateTime<Utc>,
    ) -> Result<bool, PortError>;

    /// Reverts to `Unclaimed` unless the post is `Claimed`; returns whether
    /// a write happened
    async fn reopen(&self, id: PostId) -> Result<bool, PortError>;

    /// Reverts to `Unclaimed` only from `ClaimInProgress`
    async fn reopen_if_claim_in_progress(&self, id: PostId) -> Result<bool, PortError>;

    // ========================================================================
    // Media
    // ========================================================================

    /// Attaches an uploaded image to a post
    async fn attach_media(&self, media: NewMedia) -> Result<Media, PortError>;

    /// Returns the post's media row, if any
    async fn find_media(&self, post_id: PostId) -> Result<Option<Media>, PortError>;

    /// Deletes all media rows for a post; returns the number removed
    async fn delete_media(&self, post_id: PostId) -> Result<u64, PortError>;

    // ========================================================================
    // Categories
    // ========================================================================

    /// Case-insensitive category lookup by name
    async fn find_category_by_name(&self, name: &str) -> Result<Option<Category>, PortError>;

    /// All known categories
    async fn list_categories(&self) -> Result<Vec<Category>, PortError>;
}

/// In-memory mock implementation of PostStore for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    use crate::post::PostStatus;

    /// Stores posts, media, and categories in memory, mirroring the
    /// conditional-update semantics the PostgreSQL adapter gets from the
    /// database.
    #[derive(Debug, Default)]
    pub struct MockPostStore {
        posts: Arc<RwLock<HashMap<PostId, Post>>>,
        media: Arc<RwLock<HashMap<PostId, Media>>>,
        categories: Arc<RwLock<Vec<Category>>>,
    }

    impl MockPostStore {
        pub fn new() -> Self {
            Self::default()
        }

        /// Pre-populates the category collection
        pub async fn with_categories(categories: Vec<Category>) -> Self {
            let store = Self::new();
            *store.categories.write().await = categories;
            store
        }

        /// Inserts a post directly, bypassing validation (test setup)
        pub async fn seed_post(&self, post: Post) {
            self.posts.write().await.insert(post.id, post);
        }
    }

    impl DomainPort for MockPostStore {}

    #[async_trait]
    impl PostStore for MockPostStore {
        async fn find(&self, id: PostId) -> Result<Option<Post>, PortError> {
            Ok(self.posts.read().await.get(&id).cloned())
        }

        async fn insert(&self, post: Post) -> Result<Post, PortError> {
            self.posts.write().await.insert(post.id, post.clone());
            Ok(post)
        }

        async fn update_details(&self, id: PostId, update: PostUpdate) -> Result<Post, PortError> {
            let mut posts = self.posts.write().await;
            let post = posts
                .get_mut(&id)
                .ok_or_else(|| PortError::not_found("Post", id))?;

            if let Some(description) = update.description {
                post.description = description;
            }
            if let Some(location) = update.location {
                post.location = location;
            }
            post.updated_at = Utc::now();

            Ok(post.clone())
        }

        async fn delete(&self, id: PostId) -> Result<bool, PortError> {
            Ok(self.posts.write().await.remove(&id).is_some())
        }

        async fn list(
            &self,
            query: &PostQuery,
            page: PageRequest,
        ) -> Result<(Vec<Post>, u64), PortError> {
            let posts = self.posts.read().await;
            let keyword = query.keyword.as_deref().map(str::to_lowercase);

            let mut matches: Vec<Post> = posts
                .values()
                .filter(|p| {
                    if let Some(post_type) = query.post_type {
                        if p.post_type != post_type {
                            return false;
                        }
                    }
                    if let Some(category_id) = query.category_id {
                        if p.category_id != Some(category_id) {
                            return false;
                        }
                    }
                    if let Some(start) = query.start_date {
                        if p.date < start {
                            return false;
                        }
                    }
                    if let Some(end) = query.end_date {
                        if p.date > end {
                            return false;
                        }
                    }
                    if let Some(owner) = query.owner_id {
                        if p.owner_id != owner {
                            return false;
                        }
                    }
                    if let Some(ref keyword) = keyword {
                        let custom = p.custom_category.as_deref().unwrap_or("");
                        if !p.description.to_lowercase().contains(keyword)
                            && !p.location.to_lowercase().contains(keyword)
                            && !custom.to_lowercase().contains(keyword)
                        {
                            return false;
                        }
                    }
                    true
                })
                .cloned()
                .collect();

            matches.sort_by(|a, b| b.created_at.cmp(&a.created_at));

            let total = matches.len() as u64;
            let items = matches
                .into_iter()
                .skip(page.offset() as usize)
                .take(page.limit() as usize)
                .collect();

            Ok((items, total))
        }

        async fn begin_claim(&self, id: PostId) -> Result<bool, PortError> {
            let mut posts = self.posts.write().await;
            Ok(posts.get_mut(&id).map(|p| p.begin_claim()).unwrap_or(false))
        }

        async fn mark_claimed(
            &self,
            id: PostId,
            claimant: UserId,
            at: DateTime<Utc>,
        ) -> Result<bool, PortError> {
            let mut posts = self.posts.write().await;
            match posts.get_mut(&id) {
                Some(post) => {
                    post.resolve_claimed(claimant, at);
                    Ok(true)
                }
                None => Ok(false),
            }
        }

        async fn reopen(&self, id: PostId) -> Result<bool, PortError> {
            let mut posts = self.posts.write().await;
            Ok(posts.get_mut(&id).map(|p| p.reopen()).unwrap_or(false))
        }

        async fn reopen_if_claim_in_progress(&self, id: PostId) -> Result<bool, PortError> {
            let mut posts = self.posts.write().await;
            match posts.get_mut(&id) {
                Some(post) if post.status == PostStatus::ClaimInProgress => Ok(post.reopen()),
                _ => Ok(false),
            }
        }

        async fn attach_media(&self, media: NewMedia) -> Result<Media, PortError> {
            let media = Media::new(media);
            self.media.write().await.insert(media.post_id, media.clone());
            Ok(media)
        }

        async fn find_media(&self, post_id: PostId) -> Result<Option<Media>, PortError> {
            Ok(self.media.read().await.get(&post_id).cloned())
        }

        async fn delete_media(&self, post_id: PostId) -> Result<u64, PortError> {
            Ok(self.media.write().await.remove(&post_id).map(|_| 1).unwrap_or(0))
        }

        async fn find_category_by_name(&self, name: &str) -> Result<Option<Category>, PortError> {
            Ok(self
                .categories
                .read()
                .await
                .iter()
                .find(|c| c.matches_name(name))
                .cloned())
        }

        async fn list_categories(&self) -> Result<Vec<Category>, PortError> {
            Ok(self.categories.read().await.clone())
        }
    }
}
