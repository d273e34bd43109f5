//! Post application service
//!
//! Coordinates the routine post CRUD around the `PostStore` port and the
//! object-storage collaborator. Post status is never mutated here; that is
//! the claim engine's job.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info};

use core_kernel::{ObjectStore, PageInfo, PageRequest, PhotoUpload, PostId, UserId};

use crate::category::Category;
use crate::error::PostError;
use crate::media::NewMedia;
use crate::ports::{PostQuery, PostStore};
use crate::post::{CategorySelection, NewPost, Post, PostType, PostUpdate};

/// Request for creating a post
#[derive(Debug, Clone)]
pub struct CreatePostRequest {
    pub owner_id: UserId,
    pub post_type: PostType,
    /// Free-text category input, resolved against the category collection
    pub category: String,
    pub location: String,
    pub date: NaiveDate,
    pub description: String,
    pub photo: Option<PhotoUpload>,
}

/// A post together with its media URL
#[derive(Debug, Clone, Serialize)]
pub struct PostDetail {
    pub post: Post,
    pub image_url: Option<String>,
}

/// One page of posts
#[derive(Debug, Clone, Serialize)]
pub struct PostPage {
    pub posts: Vec<PostDetail>,
    pub pagination: PageInfo,
}

/// Application service for the posting board
pub struct PostService {
    posts: Arc<dyn PostStore>,
    objects: Arc<dyn ObjectStore>,
}

impl PostService {
    pub fn new(posts: Arc<dyn PostStore>, objects: Arc<dyn ObjectStore>) -> Self {
        Self { posts, objects }
    }

    /// Creates a post, resolving the category input and uploading the
    /// optional photo.
    pub async fn create_post(
        &self,
        request: CreatePostRequest,
    ) -> Result<PostDetail, PostError> {
        let category_input = request.category.trim();
        let location = request.location.trim();
        let description = request.description.trim();

        if category_input.is_empty() {
            return Err(PostError::validation("category is required"));
        }
        if location.is_empty() {
            return Err(PostError::validation("location is required"));
        }
        if description.is_empty() {
            return Err(PostError::validation("description is required"));
        }

        // Free-text input that names a known category references it instead
        let category = match self.posts.find_category_by_name(category_input).await? {
            Some(known) => CategorySelection::Known(known.id),
            None => CategorySelection::Custom(category_input.to_string()),
        };

        let post = Post::new(NewPost {
            owner_id: request.owner_id,
            post_type: request.post_type,
            category,
            location: location.to_string(),
            date: request.date,
            description: description.to_string(),
        });
        let post = self.posts.insert(post).await?;

        let image_url = match request.photo {
            Some(photo) => {
                let stored = self
                    .objects
                    .upload(photo)
                    .await
                    .map_err(|e| PostError::UploadFailed(e.to_string()))?;
                let media = self
                    .posts
                    .attach_media(NewMedia {
                        post_id: post.id,
                        image_url: stored.url,
                    })
                    .await?;
                Some(media.image_url)
            }
            None => None,
        };

        info!(post_id = %post.id, post_type = %post.post_type, "post created");
        Ok(PostDetail { post, image_url })
    }

    /// Fetches a post with its media URL
    pub async fn get_post(&self, id: PostId) -> Result<PostDetail, PostError> {
        let post = self
            .posts
            .find(id)
            .await?
            .ok_or_else(|| PostError::PostNotFound(id.to_string()))?;
        let image_url = self.posts.find_media(id).await?.map(|m| m.image_url);
        Ok(PostDetail { post, image_url })
    }

    /// Owner update to description and/or location.
    ///
    /// Status is not an updatable field; it belongs to the claim engine.
    pub async fn update_post(
        &self,
        id: PostId,
        acting_user: UserId,
        update: PostUpdate,
    ) -> Result<Post, PostError> {
        let post = self
            .posts
            .find(id)
            .await?
            .ok_or_else(|| PostError::PostNotFound(id.to_string()))?;
        if !post.is_owned_by(acting_user) {
            return Err(PostError::NotOwner);
        }

        let update = PostUpdate {
            description: normalize(update.description),
            location: normalize(update.location),
        };
        if update.is_empty() {
            return Err(PostError::NoUpdateFields);
        }

        let updated = self.posts.update_details(id, update).await?;
        debug!(post_id = %id, "post updated");
        Ok(updated)
    }

    /// Owner delete. Media rows are cascade-deleted; claims are left in
    /// place and surface to their claimants as "post deleted".
    pub async fn delete_post(&self, id: PostId, acting_user: UserId) -> Result<(), PostError> {
        let post = self
            .posts
            .find(id)
            .await?
            .ok_or_else(|| PostError::PostNotFound(id.to_string()))?;
        if !post.is_owned_by(acting_user) {
            return Err(PostError::NotOwner);
        }

        self.posts.delete_media(id).await?;
        self.posts.delete(id).await?;
        info!(post_id = %id, "post deleted");
        Ok(())
    }

    /// Lists posts matching the query, newest first
    pub async fn list_posts(
        &self,
        query: PostQuery,
        page: PageRequest,
    ) -> Result<PostPage, PostError> {
        let (posts, total) = self.posts.list(&query, page).await?;

        let mut details = Vec::with_capacity(posts.len());
        for post in posts {
            let image_url = self.posts.find_media(post.id).await?.map(|m| m.image_url);
            details.push(PostDetail { post, image_url });
        }

        Ok(PostPage {
            posts: details,
            pagination: PageInfo::from_total(page, total),
        })
    }

    /// Category lookup for the create form
    pub async fn list_categories(&self) -> Result<Vec<Category>, PostError> {
        Ok(self.posts.list_categories().await?)
    }
}

fn normalize(field: Option<String>) -> Option<String> {
    field
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
