//! Posts DTOs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use core_kernel::{PageInfo, PageRequest, UserId};
use domain_posts::{Category, PostDetail, PostQuery, PostType};

/// Query parameters for listing posts
#[derive(Debug, Deserialize, Default)]
pub struct ListPostsParams {
    /// "lost" or "found", case-insensitive
    #[serde(rename = "type")]
    pub post_type: Option<String>,
    pub category: Option<Uuid>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub keyword: Option<String>,
    #[serde(default)]
    pub only_mine: bool,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl ListPostsParams {
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.page.unwrap_or(1), self.limit.unwrap_or(5))
    }

    /// Builds the domain query; `current_user` backs the only-mine filter
    pub fn into_query(self, current_user: Option<UserId>) -> PostQuery {
        PostQuery {
            post_type: self
                .post_type
                .as_deref()
                .and_then(|t| t.to_lowercase().parse::<PostType>().ok()),
            category_id: self.category.map(Into::into),
            start_date: self.start_date,
            end_date: self.end_date,
            keyword: self.keyword.filter(|k| !k.trim().is_empty()),
            owner_id: if self.only_mine { current_user } else { None },
        }
    }
}

/// Owner update to a post's routine fields
#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePostRequest {
    #[validate(length(max = 5000))]
    pub description: Option<String>,
    #[validate(length(max = 500))]
    pub location: Option<String>,
}

/// A post as returned by the API
#[derive(Debug, Serialize)]
pub struct PostResponse {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub post_type: String,
    pub category_id: Option<Uuid>,
    pub custom_category: Option<String>,
    pub location: String,
    pub date: NaiveDate,
    pub description: String,
    pub status: String,
    pub claimed_by: Option<Uuid>,
    pub found_by: Option<Uuid>,
    pub image_url: Option<String>,
    pub is_owner: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PostResponse {
    pub fn from_detail(detail: PostDetail, current_user: Option<UserId>) -> Self {
        let post = detail.post;
        Self {
            id: post.id.into(),
            post_type: post.post_type.as_str().to_string(),
            category_id: post.category_id.map(Into::into),
            custom_category: post.custom_category,
            location: post.location,
            date: post.date,
            description: post.description,
            status: post.status.as_str().to_string(),
            claimed_by: post.claimed_by.map(Into::into),
            found_by: post.found_by.map(Into::into),
            image_url: detail.image_url,
            is_owner: current_user == Some(post.owner_id),
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

/// One page of posts
#[derive(Debug, Serialize)]
pub struct PostsPageResponse {
    pub posts: Vec<PostResponse>,
    pub pagination: PageInfo,
}

/// A category as returned by the API
#[derive(Debug, Serialize)]
pub struct CategoryResponse {
    pub id: Uuid,
    pub name: String,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id.into(),
            name: category.name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_params_parse_uppercase_type() {
        let params = ListPostsParams {
            post_type: Some("FOUND".to_string()),
            ..Default::default()
        };
        let query = params.into_query(None);
        assert_eq!(query.post_type, Some(PostType::Found));
    }

    #[test]
    fn test_list_params_drop_invalid_type() {
        let params = ListPostsParams {
            post_type: Some("stolen".to_string()),
            ..Default::default()
        };
        let query = params.into_query(None);
        assert!(query.post_type.is_none());
    }

    #[test]
    fn test_only_mine_requires_a_user() {
        let params = ListPostsParams {
            only_mine: true,
            ..Default::default()
        };
        let user = UserId::new_v7();
        assert_eq!(params.into_query(Some(user)).owner_id, Some(user));
    }

    #[test]
    fn test_default_page_size_is_five() {
        let params = ListPostsParams::default();
        assert_eq!(params.page_request().limit(), 5);
    }
}
