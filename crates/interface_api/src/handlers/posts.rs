//! Post handlers

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use uuid::Uuid;
use validator::Validate;

use core_kernel::{PageInfo, PhotoUpload};
use domain_posts::{CreatePostRequest, PostUpdate};

use crate::auth::{AuthUser, MaybeAuthUser};
use crate::dto::posts::{
    CategoryResponse, ListPostsParams, PostResponse, PostsPageResponse, UpdatePostRequest,
};
use crate::error::ApiError;
use crate::AppState;

/// Creates a post from a multipart form: type, category, location, date,
/// description, and an optional photo
pub async fn create_post(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<PostResponse>), ApiError> {
    let mut post_type = None;
    let mut category = None;
    let mut location = None;
    let mut date = None;
    let mut description = None;
    let mut photo = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "type" => post_type = Some(read_text(field).await?),
            "category" => category = Some(read_text(field).await?),
            "location" => location = Some(read_text(field).await?),
            "date" => date = Some(read_text(field).await?),
            "description" => description = Some(read_text(field).await?),
            "photo" => photo = read_photo(field).await?,
            _ => {}
        }
    }

    let (post_type, category, location, date, description) =
        match (post_type, category, location, date, description) {
            (Some(t), Some(c), Some(l), Some(d), Some(desc)) => (t, c, l, d, desc),
            _ => return Err(ApiError::BadRequest("All fields are required".to_string())),
        };

    let post_type = post_type
        .to_lowercase()
        .parse()
        .map_err(|_| ApiError::BadRequest("Invalid post type".to_string()))?;
    let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
        .map_err(|_| ApiError::BadRequest("Invalid date format".to_string()))?;

    let detail = state
        .posts
        .create_post(CreatePostRequest {
            owner_id: user,
            post_type,
            category,
            location,
            date,
            description,
            photo,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(PostResponse::from_detail(detail, Some(user))),
    ))
}

/// Lists posts with filters and pagination; only-mine requires a principal
pub async fn list_posts(
    State(state): State<AppState>,
    MaybeAuthUser(user): MaybeAuthUser,
    Query(params): Query<ListPostsParams>,
) -> Result<Json<PostsPageResponse>, ApiError> {
    // An anonymous only-mine request has nothing to show
    if params.only_mine && user.is_none() {
        return Ok(Json(PostsPageResponse {
            posts: vec![],
            pagination: PageInfo::from_total(params.page_request(), 0),
        }));
    }

    let page = params.page_request();
    let result = state.posts.list_posts(params.into_query(user), page).await?;

    Ok(Json(PostsPageResponse {
        posts: result
            .posts
            .into_iter()
            .map(|d| PostResponse::from_detail(d, user))
            .collect(),
        pagination: result.pagination,
    }))
}

/// Fetches a single post with its media URL and an is_owner flag
pub async fn get_post(
    State(state): State<AppState>,
    MaybeAuthUser(user): MaybeAuthUser,
    Path(post_id): Path<Uuid>,
) -> Result<Json<PostResponse>, ApiError> {
    let detail = state.posts.get_post(post_id.into()).await?;
    Ok(Json(PostResponse::from_detail(detail, user)))
}

/// Owner update to description and/or location
pub async fn update_post(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(post_id): Path<Uuid>,
    Json(body): Json<UpdatePostRequest>,
) -> Result<Json<PostResponse>, ApiError> {
    body.validate()?;

    let post = state
        .posts
        .update_post(
            post_id.into(),
            user,
            PostUpdate {
                description: body.description,
                location: body.location,
            },
        )
        .await?;

    let image_url = None;
    Ok(Json(PostResponse::from_detail(
        domain_posts::PostDetail { post, image_url },
        Some(user),
    )))
}

/// Owner delete; media is cascade-deleted, claims are orphaned
pub async fn delete_post(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(post_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.posts.delete_post(post_id.into(), user).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Post deleted successfully"
    })))
}

/// Category lookup
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<CategoryResponse>>, ApiError> {
    let categories = state.posts.list_categories().await?;
    Ok(Json(categories.into_iter().map(Into::into).collect()))
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String, ApiError> {
    field
        .text()
        .await
        .map_err(|e| ApiError::BadRequest(e.to_string()))
}

pub(crate) async fn read_photo(
    field: axum::extract::multipart::Field<'_>,
) -> Result<Option<PhotoUpload>, ApiError> {
    let filename = field.file_name().unwrap_or("upload").to_string();
    let content_type = field
        .content_type()
        .unwrap_or("application/octet-stream")
        .to_string();
    let bytes = field
        .bytes()
        .await
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    if bytes.is_empty() {
        return Ok(None);
    }
    Ok(Some(PhotoUpload::new(bytes.to_vec(), filename, content_type)))
}
