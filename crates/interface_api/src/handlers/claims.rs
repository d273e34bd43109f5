//! Claim handlers
//!
//! Claim creation accepts either a JSON body or a multipart form with an
//! optional photo proof; both feed the same engine operation.

use axum::extract::{FromRequest, Multipart, Path, Query, Request, State};
use axum::http::header::CONTENT_TYPE;
use axum::Json;
use uuid::Uuid;
use validator::Validate;

use core_kernel::PhotoUpload;
use domain_claims::{ClaimType, CreateClaimRequest as EngineCreateClaim, DeletionRole};

use crate::auth::AuthUser;
use crate::dto::claims::{
    CheckClaimResponse, ClaimResponse, CreateClaimRequest, CreateClaimResponse,
    DenyClaimRequest, ListClaimsParams, MyClaimsResponse, PostClaimsResponse,
};
use crate::error::ApiError;
use crate::handlers::posts::read_photo;
use crate::AppState;

/// Creates a claim against a post.
///
/// Accepts `application/json` (no photo) or `multipart/form-data` with an
/// optional `photo_proof` file; both paths run the same validation.
pub async fn create_claim(
    State(state): State<AppState>,
    Path(post_id): Path<Uuid>,
    AuthUser(user): AuthUser,
    request: Request,
) -> Result<Json<CreateClaimResponse>, ApiError> {
    let content_type = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    let (claim_type, message, photo_proof) = if content_type.starts_with("multipart/form-data") {
        parse_claim_form(Multipart::from_request(request, &state)
            .await
            .map_err(|e| ApiError::BadRequest(e.to_string()))?)
        .await?
    } else {
        let Json(body) = Json::<CreateClaimRequest>::from_request(request, &state)
            .await
            .map_err(|e| ApiError::BadRequest(e.to_string()))?;
        body.validate()?;
        (body.claim_type, body.message, None)
    };

    let claim = state
        .claims
        .create_claim(EngineCreateClaim {
            post_id: post_id.into(),
            claimant_id: user,
            claim_type,
            message,
            photo_proof,
        })
        .await?;

    let message = match claim.claim_type {
        ClaimType::FinderClaim => "Found item report sent to owner successfully",
        _ => "Ownership claim submitted successfully",
    };

    Ok(Json(CreateClaimResponse {
        message: message.to_string(),
        claim: claim.into(),
    }))
}

/// The owner's paginated view of a post's claims with grouped counts
pub async fn list_post_claims(
    State(state): State<AppState>,
    Path(post_id): Path<Uuid>,
    AuthUser(user): AuthUser,
    Query(params): Query<ListClaimsParams>,
) -> Result<Json<PostClaimsResponse>, ApiError> {
    let page = params.page_request();
    let result = state
        .claims
        .claims_for_post(post_id.into(), user, params.into_query(), page)
        .await?;

    Ok(Json(PostClaimsResponse {
        claims: result.claims.into_iter().map(Into::into).collect(),
        stats: result.stats,
        pagination: result.pagination,
    }))
}

/// Whether the caller already claimed this post
pub async fn check_claim(
    State(state): State<AppState>,
    Path(post_id): Path<Uuid>,
    AuthUser(user): AuthUser,
) -> Result<Json<CheckClaimResponse>, ApiError> {
    let check = state.claims.check_existing_claim(post_id.into(), user).await?;

    let message = if check.has_claimed {
        "You have already claimed this post."
    } else {
        "You can claim this post."
    };

    Ok(Json(CheckClaimResponse {
        has_claimed: check.has_claimed,
        total_claims: check.total_claims,
        message: message.to_string(),
    }))
}

/// Approves a pending claim (post owner only)
pub async fn approve_claim(
    State(state): State<AppState>,
    Path(claim_id): Path<Uuid>,
    AuthUser(user): AuthUser,
) -> Result<Json<ClaimResponse>, ApiError> {
    let claim = state.claims.approve_claim(claim_id.into(), user).await?;
    Ok(Json(claim.into()))
}

/// Denies a pending claim (post owner only)
pub async fn deny_claim(
    State(state): State<AppState>,
    Path(claim_id): Path<Uuid>,
    AuthUser(user): AuthUser,
    body: Option<Json<DenyClaimRequest>>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let body = body.map(|Json(b)| b).unwrap_or_default();
    body.validate()?;

    state
        .claims
        .deny_claim(claim_id.into(), user, body.reason)
        .await?;

    Ok(Json(serde_json::json!({
        "message": "Claim denied successfully"
    })))
}

/// Post owner deletes a claim on their post
pub async fn delete_claim_as_owner(
    State(state): State<AppState>,
    Path(claim_id): Path<Uuid>,
    AuthUser(user): AuthUser,
) -> Result<Json<serde_json::Value>, ApiError> {
    state
        .claims
        .delete_claim(claim_id.into(), user, DeletionRole::PostOwner)
        .await?;

    Ok(Json(serde_json::json!({
        "message": "Claim deleted successfully"
    })))
}

/// The claimant's paginated view of their own claims; deleted posts surface
/// as null references
pub async fn my_claims(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Query(params): Query<ListClaimsParams>,
) -> Result<Json<MyClaimsResponse>, ApiError> {
    let page = params.page_request();
    let result = state
        .claims
        .claims_for_user(user, params.into_query(), page)
        .await?;

    Ok(Json(MyClaimsResponse {
        claims: result.claims.into_iter().map(Into::into).collect(),
        pagination: result.pagination,
    }))
}

/// Claimant deletes their own claim; works even when the post is gone
pub async fn delete_own_claim(
    State(state): State<AppState>,
    Path(claim_id): Path<Uuid>,
    AuthUser(user): AuthUser,
) -> Result<Json<serde_json::Value>, ApiError> {
    state
        .claims
        .delete_claim(claim_id.into(), user, DeletionRole::Claimant)
        .await?;

    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Claim deleted successfully"
    })))
}

async fn parse_claim_form(
    mut multipart: Multipart,
) -> Result<(ClaimType, Option<String>, Option<PhotoUpload>), ApiError> {
    let mut claim_type = None;
    let mut message = None;
    let mut photo_proof = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "claim_type" => {
                let raw = field
                    .text()
                    .await
                    .map_err(|e| ApiError::BadRequest(e.to_string()))?;
                claim_type = Some(
                    raw.parse::<ClaimType>()
                        .map_err(|_| ApiError::BadRequest("Valid claim type is required".to_string()))?,
                );
            }
            "message" => {
                message = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| ApiError::BadRequest(e.to_string()))?,
                );
            }
            "photo_proof" => photo_proof = read_photo(field).await?,
            _ => {}
        }
    }

    let claim_type =
        claim_type.ok_or_else(|| ApiError::BadRequest("Claim type is required".to_string()))?;

    Ok((claim_type, message, photo_proof))
}
