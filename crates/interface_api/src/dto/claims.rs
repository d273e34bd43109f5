//! Claims DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use core_kernel::{PageInfo, PageRequest};
use domain_claims::{Claim, ClaimQuery, ClaimStats, ClaimStatus, ClaimType, MyClaim};
use domain_posts::Post;

/// JSON body for creating a claim (the multipart form carries the same
/// fields plus the photo)
#[derive(Debug, Deserialize, Validate)]
pub struct CreateClaimRequest {
    pub claim_type: ClaimType,
    #[validate(length(max = 2000))]
    pub message: Option<String>,
}

/// Body for denying a claim
#[derive(Debug, Default, Deserialize, Validate)]
pub struct DenyClaimRequest {
    #[validate(length(max = 1000))]
    pub reason: Option<String>,
}

/// Query parameters for listing claims
#[derive(Debug, Deserialize, Default)]
pub struct ListClaimsParams {
    pub status: Option<ClaimStatus>,
    pub claim_type: Option<ClaimType>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl ListClaimsParams {
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.page.unwrap_or(1), self.limit.unwrap_or(10))
    }

    pub fn into_query(self) -> ClaimQuery {
        ClaimQuery {
            status: self.status,
            claim_type: self.claim_type,
        }
    }
}

/// A claim as returned by the API
#[derive(Debug, Serialize)]
pub struct ClaimResponse {
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
}

impl From<Claim> for ClaimResponse {
    fn from(claim: Claim) -> Self {
        Self {
            id: claim.id.into(),
            post_id: claim.post_id.into(),
            claimant_id: claim.claimant_id.into(),
            claim_type: claim.claim_type.as_str().to_string(),
            message: claim.message,
            photo_proof: claim.photo_proof,
            status: claim.status.as_str().to_string(),
            denial_reason: claim.denial_reason,
            approved_at: claim.approved_at,
            denied_at: claim.denied_at,
            created_at: claim.created_at,
        }
    }
}

/// Response for claim creation
#[derive(Debug, Serialize)]
pub struct CreateClaimResponse {
    pub message: String,
    pub claim: ClaimResponse,
}

/// The owner's view of a post's claims
#[derive(Debug, Serialize)]
pub struct PostClaimsResponse {
    pub claims: Vec<ClaimResponse>,
    pub stats: ClaimStats,
    pub pagination: PageInfo,
}

/// Summary of the post a claim targets; None when the post was deleted
#[derive(Debug, Serialize)]
pub struct PostSummary {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub post_type: String,
    pub description: String,
    pub location: String,
    pub status: String,
}

impl From<Post> for PostSummary {
    fn from(post: Post) -> Self {
        Self {
            id: post.id.into(),
            post_type: post.post_type.as_str().to_string(),
            description: post.description,
            location: post.location,
            status: post.status.as_str().to_string(),
        }
    }
}

/// One entry in the claimant's view
#[derive(Debug, Serialize)]
pub struct MyClaimResponse {
    pub claim: ClaimResponse,
    /// None renders as "post deleted" in the client
    pub post: Option<PostSummary>,
}

impl From<MyClaim> for MyClaimResponse {
    fn from(entry: MyClaim) -> Self {
        Self {
            claim: entry.claim.into(),
            post: entry.post.map(Into::into),
        }
    }
}

/// The claimant's claims page
#[derive(Debug, Serialize)]
pub struct MyClaimsResponse {
    pub claims: Vec<MyClaimResponse>,
    pub pagination: PageInfo,
}

/// Response for the has-claimed check
#[derive(Debug, Serialize)]
pub struct CheckClaimResponse {
    pub has_claimed: bool,
    pub total_claims: u64,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_claim_request_deserializes_snake_case() {
        let body: CreateClaimRequest =
            serde_json::from_str(r#"{"claim_type": "ownership_claim", "message": "mine"}"#)
                .unwrap();
        assert_eq!(body.claim_type, ClaimType::OwnershipClaim);
        assert_eq!(body.message.as_deref(), Some("mine"));
    }

    #[test]
    fn test_create_claim_request_rejects_unknown_type() {
        let result: Result<CreateClaimRequest, _> =
            serde_json::from_str(r#"{"claim_type": "grab"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_list_params_default_page() {
        let params = ListClaimsParams::default();
        assert_eq!(params.page_request().limit(), 10);
        assert_eq!(params.page_request().offset(), 0);
    }
}
