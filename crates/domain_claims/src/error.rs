//! Claims domain errors
//!
//! Each variant belongs to exactly one kind of the error taxonomy
//! (Forbidden, NotFound, InvalidArgument, Conflict, Internal); the HTTP
//! layer maps kinds to status codes.

use thiserror::Error;

use core_kernel::PortError;

use crate::claim::ClaimType;
use domain_posts::PostType;

/// Errors that can occur in the claims domain
#[derive(Debug, Error)]
pub enum ClaimError {
    #[error("Post not found: {0}")]
    PostNotFound(String),

    #[error("Claim not found: {0}")]
    ClaimNotFound(String),

    #[error("Post is already claimed")]
    PostAlreadyClaimed,

    #[error("You cannot claim your own post")]
    OwnPost,

    #[error("Only {} claims are allowed for {} posts", ClaimType::required_for(*.post_type), .post_type)]
    WrongClaimType {
        post_type: PostType,
        claim_type: ClaimType,
    },

    #[error("Claim message is required")]
    MessageRequired,

    #[error("You have already made a claim for this post")]
    DuplicateClaim,

    #[error("Claim has already been processed")]
    AlreadyProcessed,

    #[error("You can only manage claims for your own posts")]
    NotPostOwner,

    #[error("You can only delete your own claims")]
    NotClaimant,

    #[error("Claim type {0} is not valid for approval")]
    InvalidForApproval(ClaimType),

    #[error("Only JPEG, PNG, and WebP images are allowed, got {0}")]
    UnsupportedImageType(String),

    #[error("File size must be less than {max} bytes, got {size}")]
    PhotoTooLarge { size: usize, max: usize },

    #[error("Photo upload failed: {0}")]
    UploadFailed(String),

    #[error(transparent)]
    Store(#[from] PortError),
}

impl ClaimError {
    /// True for the conflict-kind rejections (duplicate, already processed,
    /// already claimed)
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            ClaimError::PostAlreadyClaimed
                | ClaimError::DuplicateClaim
                | ClaimError::AlreadyProcessed
        ) || matches!(self, ClaimError::Store(e) if e.is_conflict())
    }

    /// True for the forbidden-kind rejections
    pub fn is_forbidden(&self) -> bool {
        matches!(
            self,
            ClaimError::OwnPost | ClaimError::NotPostOwner | ClaimError::NotClaimant
        )
    }
}
