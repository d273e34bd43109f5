//! Test Data Builders
//!
//! Builder patterns for constructing test entities with sensible defaults.
//! Tests specify only the relevant fields and take defaults for the rest.

use chrono::{NaiveDate, Utc};

use core_kernel::{ClaimId, PostId, UserId};
use domain_claims::{Claim, ClaimStatus, ClaimType};
use domain_posts::{Post, PostStatus, PostType};

use crate::fixtures::{DateFixtures, StringFixtures};

/// Builder for constructing test posts
pub struct TestPostBuilder {
    owner_id: UserId,
    post_type: PostType,
    status: PostStatus,
    location: String,
    date: NaiveDate,
    description: String,
    custom_category: Option<String>,
    claimed_by: Option<UserId>,
    found_by: Option<UserId>,
}

impl Default for TestPostBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestPostBuilder {
    /// Creates a builder with default values: a FOUND post, unclaimed
    pub fn new() -> Self {
        Self {
            owner_id: UserId::new_v7(),
            post_type: PostType::Found,
            status: PostStatus::Unclaimed,
            location: StringFixtures::location(),
            date: DateFixtures::recent(),
            description: StringFixtures::description(),
            custom_category: Some(StringFixtures::category_name().to_string()),
            claimed_by: None,
            found_by: None,
        }
    }

    pub fn with_owner(mut self, owner: UserId) -> Self {
        self.owner_id = owner;
        self
    }

    pub fn with_type(mut self, post_type: PostType) -> Self {
        self.post_type = post_type;
        self
    }

    pub fn with_status(mut self, status: PostStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_claimed_by(mut self, user: UserId) -> Self {
        self.claimed_by = Some(user);
        self
    }

    pub fn with_found_by(mut self, user: UserId) -> Self {
        self.found_by = Some(user);
        self
    }

    /// Builds the post
    pub fn build(self) -> Post {
        let now = Utc::now();
        let claimed_at = if self.status == PostStatus::Claimed {
            Some(now)
        } else {
            None
        };
        Post {
            id: PostId::new_v7(),
            owner_id: self.owner_id,
            post_type: self.post_type,
            category_id: None,
            custom_category: self.custom_category,
            location: self.location,
            date: self.date,
            description: self.description,
            status: self.status,
            claimed_by: self.claimed_by,
            found_by: self.found_by,
            claimed_at,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Builder for constructing test claims
pub struct TestClaimBuilder {
    post_id: PostId,
    claimant_id: UserId,
    claim_type: ClaimType,
    status: ClaimStatus,
    message: String,
    photo_proof: Option<String>,
}

impl Default for TestClaimBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestClaimBuilder {
    /// Creates a builder with default values: a pending ownership claim
    pub fn new() -> Self {
        Self {
            post_id: PostId::new_v7(),
            claimant_id: UserId::new_v7(),
            claim_type: ClaimType::OwnershipClaim,
            status: ClaimStatus::Pending,
            message: StringFixtures::claim_message(),
            photo_proof: None,
        }
    }

    pub fn with_post(mut self, post_id: PostId) -> Self {
        self.post_id = post_id;
        self
    }

    pub fn with_claimant(mut self, claimant: UserId) -> Self {
        self.claimant_id = claimant;
        self
    }

    pub fn with_type(mut self, claim_type: ClaimType) -> Self {
        self.claim_type = claim_type;
        self
    }

    pub fn with_status(mut self, status: ClaimStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn with_photo_proof(mut self, url: impl Into<String>) -> Self {
        self.photo_proof = Some(url.into());
        self
    }

    /// Builds the claim, stamping the terminal timestamp matching the status
    pub fn build(self) -> Claim {
        let now = Utc::now();
        Claim {
            id: ClaimId::new_v7(),
            post_id: self.post_id,
            claimant_id: self.claimant_id,
            claim_type: self.claim_type,
            message: self.message,
            photo_proof: self.photo_proof,
            status: self.status,
            denial_reason: match self.status {
                ClaimStatus::Denied => Some(String::new()),
                _ => None,
            },
            approved_at: match self.status {
                ClaimStatus::Approved => Some(now),
                _ => None,
            },
            denied_at: match self.status {
                ClaimStatus::Denied => Some(now),
                _ => None,
            },
            created_at: now,
            updated_at: now,
        }
    }
}
