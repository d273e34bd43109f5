//! Claim aggregate

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use core_kernel::{ClaimId, CoreError, PostId, UserId};
use domain_posts::PostType;

/// Claim status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimStatus {
    /// Awaiting the post owner's decision
    Pending,
    /// Accepted by the post owner; terminal
    Approved,
    /// Rejected by the post owner; terminal
    Denied,
}

impl ClaimStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimStatus::Pending => "pending",
            ClaimStatus::Approved => "approved",
            ClaimStatus::Denied => "denied",
        }
    }
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClaimStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ClaimStatus::Pending),
            "approved" => Ok(ClaimStatus::Approved),
            "denied" => Ok(ClaimStatus::Denied),
            other => Err(CoreError::validation(format!("unknown claim status '{other}'"))),
        }
    }
}

/// Claim type
///
/// `OwnerRequest` is declared for wire compatibility but reserved: it matches
/// no post type at creation and is invalid for approval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimType {
    /// "This found item is mine" - against FOUND posts
    OwnershipClaim,
    /// "I found your lost item" - against LOST posts
    FinderClaim,
    /// Reserved, not part of the modeled state machine
    OwnerRequest,
}

impl ClaimType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimType::OwnershipClaim => "ownership_claim",
            ClaimType::FinderClaim => "finder_claim",
            ClaimType::OwnerRequest => "owner_request",
        }
    }

    /// The single claim type a post of the given type accepts
    pub fn required_for(post_type: PostType) -> ClaimType {
        match post_type {
            PostType::Lost => ClaimType::FinderClaim,
            PostType::Found => ClaimType::OwnershipClaim,
        }
    }

    /// True when this claim type is the one the post type accepts
    pub fn matches_post_type(&self, post_type: PostType) -> bool {
        *self == Self::required_for(post_type)
    }
}

impl fmt::Display for ClaimType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClaimType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ownership_claim" => Ok(ClaimType::OwnershipClaim),
            "finder_claim" => Ok(ClaimType::FinderClaim),
            "owner_request" => Ok(ClaimType::OwnerRequest),
            other => Err(CoreError::validation(format!("unknown claim type '{other}'"))),
        }
    }
}

/// A claim against a post
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claim {
    /// Unique identifier
    pub id: ClaimId,
    /// The post this claim targets; the post may be deleted later
    pub post_id: PostId,
    /// The user making the claim; holds deletion rights
    pub claimant_id: UserId,
    /// Ownership or finder claim
    pub claim_type: ClaimType,
    /// Message to the post owner
    pub message: String,
    /// Optional photo-proof URL from object storage
    pub photo_proof: Option<String>,
    /// Status
    pub status: ClaimStatus,
    /// Reason given on denial, empty string when none
    pub denial_reason: Option<String>,
    /// When the claim was approved
    pub approved_at: Option<DateTime<Utc>>,
    /// When the claim was denied
    pub denied_at: Option<DateTime<Utc>>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

/// Data for creating a claim
#[derive(Debug, Clone)]
pub struct NewClaim {
    pub post_id: PostId,
    pub claimant_id: UserId,
    pub claim_type: ClaimType,
    pub message: String,
    pub photo_proof: Option<String>,
}

impl Claim {
    /// Creates a new pending claim
    pub fn new(data: NewClaim) -> Self {
        let now = Utc::now();
        Self {
            id: ClaimId::new_v7(),
            post_id: data.post_id,
            claimant_id: data.claimant_id,
            claim_type: data.claim_type,
            message: data.message,
            photo_proof: data.photo_proof,
            status: ClaimStatus::Pending,
            denial_reason: None,
            approved_at: None,
            denied_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == ClaimStatus::Pending
    }

    /// Approval/denial is one-shot; a processed claim only changes by deletion
    pub fn is_terminal(&self) -> bool {
        !self.is_pending()
    }

    /// Compare-and-swap approval: transitions only from Pending.
    ///
    /// Returns false without writing when the claim was already processed.
    pub fn approve(&mut self, at: DateTime<Utc>) -> bool {
        if !self.is_pending() {
            return false;
        }
        self.status = ClaimStatus::Approved;
        self.approved_at = Some(at);
        self.updated_at = at;
        true
    }

    /// Compare-and-swap denial: transitions only from Pending.
    pub fn deny(&mut self, at: DateTime<Utc>, reason: &str) -> bool {
        if !self.is_pending() {
            return false;
        }
        self.status = ClaimStatus::Denied;
        self.denied_at = Some(at);
        self.denial_reason = Some(reason.to_string());
        self.updated_at = at;
        true
    }
}
