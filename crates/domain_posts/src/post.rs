//! Post aggregate

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use core_kernel::{CategoryId, CoreError, PostId, UserId};

/// Post status
///
/// Mutated only by the claim engine. `Claimed` is final: no conditional
/// writer ever overwrites it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostStatus {
    /// No pending or approved claims reference the post
    Unclaimed,
    /// At least one pending claim exists
    ClaimInProgress,
    /// A claim was approved; claimed_by or found_by records the winner
    Claimed,
}

impl PostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Unclaimed => "unclaimed",
            PostStatus::ClaimInProgress => "claim_in_progress",
            PostStatus::Claimed => "claimed",
        }
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PostStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unclaimed" => Ok(PostStatus::Unclaimed),
            "claim_in_progress" => Ok(PostStatus::ClaimInProgress),
            "claimed" => Ok(PostStatus::Claimed),
            other => Err(CoreError::validation(format!("unknown post status '{other}'"))),
        }
    }
}

/// Whether the post reports a lost or a found item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostType {
    Lost,
    Found,
}

impl PostType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostType::Lost => "lost",
            PostType::Found => "found",
        }
    }
}

impl fmt::Display for PostType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PostType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lost" => Ok(PostType::Lost),
            "found" => Ok(PostType::Found),
            other => Err(CoreError::validation(format!("unknown post type '{other}'"))),
        }
    }
}

/// Category reference on a post: either a known category or free text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CategorySelection {
    Known(CategoryId),
    Custom(String),
}

/// A lost-and-found post
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    /// Unique identifier
    pub id: PostId,
    /// The user who created the post; holds exclusive mutation rights
    pub owner_id: UserId,
    /// Lost or found
    pub post_type: PostType,
    /// Known category, if the submitted name resolved to one
    pub category_id: Option<CategoryId>,
    /// Free-text category used when no known category matched
    pub custom_category: Option<String>,
    /// Where the item was lost/found
    pub location: String,
    /// When the item was lost/found
    pub date: NaiveDate,
    /// Description
    pub description: String,
    /// Status, owned by the claim engine
    pub status: PostStatus,
    /// Owner whose ownership claim was approved (FOUND posts)
    pub claimed_by: Option<UserId>,
    /// Finder whose finder claim was approved (LOST posts)
    pub found_by: Option<UserId>,
    /// When the winning claim was approved
    pub claimed_at: Option<DateTime<Utc>>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

/// Validated data for creating a post
#[derive(Debug, Clone)]
pub struct NewPost {
    pub owner_id: UserId,
    pub post_type: PostType,
    pub category: CategorySelection,
    pub location: String,
    pub date: NaiveDate,
    pub description: String,
}

/// Owner update to the routine (non-status) fields
#[derive(Debug, Clone, Default)]
pub struct PostUpdate {
    pub description: Option<String>,
    pub location: Option<String>,
}

impl PostUpdate {
    /// True when no field survived trimming
    pub fn is_empty(&self) -> bool {
        self.description.is_none() && self.location.is_none()
    }
}

impl Post {
    /// Creates a new unclaimed post
    pub fn new(data: NewPost) -> Self {
        let now = Utc::now();
        let (category_id, custom_category) = match data.category {
            CategorySelection::Known(id) => (Some(id), None),
            CategorySelection::Custom(name) => (None, Some(name)),
        };

        Self {
            id: PostId::new_v7(),
            owner_id: data.owner_id,
            post_type: data.post_type,
            category_id,
            custom_category,
            location: data.location,
            date: data.date,
            description: data.description,
            status: PostStatus::Unclaimed,
            claimed_by: None,
            found_by: None,
            claimed_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns true when the given user owns this post
    pub fn is_owned_by(&self, user: UserId) -> bool {
        self.owner_id == user
    }

    /// Conditionally flips `Unclaimed -> ClaimInProgress`.
    ///
    /// Returns false without touching the post for any other prior status,
    /// which makes the transition idempotent under concurrent claim creation.
    pub fn begin_claim(&mut self) -> bool {
        if self.status != PostStatus::Unclaimed {
            return false;
        }
        self.status = PostStatus::ClaimInProgress;
        self.updated_at = Utc::now();
        true
    }

    /// Marks the post claimed by the winning claimant.
    ///
    /// FOUND posts record the owner in `claimed_by`; LOST posts record the
    /// finder in `found_by`.
    pub fn resolve_claimed(&mut self, claimant: UserId, at: DateTime<Utc>) {
        match self.post_type {
            PostType::Found => self.claimed_by = Some(claimant),
            PostType::Lost => self.found_by = Some(claimant),
        }
        self.status = PostStatus::Claimed;
        self.claimed_at = Some(at);
        self.updated_at = at;
    }

    /// Reverts the post to `Unclaimed` unless it is already `Claimed`.
    pub fn reopen(&mut self) -> bool {
        if self.status == PostStatus::Claimed {
            return false;
        }
        self.status = PostStatus::Unclaimed;
        self.updated_at = Utc::now();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sample_post(post_type: PostType) -> Post {
        Post::new(NewPost {
            owner_id: UserId::new_v7(),
            post_type,
            category: CategorySelection::Custom("electronics".to_string()),
            location: "Main library".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 11, 3).unwrap(),
            description: "Black umbrella with wooden handle".to_string(),
        })
    }

    #[test]
    fn test_new_post_starts_unclaimed() {
        let post = sample_post(PostType::Found);
        assert_eq!(post.status, PostStatus::Unclaimed);
        assert!(post.claimed_by.is_none());
        assert!(post.found_by.is_none());
        assert!(post.claimed_at.is_none());
    }

    #[test]
    fn test_begin_claim_is_idempotent() {
        let mut post = sample_post(PostType::Found);
        assert!(post.begin_claim());
        assert_eq!(post.status, PostStatus::ClaimInProgress);
        // Second flip is a no-op
        assert!(!post.begin_claim());
        assert_eq!(post.status, PostStatus::ClaimInProgress);
    }

    #[test]
    fn test_begin_claim_never_touches_claimed() {
        let mut post = sample_post(PostType::Found);
        let winner = UserId::new_v7();
        post.resolve_claimed(winner, Utc::now());
        assert!(!post.begin_claim());
        assert_eq!(post.status, PostStatus::Claimed);
    }

    #[test]
    fn test_resolve_claimed_found_post_sets_claimed_by() {
        let mut post = sample_post(PostType::Found);
        let winner = UserId::new_v7();
        post.resolve_claimed(winner, Utc::now());
        assert_eq!(post.status, PostStatus::Claimed);
        assert_eq!(post.claimed_by, Some(winner));
        assert!(post.found_by.is_none());
        assert!(post.claimed_at.is_some());
    }

    #[test]
    fn test_resolve_claimed_lost_post_sets_found_by() {
        let mut post = sample_post(PostType::Lost);
        let finder = UserId::new_v7();
        post.resolve_claimed(finder, Utc::now());
        assert_eq!(post.found_by, Some(finder));
        assert!(post.claimed_by.is_none());
    }

    #[test]
    fn test_reopen_reverts_claim_in_progress() {
        let mut post = sample_post(PostType::Lost);
        post.begin_claim();
        assert!(post.reopen());
        assert_eq!(post.status, PostStatus::Unclaimed);
    }

    #[test]
    fn test_reopen_never_reverts_claimed() {
        let mut post = sample_post(PostType::Found);
        post.resolve_claimed(UserId::new_v7(), Utc::now());
        assert!(!post.reopen());
        assert_eq!(post.status, PostStatus::Claimed);
    }

    proptest! {
        #[test]
        fn prop_status_roundtrips_through_str(status in prop_oneof![
            Just(PostStatus::Unclaimed),
            Just(PostStatus::ClaimInProgress),
            Just(PostStatus::Claimed),
        ]) {
            let parsed: PostStatus = status.as_str().parse().unwrap();
            prop_assert_eq!(parsed, status);
        }

        #[test]
        fn prop_type_roundtrips_through_str(post_type in prop_oneof![
            Just(PostType::Lost),
            Just(PostType::Found),
        ]) {
            let parsed: PostType = post_type.as_str().parse().unwrap();
            prop_assert_eq!(parsed, post_type);
        }
    }
}
