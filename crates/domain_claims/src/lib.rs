//! Claim Lifecycle Engine
//!
//! This crate implements the claim lifecycle for the lost-and-found board:
//! claim creation, approval, denial, and deletion, together with the rules
//! that co-evolve a post's status with its claims.
//!
//! # Claim Lifecycle
//!
//! ```text
//! Pending -> Approved   (post owner; post becomes Claimed, siblings Denied)
//! Pending -> Denied     (post owner; last pending denial reopens the post)
//! any     -> deleted    (claimant, or the post owner)
//! ```
//!
//! Approved and Denied are terminal except for deletion. All atomicity rests
//! on the store: a unique index on (post, claimant, claim type) closes the
//! duplicate-claim race, and every status write is a conditional update.

pub mod claim;
pub mod engine;
pub mod proof;
pub mod ports;
pub mod error;

pub use claim::{Claim, ClaimStatus, ClaimType, NewClaim};
pub use engine::{
    ClaimCheck, ClaimEngine, CreateClaimRequest, DeletionRole, MyClaim, MyClaimsPage,
    PostClaimsPage,
};
pub use ports::{ClaimQuery, ClaimStats, ClaimStore};
pub use error::ClaimError;
