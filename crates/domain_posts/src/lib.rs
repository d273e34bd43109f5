//! Posting Board Domain
//!
//! This crate implements the lost-and-found posting board: LOST/FOUND item
//! posts, their attached media, and the category lookup collection.
//!
//! # Post Lifecycle
//!
//! ```text
//! Unclaimed -> ClaimInProgress -> Claimed
//!     ^              |
//!     +--------------+   (last pending claim denied or deleted)
//! ```
//!
//! Post status is mutated only by the claim engine (`domain_claims`); the
//! owner's routine update covers non-status fields only.

pub mod post;
pub mod media;
pub mod category;
pub mod ports;
pub mod service;
pub mod error;
pub mod adapters;

pub use post::{Post, PostStatus, PostType, NewPost, PostUpdate, CategorySelection};
pub use media::{Media, NewMedia};
pub use category::Category;
pub use ports::{PostStore, PostQuery};
pub use service::{PostService, CreatePostRequest, PostDetail, PostPage};
pub use error::PostError;
