//! Row-level repository implementations

pub mod posts;
pub mod claims;

pub use posts::{PostRepository, PostRow, MediaRow, CategoryRow};
pub use claims::{ClaimRepository, ClaimRow, StatusCount};
