//! Request/response data transfer objects

pub mod posts;
pub mod claims;
