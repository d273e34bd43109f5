//! Request handlers

pub mod health;
pub mod posts;
pub mod claims;
