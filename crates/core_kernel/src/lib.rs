//! Core Kernel - Foundational types and utilities for the lost-and-found system
//!
//! This crate provides the fundamental building blocks used across all domain modules:
//! - Strongly-typed identifiers
//! - Port infrastructure for the hexagonal architecture (errors, markers, collaborators)
//! - Pagination value objects

pub mod identifiers;
pub mod error;
pub mod ports;
pub mod pagination;

pub use identifiers::{PostId, ClaimId, UserId, CategoryId, MediaId};
pub use error::CoreError;
pub use ports::{PortError, DomainPort, ObjectStore, StoredObject, PhotoUpload};
pub use pagination::{PageRequest, PageInfo};
