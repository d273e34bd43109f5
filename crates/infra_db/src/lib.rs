//! Infrastructure Database Layer
//!
//! This crate provides the PostgreSQL infrastructure for the lost-and-found
//! system, implementing the domain store ports on SQLx.
//!
//! # Architecture
//!
//! The crate follows the repository pattern: `repositories` holds row-level
//! data access, `adapters` implements the domain port traits on top of the
//! repositories and translates database errors into typed port errors. The
//! connection pool is an explicitly constructed, injected handle - there is
//! no process-wide connection state.
//!
//! # Store guarantees
//!
//! The claim engine's invariants rest on two database facilities declared in
//! `migrations/0001_init.sql`:
//!
//! - the unique composite index on `(post_id, claimant_id, claim_type)`,
//!   surfaced as a typed `Conflict` by the claims adapter;
//! - conditional single-row updates (`... WHERE status = 'pending'`), whose
//!   affected-row count reports whether the compare-and-swap won.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{DatabaseConfig, create_pool};
//! use infra_db::adapters::{PostgresPostStore, PostgresClaimStore};
//!
//! let pool = create_pool(DatabaseConfig::new("postgres://localhost/lostfound")).await?;
//! let posts = PostgresPostStore::new(pool.clone());
//! let claims = PostgresClaimStore::new(pool);
//! ```

pub mod pool;
pub mod error;
pub mod repositories;
pub mod adapters;

pub use pool::{DatabasePool, create_pool, create_pool_from_url, DatabaseConfig};
pub use error::DatabaseError;
pub use adapters::{PostgresPostStore, PostgresClaimStore};
