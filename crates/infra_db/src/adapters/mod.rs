//! Port adapters implementing the domain store traits on PostgreSQL

pub mod posts;
pub mod claims;

pub use posts::PostgresPostStore;
pub use claims::PostgresClaimStore;
