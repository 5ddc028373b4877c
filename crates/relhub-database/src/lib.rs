//! # relhub-database
//!
//! PostgreSQL connection management, migrations, and the repositories
//! backing the revision timeline and tag writes.

pub mod connection;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use store::{PgRevisionStore, RevisionStore};
