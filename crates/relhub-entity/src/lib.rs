//! # relhub-entity
//!
//! Domain entity models for RelHub. Persisted entities mirror database rows;
//! [`revision::FilesDiff`] and [`revision::RevisionTag`] are value objects
//! that are never stored on their own.

pub mod release;
pub mod revision;
