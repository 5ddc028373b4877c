//! Repository implementations for releases and revisions.

pub mod release;
pub mod revision;

pub use release::ReleaseRepository;
pub use revision::RevisionRepository;
