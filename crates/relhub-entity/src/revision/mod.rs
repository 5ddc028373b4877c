//! Revision domain entities.

pub mod diff;
pub mod model;
pub mod policy;
pub mod tag;

pub use diff::{FilesDiff, RevisionDiff};
pub use model::{Revision, RevisionParent};
pub use policy::RevisionPolicy;
pub use tag::{MAX_TAG_BYTES, RevisionTag, TagError};
