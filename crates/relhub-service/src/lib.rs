//! # relhub-service
//!
//! Services over the revision chain of a release: loading the ordered
//! timeline, diffing consecutive snapshots, building the newest-first
//! history view, and setting tags.
//!
//! Services follow constructor injection; collaborators are passed in as
//! `Arc<dyn ...>` trait objects.

pub mod context;
pub mod diff;
pub mod history;
pub mod tag;
pub mod timeline;

pub use context::RequestContext;
pub use diff::DiffEngine;
pub use history::{HistoryService, ReleaseHistory, RevisionHistoryEntry};
pub use tag::TagService;
pub use timeline::{RevisionTimeline, TimelineService};
