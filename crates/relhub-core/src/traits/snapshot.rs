//! Read-only access to revision snapshot directories.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::result::AppResult;
use crate::types::ReleaseKey;

/// Trait for the filesystem holding write-once revision snapshots.
///
/// Every path handed out or accepted by this trait is relative to the root
/// of one revision, so the same file compares equal across revisions.
#[async_trait]
pub trait SnapshotStore: Send + Sync + std::fmt::Debug + 'static {
    /// Recursively list every file under a revision's snapshot directory.
    ///
    /// An absent directory yields an empty set, not an error.
    async fn list_paths(
        &self,
        release: &ReleaseKey,
        revision_number: &str,
    ) -> AppResult<BTreeSet<PathBuf>>;

    /// Last-modified time of one file inside a revision's snapshot.
    async fn modified_time(
        &self,
        release: &ReleaseKey,
        revision_number: &str,
        relative_path: &Path,
    ) -> AppResult<DateTime<Utc>>;

    /// Whether the snapshot directory for a revision exists at all.
    async fn snapshot_exists(&self, release: &ReleaseKey, revision_number: &str)
    -> AppResult<bool>;
}
