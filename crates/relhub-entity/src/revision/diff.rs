//! Structural differences between consecutive revision snapshots.

use std::collections::BTreeSet;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::model::Revision;

/// The classification of every path touched between a revision and its
/// predecessor.
///
/// The three lists are sorted ascending, free of duplicates, and pairwise
/// disjoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilesDiff {
    /// Paths present now but not in the predecessor.
    pub added: Vec<PathBuf>,
    /// Paths present in the predecessor but not now.
    pub removed: Vec<PathBuf>,
    /// Paths present in both whose modification time differs or could not
    /// be compared.
    pub modified: Vec<PathBuf>,
}

impl FilesDiff {
    /// Build a diff from already-classified path sets.
    pub fn new(
        added: BTreeSet<PathBuf>,
        removed: BTreeSet<PathBuf>,
        modified: BTreeSet<PathBuf>,
    ) -> Self {
        Self {
            added: added.into_iter().collect(),
            removed: removed.into_iter().collect(),
            modified: modified.into_iter().collect(),
        }
    }

    /// Diff of the first revision in a chain: everything is added.
    pub fn initial(files: BTreeSet<PathBuf>) -> Self {
        Self::new(files, BTreeSet::new(), BTreeSet::new())
    }

    /// Whether no file changed.
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.modified.is_empty()
    }

    /// Total number of touched paths.
    pub fn total_changes(&self) -> usize {
        self.added.len() + self.removed.len() + self.modified.len()
    }
}

/// A revision paired with the diff against its predecessor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevisionDiff {
    /// The revision the diff leads up to.
    pub revision: Revision,
    /// Changes relative to the previous revision in `seq` order.
    pub files: FilesDiff,
    /// Set when the revision's snapshot directory did not exist; the diff was
    /// then computed as if the snapshot were empty.
    pub snapshot_missing: bool,
}
