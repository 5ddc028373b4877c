//! Revision history: the diffed timeline of a release, prepared for display.

use serde::Serialize;
use tokio_util::sync::CancellationToken;

use relhub_core::result::AppResult;
use relhub_entity::release::Release;
use relhub_entity::revision::{FilesDiff, Revision, RevisionDiff, RevisionPolicy};

use crate::diff::DiffEngine;
use crate::timeline::TimelineService;

/// One revision card in the history view.
#[derive(Debug, Clone, Serialize)]
pub struct RevisionHistoryEntry {
    /// The revision.
    pub revision: Revision,
    /// Changes relative to the previous revision.
    pub files: FilesDiff,
    /// The snapshot directory was absent when diffing.
    pub snapshot_missing: bool,
    /// This is the newest revision of the release.
    pub is_latest: bool,
    /// Whether tag changes and "new revision from this one" may be offered.
    pub modifiable: bool,
}

impl RevisionHistoryEntry {
    /// Short phase badge, e.g. `"draft"`.
    pub fn phase_key(&self) -> &'static str {
        self.revision.phase.short_key()
    }

    /// Number of the revision this one is diffed against.
    pub fn parent_number(&self) -> Option<&str> {
        self.revision.parent.as_ref().map(|p| p.number.as_str())
    }
}

/// The full history of a release, newest revision first.
#[derive(Debug, Clone, Serialize)]
pub struct ReleaseHistory {
    /// The release.
    pub release: Release,
    /// Entries ordered newest to oldest.
    pub entries: Vec<RevisionHistoryEntry>,
}

/// Combines the timeline builder and the diff engine.
#[derive(Debug, Clone)]
pub struct HistoryService {
    timeline: TimelineService,
    engine: DiffEngine,
}

impl HistoryService {
    /// Creates a new history service.
    pub fn new(timeline: TimelineService, engine: DiffEngine) -> Self {
        Self { timeline, engine }
    }

    /// Load a release's revisions and diff each against its predecessor.
    ///
    /// Results are oldest first, in `seq` order.
    pub async fn diff_timeline(
        &self,
        release_name: &str,
        cancel: &CancellationToken,
    ) -> AppResult<(Release, Vec<RevisionDiff>)> {
        let timeline = self.timeline.timeline(release_name).await?;
        let (release, revisions) = timeline.into_parts();
        let diffs = self.engine.diff(&release.key(), revisions, cancel).await?;
        Ok((release, diffs))
    }

    /// Build the newest-first history view of a release.
    pub async fn history(
        &self,
        release_name: &str,
        cancel: &CancellationToken,
    ) -> AppResult<ReleaseHistory> {
        let (release, diffs) = self.diff_timeline(release_name, cancel).await?;
        let latest_number = diffs.last().map(|d| d.revision.number.clone());

        let entries = diffs
            .into_iter()
            .rev()
            .map(|diff| {
                let is_latest = latest_number.as_deref() == Some(diff.revision.number.as_str());
                let modifiable = RevisionPolicy::can_modify(
                    release.phase,
                    &diff.revision,
                    latest_number.as_deref(),
                );
                RevisionHistoryEntry {
                    revision: diff.revision,
                    files: diff.files,
                    snapshot_missing: diff.snapshot_missing,
                    is_latest,
                    modifiable,
                }
            })
            .collect();

        Ok(ReleaseHistory { release, entries })
    }
}
