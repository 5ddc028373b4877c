//! Which mutating actions are offered on a revision.

use crate::release::{Release, ReleasePhase};

use super::model::Revision;

/// Gatekeeping rules for tag changes and "new revision from this one".
///
/// Both are only offered for a revision that is not the latest, and only
/// while the release is a draft or the revision itself was made in preview.
#[derive(Debug, Clone, Copy)]
pub struct RevisionPolicy;

impl RevisionPolicy {
    /// Whether mutating actions may be offered for `revision`.
    pub fn can_modify(
        release_phase: ReleasePhase,
        revision: &Revision,
        latest_revision_number: Option<&str>,
    ) -> bool {
        let is_latest = latest_revision_number == Some(revision.number.as_str());
        !is_latest && (release_phase.is_draft() || revision.is_preview())
    }

    /// Convenience wrapper taking the release record.
    pub fn can_modify_in(release: &Release, revision: &Revision) -> bool {
        Self::can_modify(
            release.phase,
            revision,
            release.latest_revision_number.as_deref(),
        )
    }
}
