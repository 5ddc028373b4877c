//! Revision entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use relhub_core::types::RevisionId;

use crate::release::ReleasePhase;

/// The resolved predecessor of a revision.
///
/// Only carried for display and navigation; chain order always comes from
/// `seq`, never from walking parents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevisionParent {
    /// The parent's record ID.
    pub id: RevisionId,
    /// The parent's revision number.
    pub number: String,
    /// The parent's position in the release.
    pub seq: i32,
}

/// One immutable snapshot record in a release's revision chain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Revision {
    /// Unique record identifier.
    pub id: RevisionId,
    /// The release this revision belongs to.
    pub release_name: String,
    /// Identifier unique within the release; also the snapshot directory name.
    pub number: String,
    /// Position in the release. Strictly increasing, never duplicated.
    pub seq: i32,
    /// The immediately preceding revision, `None` only for the first one.
    pub parent: Option<RevisionParent>,
    /// Release phase at the time this revision was created.
    pub phase: ReleasePhase,
    /// Optional mutable label.
    pub tag: Option<String>,
    /// Free text set at creation.
    pub description: Option<String>,
    /// When the revision was created.
    pub created: DateTime<Utc>,
    /// ASF UID of the committer who created the revision.
    pub asfuid: String,
}

impl Revision {
    /// Label shown in listings: `"00003 (v1.0-RC1)"` when tagged.
    pub fn display_label(&self) -> String {
        match self.tag.as_deref() {
            Some(tag) if !tag.is_empty() => format!("{} ({tag})", self.number),
            _ => self.number.clone(),
        }
    }

    /// Check if this revision was created while the release was in preview.
    pub fn is_preview(&self) -> bool {
        self.phase.is_preview()
    }

    /// Creation time formatted for listings.
    pub fn created_display(&self) -> String {
        self.created.format("%Y-%m-%d %H:%M:%S UTC").to_string()
    }
}
