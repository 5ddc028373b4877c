//! Release entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use relhub_core::types::ReleaseKey;

use super::phase::ReleasePhase;

/// A release of a project, owning a chain of revisions.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Release {
    /// Unique release name, `<project>-<version>`.
    pub name: String,
    /// The project this release belongs to.
    pub project_name: String,
    /// The version being released.
    pub version: String,
    /// Current lifecycle phase of the release as a whole.
    pub phase: ReleasePhase,
    /// Number of the newest revision, if any revision exists.
    pub latest_revision_number: Option<String>,
    /// When the release was created.
    pub created: DateTime<Utc>,
}

impl Release {
    /// The key used to locate this release's snapshots on disk.
    pub fn key(&self) -> ReleaseKey {
        ReleaseKey::new(&self.project_name, &self.version)
    }

    /// Human-readable name, e.g. `"tooling 0.2.1"`.
    pub fn short_display_name(&self) -> String {
        format!("{} {}", self.project_name, self.version)
    }
}
