//! Release lifecycle phase enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The lifecycle stage of a release, also recorded on every revision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "release_phase", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ReleasePhase {
    /// Files are still being composed.
    ReleaseCandidateDraft,
    /// The candidate is out for a vote.
    ReleaseCandidate,
    /// The vote passed and the release is being finished.
    ReleasePreview,
    /// The release is final.
    Release,
}

impl ReleasePhase {
    /// Return the phase as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ReleaseCandidateDraft => "release_candidate_draft",
            Self::ReleaseCandidate => "release_candidate",
            Self::ReleasePreview => "release_preview",
            Self::Release => "release",
        }
    }

    /// Short key used for badges: the last `_` segment of [`Self::as_str`].
    pub fn short_key(&self) -> &'static str {
        match self {
            Self::ReleaseCandidateDraft => "draft",
            Self::ReleaseCandidate => "candidate",
            Self::ReleasePreview => "preview",
            Self::Release => "release",
        }
    }

    /// Check if this is the draft (compose) phase.
    pub fn is_draft(&self) -> bool {
        matches!(self, Self::ReleaseCandidateDraft)
    }

    /// Check if this is the preview (finish) phase.
    pub fn is_preview(&self) -> bool {
        matches!(self, Self::ReleasePreview)
    }
}

impl fmt::Display for ReleasePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ReleasePhase {
    type Err = relhub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "release_candidate_draft" => Ok(Self::ReleaseCandidateDraft),
            "release_candidate" => Ok(Self::ReleaseCandidate),
            "release_preview" => Ok(Self::ReleasePreview),
            "release" => Ok(Self::Release),
            _ => Err(relhub_core::AppError::validation(format!(
                "Invalid release phase: '{s}'. Expected one of: release_candidate_draft, \
                 release_candidate, release_preview, release"
            ))),
        }
    }
}
