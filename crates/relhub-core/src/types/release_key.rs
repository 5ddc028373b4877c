//! Identifies the snapshot root of a release without depending on the
//! persisted release entity.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The `(project, version)` pair that locates a release on disk.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReleaseKey {
    /// Project name, e.g. `"tooling"`.
    pub project_name: String,
    /// Version string, e.g. `"0.2.1"`.
    pub version: String,
}

impl ReleaseKey {
    /// Create a new release key.
    pub fn new(project_name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            project_name: project_name.into(),
            version: version.into(),
        }
    }
}

impl fmt::Display for ReleaseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.project_name, self.version)
    }
}
