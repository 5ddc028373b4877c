//! Snapshot storage configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where revision snapshot directories live on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Root directory for all runtime state.
    #[serde(default = "default_state_dir")]
    pub state_dir: String,
}

impl StorageConfig {
    /// Directory holding the snapshot trees of releases that are not yet final.
    ///
    /// Layout: `<state_dir>/unfinished/<project>/<version>/<revision_number>/`.
    pub fn unfinished_dir(&self) -> PathBuf {
        PathBuf::from(&self.state_dir).join("unfinished")
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            state_dir: default_state_dir(),
        }
    }
}

fn default_state_dir() -> String {
    "./state".to_string()
}
