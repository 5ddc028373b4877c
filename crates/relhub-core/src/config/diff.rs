//! Diff engine configuration.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Limits applied while computing revision diffs.
#[derive(Debug, Clone, Validate, Serialize, Deserialize)]
pub struct DiffConfig {
    /// Upper bound on in-flight modification-time checks across all diff
    /// requests served by one engine.
    #[serde(default = "default_max_concurrent_checks")]
    #[validate(range(min = 1, max = 4096))]
    pub max_concurrent_checks: usize,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            max_concurrent_checks: default_max_concurrent_checks(),
        }
    }
}

fn default_max_concurrent_checks() -> usize {
    64
}
