//! Release repository implementation.

use sqlx::PgPool;

use relhub_core::error::{AppError, ErrorKind};
use relhub_core::result::AppResult;
use relhub_entity::release::Release;

/// Selects a release together with the number of its highest-`seq` revision.
const SELECT_RELEASE: &str = "SELECT r.name, r.project_name, r.version, r.phase, r.created, \
     (SELECT v.number FROM revisions v WHERE v.release_name = r.name \
      ORDER BY v.seq DESC LIMIT 1) AS latest_revision_number \
     FROM releases r";

/// Read-only access to release records.
#[derive(Debug, Clone)]
pub struct ReleaseRepository {
    pool: PgPool,
}

impl ReleaseRepository {
    /// Create a new release repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a release by its `<project>-<version>` name.
    pub async fn find_by_name(&self, name: &str) -> AppResult<Option<Release>> {
        sqlx::query_as::<_, Release>(&format!("{SELECT_RELEASE} WHERE r.name = $1"))
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find release", e))
    }
}
