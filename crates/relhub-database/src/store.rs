//! The persistence seam consumed by the revision services.

use async_trait::async_trait;
use sqlx::PgPool;

use relhub_core::result::AppResult;
use relhub_core::types::RevisionId;
use relhub_entity::release::Release;
use relhub_entity::revision::Revision;

use crate::repositories::{ReleaseRepository, RevisionRepository};

/// Read access to releases and their revision chains, plus the one write
/// this subsystem performs: setting a tag.
#[async_trait]
pub trait RevisionStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find a release by name.
    async fn find_release(&self, release_name: &str) -> AppResult<Option<Release>>;

    /// All revisions of a release, ordered by `seq` ascending, with each
    /// revision's parent already resolved.
    async fn timeline(&self, release_name: &str) -> AppResult<Vec<Revision>>;

    /// Find one revision by number within a release.
    async fn find_revision(&self, release_name: &str, number: &str)
    -> AppResult<Option<Revision>>;

    /// Write `tag` to the revision if its stored tag still equals `expected`.
    ///
    /// Returns the updated revision, or `None` when nothing was written.
    async fn persist_tag(
        &self,
        revision_id: RevisionId,
        expected: Option<&str>,
        tag: Option<&str>,
    ) -> AppResult<Option<Revision>>;
}

/// PostgreSQL-backed [`RevisionStore`].
#[derive(Debug, Clone)]
pub struct PgRevisionStore {
    releases: ReleaseRepository,
    revisions: RevisionRepository,
}

impl PgRevisionStore {
    /// Create a store over a shared pool.
    pub fn new(pool: PgPool) -> Self {
        Self {
            releases: ReleaseRepository::new(pool.clone()),
            revisions: RevisionRepository::new(pool),
        }
    }
}

#[async_trait]
impl RevisionStore for PgRevisionStore {
    async fn find_release(&self, release_name: &str) -> AppResult<Option<Release>> {
        self.releases.find_by_name(release_name).await
    }

    async fn timeline(&self, release_name: &str) -> AppResult<Vec<Revision>> {
        self.revisions.find_by_release(release_name).await
    }

    async fn find_revision(
        &self,
        release_name: &str,
        number: &str,
    ) -> AppResult<Option<Revision>> {
        self.revisions.find_by_number(release_name, number).await
    }

    async fn persist_tag(
        &self,
        revision_id: RevisionId,
        expected: Option<&str>,
        tag: Option<&str>,
    ) -> AppResult<Option<Revision>> {
        self.revisions.update_tag(revision_id, expected, tag).await
    }
}
