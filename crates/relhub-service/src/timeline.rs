//! Revision timeline builder. Loads a release's revision chain in `seq` order.

use std::sync::Arc;

use tracing::debug;

use relhub_core::error::AppError;
use relhub_core::result::AppResult;
use relhub_database::store::RevisionStore;
use relhub_entity::release::Release;
use relhub_entity::revision::Revision;

/// The full revision chain of one release, oldest first.
///
/// Construction checks the ordering invariants, so holders can rely on
/// `seq` being strictly increasing and every parent preceding its child.
#[derive(Debug, Clone)]
pub struct RevisionTimeline {
    release: Release,
    revisions: Vec<Revision>,
}

impl RevisionTimeline {
    /// Build a timeline from revisions already sorted by `seq`.
    pub fn from_ordered(release: Release, revisions: Vec<Revision>) -> AppResult<Self> {
        for pair in revisions.windows(2) {
            let (prev, next) = (&pair[0], &pair[1]);
            if next.seq <= prev.seq {
                return Err(AppError::internal(format!(
                    "Revision {} of {} has seq {} not above predecessor {} (seq {})",
                    next.number, release.name, next.seq, prev.number, prev.seq
                )));
            }
        }

        if let Some(orphan) = revisions
            .iter()
            .find(|r| r.parent.as_ref().is_some_and(|p| p.seq >= r.seq))
        {
            return Err(AppError::internal(format!(
                "Revision {} of {} has a parent that does not precede it",
                orphan.number, release.name
            )));
        }

        Ok(Self { release, revisions })
    }

    /// The release the chain belongs to.
    pub fn release(&self) -> &Release {
        &self.release
    }

    /// Revisions, oldest first.
    pub fn revisions(&self) -> &[Revision] {
        &self.revisions
    }

    /// The revision with no successor.
    pub fn latest(&self) -> Option<&Revision> {
        self.revisions.last()
    }

    /// Whether `number` names the latest revision.
    pub fn is_latest(&self, number: &str) -> bool {
        self.latest().is_some_and(|r| r.number == number)
    }

    /// Find a revision by number.
    pub fn find(&self, number: &str) -> Option<&Revision> {
        self.revisions.iter().find(|r| r.number == number)
    }

    /// Number of revisions.
    pub fn len(&self) -> usize {
        self.revisions.len()
    }

    /// Whether the release has no revisions yet.
    pub fn is_empty(&self) -> bool {
        self.revisions.is_empty()
    }

    /// Split into the release and its revisions.
    pub fn into_parts(self) -> (Release, Vec<Revision>) {
        (self.release, self.revisions)
    }
}

/// Loads revision timelines from the persistence layer.
#[derive(Debug, Clone)]
pub struct TimelineService {
    store: Arc<dyn RevisionStore>,
}

impl TimelineService {
    /// Creates a new timeline service.
    pub fn new(store: Arc<dyn RevisionStore>) -> Self {
        Self { store }
    }

    /// Load the ordered revision chain of a release.
    ///
    /// Fails with `NotFound` if the release does not exist.
    pub async fn timeline(&self, release_name: &str) -> AppResult<RevisionTimeline> {
        let release = self
            .store
            .find_release(release_name)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Release '{release_name}' not found")))?;

        let revisions = self.store.timeline(release_name).await?;
        debug!(
            release = release_name,
            revisions = revisions.len(),
            "Loaded revision timeline"
        );

        RevisionTimeline::from_ordered(release, revisions)
    }
}
