//! Diff engine. Classifies the files of each revision against its predecessor.
//!
//! The fold over revisions is sequential because every step needs the
//! previous step's file set. Inside one step the modification-time checks
//! for common paths run concurrently, bounded by a semaphore shared by all
//! requests served by the same engine, and are joined before the fold moves on.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures::future::try_join_all;
use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use relhub_core::config::DiffConfig;
use relhub_core::error::AppError;
use relhub_core::result::AppResult;
use relhub_core::traits::snapshot::SnapshotStore;
use relhub_core::types::ReleaseKey;
use relhub_entity::revision::{FilesDiff, Revision, RevisionDiff};

/// Computes per-revision file diffs over write-once snapshots.
#[derive(Debug, Clone)]
pub struct DiffEngine {
    /// Snapshot filesystem.
    snapshots: Arc<dyn SnapshotStore>,
    /// Bounds in-flight modification-time checks.
    limiter: Arc<Semaphore>,
}

/// The previous step's state carried through the fold.
struct Previous<'a> {
    number: &'a str,
    files: BTreeSet<PathBuf>,
}

impl DiffEngine {
    /// Creates a diff engine.
    pub fn new(snapshots: Arc<dyn SnapshotStore>, config: &DiffConfig) -> Self {
        Self {
            snapshots,
            limiter: Arc::new(Semaphore::new(config.max_concurrent_checks.max(1))),
        }
    }

    /// Diff every revision against its predecessor.
    ///
    /// `revisions` must be ordered oldest to newest; the result keeps that
    /// order. The first revision reports all of its files as added.
    /// Cancelling `cancel` drops all in-flight checks and returns a single
    /// `Cancelled` error.
    #[instrument(skip_all, fields(release = %release, revisions = revisions.len()))]
    pub async fn diff(
        &self,
        release: &ReleaseKey,
        revisions: Vec<Revision>,
        cancel: &CancellationToken,
    ) -> AppResult<Vec<RevisionDiff>> {
        let mut files_per_step: Vec<(FilesDiff, bool)> = Vec::with_capacity(revisions.len());
        let mut previous: Option<Previous<'_>> = None;

        for revision in &revisions {
            let step = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(cancelled(release)),
                step = self.diff_step(release, &revision.number, previous.as_ref()) => step?,
            };
            let (current_files, files, snapshot_missing) = step;

            debug!(
                revision = %revision.number,
                added = files.added.len(),
                removed = files.removed.len(),
                modified = files.modified.len(),
                "Diffed revision"
            );

            files_per_step.push((files, snapshot_missing));
            previous = Some(Previous {
                number: &revision.number,
                files: current_files,
            });
        }

        drop(previous);
        info!(steps = files_per_step.len(), "Computed revision diffs");

        Ok(revisions
            .into_iter()
            .zip(files_per_step)
            .map(|(revision, (files, snapshot_missing))| RevisionDiff {
                revision,
                files,
                snapshot_missing,
            })
            .collect())
    }

    /// One fold step: list the revision, classify against the predecessor.
    async fn diff_step(
        &self,
        release: &ReleaseKey,
        number: &str,
        previous: Option<&Previous<'_>>,
    ) -> AppResult<(BTreeSet<PathBuf>, FilesDiff, bool)> {
        let current_files = self.snapshots.list_paths(release, number).await?;

        let snapshot_missing =
            current_files.is_empty() && !self.snapshots.snapshot_exists(release, number).await?;
        if snapshot_missing {
            warn!(
                release = %release,
                revision = number,
                "Snapshot directory missing, diffing as an empty revision"
            );
        }

        let Some(previous) = previous else {
            let files = FilesDiff::initial(current_files.clone());
            return Ok((current_files, files, snapshot_missing));
        };

        let added: BTreeSet<PathBuf> = current_files.difference(&previous.files).cloned().collect();
        let removed: BTreeSet<PathBuf> =
            previous.files.difference(&current_files).cloned().collect();
        let common: Vec<&Path> = current_files
            .intersection(&previous.files)
            .map(PathBuf::as_path)
            .collect();

        let modified = self
            .modified_paths(release, previous.number, number, common)
            .await?;

        let files = FilesDiff::new(added, removed, modified);
        Ok((current_files, files, snapshot_missing))
    }

    /// Compare modification times of every common path, one unit of work
    /// per path, all joined before returning.
    async fn modified_paths(
        &self,
        release: &ReleaseKey,
        previous_number: &str,
        number: &str,
        common: Vec<&Path>,
    ) -> AppResult<BTreeSet<PathBuf>> {
        let snapshots = self.snapshots.as_ref();
        let checks = common.into_iter().map(move |path| async move {
            let _permit = self
                .limiter
                .acquire()
                .await
                .map_err(|_| AppError::internal("Diff limiter closed"))?;
            let changed = mtime_changed(snapshots, release, previous_number, number, path).await;
            Ok::<_, AppError>((path, changed))
        });

        let results = try_join_all(checks).await?;
        Ok(results
            .into_iter()
            .filter(|(_, changed)| *changed)
            .map(|(path, _)| path.to_path_buf())
            .collect())
    }
}

/// Whether a path's modification time differs between two revisions.
///
/// A failed lookup on either side counts as changed.
async fn mtime_changed(
    snapshots: &dyn SnapshotStore,
    release: &ReleaseKey,
    previous_number: &str,
    number: &str,
    path: &Path,
) -> bool {
    let before = match snapshots.modified_time(release, previous_number, path).await {
        Ok(t) => t,
        Err(e) => {
            debug!(
                path = %path.display(),
                revision = previous_number,
                error = %e,
                "Stat failed, treating as modified"
            );
            return true;
        }
    };
    match snapshots.modified_time(release, number, path).await {
        Ok(after) => before != after,
        Err(e) => {
            debug!(
                path = %path.display(),
                revision = number,
                error = %e,
                "Stat failed, treating as modified"
            );
            true
        }
    }
}

fn cancelled(release: &ReleaseKey) -> AppError {
    AppError::cancelled(format!("Diff of {release} was cancelled"))
}
