//! Local filesystem snapshot store.

use std::collections::BTreeSet;
use std::io;
use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::fs;
use tracing::debug;

use relhub_core::config::StorageConfig;
use relhub_core::error::{AppError, ErrorKind};
use relhub_core::result::AppResult;
use relhub_core::traits::snapshot::SnapshotStore;
use relhub_core::types::ReleaseKey;

/// Snapshot store reading revision directories from local disk.
#[derive(Debug, Clone)]
pub struct LocalSnapshotStore {
    /// Directory containing `<project>/<version>/<number>/` trees.
    root: PathBuf,
}

impl LocalSnapshotStore {
    /// Create a store rooted at the given directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create a store over the configured unfinished-releases directory.
    pub fn from_config(config: &StorageConfig) -> Self {
        Self::new(config.unfinished_dir())
    }

    /// Directory holding every revision of a release.
    pub fn release_dir(&self, release: &ReleaseKey) -> AppResult<PathBuf> {
        let project = single_component(&release.project_name, "project name")?;
        let version = single_component(&release.version, "version")?;
        Ok(self.root.join(project).join(version))
    }

    /// Directory holding one revision's snapshot.
    pub fn revision_dir(&self, release: &ReleaseKey, revision_number: &str) -> AppResult<PathBuf> {
        let number = single_component(revision_number, "revision number")?;
        Ok(self.release_dir(release)?.join(number))
    }
}

#[async_trait]
impl SnapshotStore for LocalSnapshotStore {
    async fn list_paths(
        &self,
        release: &ReleaseKey,
        revision_number: &str,
    ) -> AppResult<BTreeSet<PathBuf>> {
        let base = self.revision_dir(release, revision_number)?;
        let mut paths = BTreeSet::new();
        let mut pending = vec![PathBuf::new()];

        while let Some(relative_dir) = pending.pop() {
            let mut dir = match fs::read_dir(base.join(&relative_dir)).await {
                Ok(dir) => dir,
                Err(e)
                    if e.kind() == io::ErrorKind::NotFound && relative_dir.as_os_str().is_empty() =>
                {
                    debug!(
                        release = %release,
                        revision = revision_number,
                        "Snapshot directory absent, listing as empty"
                    );
                    return Ok(paths);
                }
                Err(e) => {
                    return Err(AppError::with_source(
                        ErrorKind::Storage,
                        format!("Failed to list directory: {}", base.join(&relative_dir).display()),
                        e,
                    ));
                }
            };

            while let Some(entry) = dir.next_entry().await.map_err(|e| {
                AppError::with_source(ErrorKind::Storage, "Failed to read directory entry", e)
            })? {
                // file_type() does not follow symlinks, so a linked directory
                // is listed as a single path rather than walked.
                let file_type = entry.file_type().await.map_err(|e| {
                    AppError::with_source(ErrorKind::Storage, "Failed to get entry type", e)
                })?;
                let relative = relative_dir.join(entry.file_name());
                if file_type.is_dir() {
                    pending.push(relative);
                } else {
                    paths.insert(relative);
                }
            }
        }

        debug!(
            release = %release,
            revision = revision_number,
            files = paths.len(),
            "Listed snapshot"
        );
        Ok(paths)
    }

    async fn modified_time(
        &self,
        release: &ReleaseKey,
        revision_number: &str,
        relative_path: &Path,
    ) -> AppResult<DateTime<Utc>> {
        let relative = checked_relative(relative_path)?;
        let full_path = self.revision_dir(release, revision_number)?.join(relative);

        let meta = fs::metadata(&full_path).await.map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                AppError::not_found(format!(
                    "File not found in revision {revision_number}: {}",
                    relative.display()
                ))
            } else {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to stat {}", full_path.display()),
                    e,
                )
            }
        })?;

        let modified = meta.modified().map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Modification time unavailable for {}", full_path.display()),
                e,
            )
        })?;

        Ok(DateTime::<Utc>::from(modified))
    }

    async fn snapshot_exists(
        &self,
        release: &ReleaseKey,
        revision_number: &str,
    ) -> AppResult<bool> {
        let dir = self.revision_dir(release, revision_number)?;
        match fs::metadata(&dir).await {
            Ok(meta) => Ok(meta.is_dir()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to stat {}", dir.display()),
                e,
            )),
        }
    }
}

/// Accept `name` only if it is exactly one ordinary path component.
fn single_component<'a>(name: &'a str, what: &str) -> AppResult<&'a str> {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) if !name.contains(['/', '\\']) => Ok(name),
        _ => Err(AppError::validation(format!("Invalid {what}: '{name}'"))),
    }
}

/// Accept a path only if every component is ordinary, so it cannot escape
/// the revision root.
fn checked_relative(path: &Path) -> AppResult<&Path> {
    let ok = path.components().next().is_some()
        && path.components().all(|c| matches!(c, Component::Normal(_)));
    if ok {
        Ok(path)
    } else {
        Err(AppError::validation(format!(
            "Invalid snapshot path: '{}'",
            path.display()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, SystemTime};

    fn key() -> ReleaseKey {
        ReleaseKey::new("tooling", "0.2.1")
    }

    fn write(store: &LocalSnapshotStore, number: &str, relative: &str, mtime: SystemTime) {
        let path = store.revision_dir(&key(), number).unwrap().join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, relative).unwrap();
        std::fs::File::options()
            .write(true)
            .open(&path)
            .unwrap()
            .set_modified(mtime)
            .unwrap();
    }

    #[tokio::test]
    async fn test_list_paths_recursive_and_relative() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalSnapshotStore::new(dir.path());
        let t = SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000);
        write(&store, "00001", "README.md", t);
        write(&store, "00001", "dist/tooling-0.2.1.tar.gz", t);
        write(&store, "00001", "dist/sigs/tooling-0.2.1.tar.gz.asc", t);

        let paths = store.list_paths(&key(), "00001").await.unwrap();
        let expected: BTreeSet<PathBuf> = [
            "README.md",
            "dist/sigs/tooling-0.2.1.tar.gz.asc",
            "dist/tooling-0.2.1.tar.gz",
        ]
        .into_iter()
        .map(PathBuf::from)
        .collect();
        assert_eq!(paths, expected);
    }

    #[tokio::test]
    async fn test_missing_and_empty_snapshots_list_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalSnapshotStore::new(dir.path());

        assert!(store.list_paths(&key(), "00009").await.unwrap().is_empty());
        assert!(!store.snapshot_exists(&key(), "00009").await.unwrap());

        std::fs::create_dir_all(store.revision_dir(&key(), "00002").unwrap()).unwrap();
        assert!(store.list_paths(&key(), "00002").await.unwrap().is_empty());
        assert!(store.snapshot_exists(&key(), "00002").await.unwrap());
    }

    #[tokio::test]
    async fn test_modified_time_matches_disk() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalSnapshotStore::new(dir.path());
        let t = SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000);
        write(&store, "00001", "a.txt", t);

        let mtime = store
            .modified_time(&key(), "00001", Path::new("a.txt"))
            .await
            .unwrap();
        assert_eq!(mtime, DateTime::<Utc>::from(t));
    }

    #[tokio::test]
    async fn test_modified_time_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalSnapshotStore::new(dir.path());

        let err = store
            .modified_time(&key(), "00001", Path::new("gone.txt"))
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::NotFound));
    }

    #[tokio::test]
    async fn test_rejects_escaping_paths() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalSnapshotStore::new(dir.path());

        let err = store.list_paths(&key(), "..").await.unwrap_err();
        assert!(err.is(ErrorKind::Validation));

        let err = store.list_paths(&key(), "00001/../00002").await.unwrap_err();
        assert!(err.is(ErrorKind::Validation));

        let err = store
            .modified_time(&key(), "00001", Path::new("../00002/a.txt"))
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::Validation));

        let err = store
            .modified_time(&key(), "00001", Path::new("/etc/passwd"))
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::Validation));
    }

    #[test]
    fn test_release_dir_layout() {
        let store = LocalSnapshotStore::new("/state/unfinished");
        assert_eq!(
            store.revision_dir(&key(), "00003").unwrap(),
            PathBuf::from("/state/unfinished/tooling/0.2.1/00003")
        );
    }
}
