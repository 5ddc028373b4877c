//! Shared helpers for relhub-service integration tests.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use async_trait::async_trait;
use chrono::Utc;
use tempfile::TempDir;
use tokio::sync::RwLock;

use relhub_core::config::DiffConfig;
use relhub_core::result::AppResult;
use relhub_core::types::{ReleaseKey, RevisionId};
use relhub_database::store::RevisionStore;
use relhub_entity::release::{Release, ReleasePhase};
use relhub_entity::revision::{Revision, RevisionParent};
use relhub_service::{DiffEngine, HistoryService, TagService, TimelineService};
use relhub_storage::LocalSnapshotStore;

pub const PROJECT: &str = "tooling";
pub const VERSION: &str = "0.2.1";
pub const RELEASE: &str = "tooling-0.2.1";

/// In-memory revision store honouring the compare-and-set tag contract.
#[derive(Debug, Default)]
pub struct MemoryRevisionStore {
    releases: RwLock<Vec<Release>>,
    revisions: RwLock<Vec<Revision>>,
}

#[async_trait]
impl RevisionStore for MemoryRevisionStore {
    async fn find_release(&self, release_name: &str) -> AppResult<Option<Release>> {
        let releases = self.releases.read().await;
        Ok(releases.iter().find(|r| r.name == release_name).cloned())
    }

    async fn timeline(&self, release_name: &str) -> AppResult<Vec<Revision>> {
        let revisions = self.revisions.read().await;
        let mut chain: Vec<Revision> = revisions
            .iter()
            .filter(|r| r.release_name == release_name)
            .cloned()
            .collect();
        chain.sort_by_key(|r| r.seq);
        Ok(chain)
    }

    async fn find_revision(
        &self,
        release_name: &str,
        number: &str,
    ) -> AppResult<Option<Revision>> {
        let revisions = self.revisions.read().await;
        Ok(revisions
            .iter()
            .find(|r| r.release_name == release_name && r.number == number)
            .cloned())
    }

    async fn persist_tag(
        &self,
        revision_id: RevisionId,
        expected: Option<&str>,
        tag: Option<&str>,
    ) -> AppResult<Option<Revision>> {
        let mut revisions = self.revisions.write().await;
        let Some(revision) = revisions.iter_mut().find(|r| r.id == revision_id) else {
            return Ok(None);
        };
        if revision.tag.as_deref() != expected {
            return Ok(None);
        }
        revision.tag = tag.map(str::to_string);
        Ok(Some(revision.clone()))
    }
}

/// Test application: in-memory metadata over a temporary snapshot root.
pub struct TestApp {
    pub store: Arc<MemoryRevisionStore>,
    pub snapshots: LocalSnapshotStore,
    pub history: HistoryService,
    pub tags: TagService,
    _root: TempDir,
}

impl TestApp {
    /// Create an app with an empty release in the given phase.
    pub async fn new(phase: ReleasePhase) -> Self {
        let root = tempfile::tempdir().expect("Failed to create temp dir");
        let store = Arc::new(MemoryRevisionStore::default());
        store.releases.write().await.push(Release {
            name: RELEASE.to_string(),
            project_name: PROJECT.to_string(),
            version: VERSION.to_string(),
            phase,
            latest_revision_number: None,
            created: Utc::now(),
        });

        let snapshots = LocalSnapshotStore::new(root.path());
        let engine = DiffEngine::new(
            Arc::new(snapshots.clone()),
            &DiffConfig {
                max_concurrent_checks: 4,
            },
        );
        let timeline = TimelineService::new(store.clone());

        Self {
            history: HistoryService::new(timeline, engine),
            tags: TagService::new(store.clone()),
            store,
            snapshots,
            _root: root,
        }
    }

    /// Append a revision whose parent is the current latest revision.
    pub async fn add_revision(&self, number: &str, phase: ReleasePhase) -> Revision {
        let mut revisions = self.store.revisions.write().await;
        let parent = revisions.iter().max_by_key(|r| r.seq).map(|p| RevisionParent {
            id: p.id,
            number: p.number.clone(),
            seq: p.seq,
        });
        let revision = Revision {
            id: RevisionId::new(),
            release_name: RELEASE.to_string(),
            number: number.to_string(),
            seq: parent.as_ref().map_or(1, |p| p.seq + 1),
            parent,
            phase,
            tag: None,
            description: None,
            created: Utc::now(),
            asfuid: "alice".to_string(),
        };
        revisions.push(revision.clone());
        drop(revisions);

        let mut releases = self.store.releases.write().await;
        if let Some(release) = releases.iter_mut().find(|r| r.name == RELEASE) {
            release.latest_revision_number = Some(number.to_string());
        }
        revision
    }

    /// Read a revision straight from the store.
    pub async fn store_revision(&self, number: &str) -> Revision {
        self.store
            .find_revision(RELEASE, number)
            .await
            .expect("store read")
            .expect("revision exists")
    }

    /// Write a file into a revision snapshot with a fixed modification time.
    pub fn write_file(&self, number: &str, relative: &str, mtime_secs: u64) {
        let path = self.revision_dir(number).join(relative);
        std::fs::create_dir_all(path.parent().expect("file has a parent"))
            .expect("Failed to create snapshot dir");
        std::fs::write(&path, relative).expect("Failed to write snapshot file");
        std::fs::File::options()
            .write(true)
            .open(&path)
            .and_then(|f| f.set_modified(SystemTime::UNIX_EPOCH + Duration::from_secs(mtime_secs)))
            .expect("Failed to set mtime");
    }

    /// Create an empty snapshot directory.
    pub fn create_snapshot(&self, number: &str) {
        std::fs::create_dir_all(self.revision_dir(number)).expect("Failed to create snapshot dir");
    }

    pub fn revision_dir(&self, number: &str) -> PathBuf {
        self.snapshots
            .revision_dir(&ReleaseKey::new(PROJECT, VERSION), number)
            .expect("valid revision dir")
    }
}

pub fn paths(items: &[&str]) -> Vec<PathBuf> {
    items.iter().map(PathBuf::from).collect()
}

