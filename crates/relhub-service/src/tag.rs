//! Tag manager for revisions.

use std::sync::Arc;

use tracing::{info, warn};

use relhub_core::error::AppError;
use relhub_core::result::AppResult;
use relhub_database::store::RevisionStore;
use relhub_entity::revision::{Revision, RevisionPolicy, RevisionTag};

use crate::context::RequestContext;

/// Sets or clears the tag of a single revision.
#[derive(Debug, Clone)]
pub struct TagService {
    store: Arc<dyn RevisionStore>,
}

impl TagService {
    /// Creates a new tag service.
    pub fn new(store: Arc<dyn RevisionStore>) -> Self {
        Self { store }
    }

    /// Validate `raw_tag` and store it on the given revision.
    ///
    /// A blank tag clears the label. Nothing is written if validation fails.
    /// If another writer changed the tag after it was read here, the write
    /// is refused with a `Conflict` error instead of overwriting it.
    pub async fn set_tag(
        &self,
        ctx: &RequestContext,
        release_name: &str,
        revision_number: &str,
        raw_tag: &str,
    ) -> AppResult<Revision> {
        self.write_tag(ctx, release_name, revision_number, raw_tag, false)
            .await
    }

    /// Like [`Self::set_tag`], but refuses with `Conflict` unless
    /// [`RevisionPolicy`] allows modifying the revision: it must not be the
    /// latest, and the release must be a draft or the revision a preview.
    pub async fn set_tag_if_modifiable(
        &self,
        ctx: &RequestContext,
        release_name: &str,
        revision_number: &str,
        raw_tag: &str,
    ) -> AppResult<Revision> {
        self.write_tag(ctx, release_name, revision_number, raw_tag, true)
            .await
    }

    async fn write_tag(
        &self,
        ctx: &RequestContext,
        release_name: &str,
        revision_number: &str,
        raw_tag: &str,
        enforce_policy: bool,
    ) -> AppResult<Revision> {
        let tag = RevisionTag::parse(raw_tag)?;

        let release = self
            .store
            .find_release(release_name)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Release '{release_name}' not found")))?;

        let revision = self
            .store
            .find_revision(release_name, revision_number)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!(
                    "Revision {revision_number} of '{release_name}' not found"
                ))
            })?;

        if enforce_policy && !RevisionPolicy::can_modify_in(&release, &revision) {
            return Err(AppError::conflict(format!(
                "Revision {revision_number} of '{release_name}' cannot be modified \
                 while the release is in phase {}",
                release.phase.short_key()
            )));
        }

        let new_value = tag.as_ref().map(RevisionTag::as_str);
        if revision.tag.as_deref() == new_value {
            return Ok(revision);
        }

        let updated = self
            .store
            .persist_tag(revision.id, revision.tag.as_deref(), new_value)
            .await?;

        let Some(updated) = updated else {
            warn!(
                asfuid = %ctx.asfuid,
                release = release_name,
                revision = revision_number,
                "Tag changed concurrently, refusing to overwrite"
            );
            return Err(AppError::conflict(format!(
                "Tag of revision {revision_number} was changed by someone else; reload and retry"
            )));
        };

        info!(
            asfuid = %ctx.asfuid,
            release = release_name,
            revision = revision_number,
            tag = new_value.unwrap_or(""),
            "Revision tag set"
        );
        Ok(updated)
    }
}
