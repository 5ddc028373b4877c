//! Revision repository implementation.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use relhub_core::error::{AppError, ErrorKind};
use relhub_core::result::AppResult;
use relhub_core::types::RevisionId;
use relhub_entity::release::ReleasePhase;
use relhub_entity::revision::{Revision, RevisionParent};

/// Columns of a revision with its parent's number and seq joined in.
const REVISION_COLUMNS: &str = "r.id, r.release_name, r.number, r.seq, r.parent_id, \
     p.number AS parent_number, p.seq AS parent_seq, \
     r.phase, r.tag, r.description, r.created, r.asfuid";

/// Flat row shape of a revision joined with its parent.
#[derive(Debug, FromRow)]
struct RevisionRow {
    id: RevisionId,
    release_name: String,
    number: String,
    seq: i32,
    parent_id: Option<RevisionId>,
    parent_number: Option<String>,
    parent_seq: Option<i32>,
    phase: ReleasePhase,
    tag: Option<String>,
    description: Option<String>,
    created: DateTime<Utc>,
    asfuid: String,
}

impl From<RevisionRow> for Revision {
    fn from(row: RevisionRow) -> Self {
        let parent = match (row.parent_id, row.parent_number, row.parent_seq) {
            (Some(id), Some(number), Some(seq)) => Some(RevisionParent { id, number, seq }),
            _ => None,
        };

        Self {
            id: row.id,
            release_name: row.release_name,
            number: row.number,
            seq: row.seq,
            parent,
            phase: row.phase,
            tag: row.tag,
            description: row.description,
            created: row.created,
            asfuid: row.asfuid,
        }
    }
}

/// Repository for revision queries and tag writes.
#[derive(Debug, Clone)]
pub struct RevisionRepository {
    pool: PgPool,
}

impl RevisionRepository {
    /// Create a new revision repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All revisions of a release ordered by `seq`, oldest first, with
    /// parents resolved in the same query.
    pub async fn find_by_release(&self, release_name: &str) -> AppResult<Vec<Revision>> {
        let rows = sqlx::query_as::<_, RevisionRow>(&format!(
            "SELECT {REVISION_COLUMNS} FROM revisions r \
             LEFT JOIN revisions p ON p.id = r.parent_id \
             WHERE r.release_name = $1 ORDER BY r.seq ASC"
        ))
        .bind(release_name)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list revisions", e))?;

        Ok(rows.into_iter().map(Revision::from).collect())
    }

    /// Find one revision by its number within a release.
    pub async fn find_by_number(
        &self,
        release_name: &str,
        number: &str,
    ) -> AppResult<Option<Revision>> {
        let row = sqlx::query_as::<_, RevisionRow>(&format!(
            "SELECT {REVISION_COLUMNS} FROM revisions r \
             LEFT JOIN revisions p ON p.id = r.parent_id \
             WHERE r.release_name = $1 AND r.number = $2"
        ))
        .bind(release_name)
        .bind(number)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find revision", e))?;

        Ok(row.map(Revision::from))
    }

    /// Set the tag of a single revision if its stored tag still equals
    /// `expected`.
    ///
    /// Returns `None` when no row matched, either because the revision is
    /// gone or because another writer changed the tag first.
    pub async fn update_tag(
        &self,
        id: RevisionId,
        expected: Option<&str>,
        tag: Option<&str>,
    ) -> AppResult<Option<Revision>> {
        let row = sqlx::query_as::<_, RevisionRow>(&format!(
            "WITH r AS ( \
                 UPDATE revisions SET tag = $2 \
                 WHERE id = $1 AND tag IS NOT DISTINCT FROM $3 \
                 RETURNING * \
             ) \
             SELECT {REVISION_COLUMNS} FROM r \
             LEFT JOIN revisions p ON p.id = r.parent_id"
        ))
        .bind(id)
        .bind(tag)
        .bind(expected)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update tag", e))?;

        Ok(row.map(Revision::from))
    }
}
