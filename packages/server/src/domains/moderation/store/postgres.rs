//! Postgres-backed submission store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};

use super::{SubmissionStore, TransitionUpdate};
use crate::common::entity_ids::{ContributorId, SubmissionId};
use crate::common::pagination::ValidatedPageArgs;
use crate::domains::catalog::models::PageTarget;
use crate::domains::moderation::error::ModerationError;
use crate::domains::moderation::models::{
    AuditRecord, SubmissionKind, SubmissionPayload, SubmissionRecord, SubmissionStatus,
};

pub struct PgSubmissionStore {
    pool: PgPool,
}

impl PgSubmissionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Row shape for `contribution_submissions`. The payload column is JSONB,
/// so the record type itself cannot derive `FromRow`.
#[derive(FromRow)]
struct SubmissionRow {
    id: SubmissionId,
    kind: SubmissionKind,
    target_type: Option<PageTarget>,
    payload: Json<SubmissionPayload>,
    submitter_id: ContributorId,
    trusted_at_submission: bool,
    status: SubmissionStatus,
    applied_ref: Option<String>,
    version: i32,
    natural_key: Option<String>,
    created_at: DateTime<Utc>,
    reviewed_by: Option<ContributorId>,
    reviewed_at: Option<DateTime<Utc>>,
    review_note: Option<String>,
}

impl From<SubmissionRow> for SubmissionRecord {
    fn from(row: SubmissionRow) -> Self {
        Self {
            id: row.id,
            kind: row.kind,
            target_type: row.target_type,
            payload: row.payload.0,
            submitter_id: row.submitter_id,
            trusted_at_submission: row.trusted_at_submission,
            status: row.status,
            applied_ref: row.applied_ref,
            version: row.version,
            natural_key: row.natural_key,
            created_at: row.created_at,
            reviewed_by: row.reviewed_by,
            reviewed_at: row.reviewed_at,
            review_note: row.review_note,
        }
    }
}

#[async_trait]
impl SubmissionStore for PgSubmissionStore {
    async fn create(&self, submission: SubmissionRecord) -> Result<(), ModerationError> {
        let result = sqlx::query(
            "INSERT INTO contribution_submissions
                 (id, kind, target_type, payload, submitter_id, trusted_at_submission,
                  status, applied_ref, version, natural_key, created_at,
                  reviewed_by, reviewed_at, review_note)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)",
        )
        .bind(submission.id)
        .bind(submission.kind)
        .bind(submission.target_type)
        .bind(Json(&submission.payload))
        .bind(submission.submitter_id)
        .bind(submission.trusted_at_submission)
        .bind(submission.status)
        .bind(&submission.applied_ref)
        .bind(submission.version)
        .bind(&submission.natural_key)
        .bind(submission.created_at)
        .bind(submission.reviewed_by)
        .bind(submission.reviewed_at)
        .bind(&submission.review_note)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            // The partial unique index on (submitter_id, natural_key) is the
            // race-proof dedupe backstop
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(ModerationError::DuplicateSubmission)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn find(&self, id: SubmissionId) -> Result<Option<SubmissionRecord>, ModerationError> {
        let row = sqlx::query_as::<_, SubmissionRow>(
            "SELECT * FROM contribution_submissions WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    async fn complete_transition(
        &self,
        update: TransitionUpdate,
        audit: AuditRecord,
    ) -> Result<bool, ModerationError> {
        // One transaction: the status write and its audit entry land
        // together or not at all
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            "UPDATE contribution_submissions
             SET status = $3,
                 applied_ref = $4,
                 reviewed_by = $5,
                 reviewed_at = $6,
                 review_note = $7,
                 version = version + 1
             WHERE id = $1 AND version = $2",
        )
        .bind(update.id)
        .bind(update.expected_version)
        .bind(update.new_status)
        .bind(&update.applied_ref)
        .bind(update.reviewed_by)
        .bind(update.reviewed_at)
        .bind(&update.review_note)
        .execute(&mut *tx)
        .await?;
        if result.rows_affected() == 0 {
            return Ok(false);
        }

        sqlx::query(
            "INSERT INTO moderation_audit
                 (id, submission_id, from_status, to_status, actor_id, note, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(audit.id)
        .bind(audit.submission_id)
        .bind(audit.from_status)
        .bind(audit.to_status)
        .bind(audit.actor_id)
        .bind(&audit.note)
        .bind(audit.created_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(true)
    }

    async fn has_active_natural_key(
        &self,
        submitter_id: ContributorId,
        natural_key: &str,
    ) -> Result<bool, ModerationError> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(
                 SELECT 1 FROM contribution_submissions
                 WHERE submitter_id = $1
                   AND natural_key = $2
                   AND status IN ('pending', 'live_pending_review'))",
        )
        .bind(submitter_id)
        .bind(natural_key)
        .fetch_one(&self.pool)
        .await
        .map_err(Into::into)
    }

    async fn list_by_status_and_kind(
        &self,
        status: SubmissionStatus,
        kind: SubmissionKind,
        target: Option<PageTarget>,
        page: &ValidatedPageArgs,
    ) -> Result<Vec<SubmissionRecord>, ModerationError> {
        let rows = match target {
            Some(target) => {
                sqlx::query_as::<_, SubmissionRow>(
                    "SELECT * FROM contribution_submissions
                     WHERE status = $1 AND kind = $2 AND target_type = $3
                     ORDER BY created_at ASC, id ASC
                     LIMIT $4 OFFSET $5",
                )
                .bind(status)
                .bind(kind)
                .bind(target)
                .bind(page.fetch_limit())
                .bind(page.offset())
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, SubmissionRow>(
                    "SELECT * FROM contribution_submissions
                     WHERE status = $1 AND kind = $2
                     ORDER BY created_at ASC, id ASC
                     LIMIT $3 OFFSET $4",
                )
                .bind(status)
                .bind(kind)
                .bind(page.fetch_limit())
                .bind(page.offset())
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn audit_for(&self, id: SubmissionId) -> Result<Vec<AuditRecord>, ModerationError> {
        sqlx::query_as::<_, AuditRecord>(
            "SELECT * FROM moderation_audit
             WHERE submission_id = $1
             ORDER BY created_at ASC, id ASC",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(Into::into)
    }
}
