//! Submission persistence.
//!
//! [`SubmissionStore`] is the storage seam for the moderation pipeline:
//! Postgres in production ([`PgSubmissionStore`]), in-memory for tests
//! ([`MemorySubmissionStore`]). All status writes go through
//! [`SubmissionStore::complete_transition`], which compares the record
//! version so concurrent reviewers cannot both land.

mod memory;
mod postgres;

pub use memory::MemorySubmissionStore;
pub use postgres::PgSubmissionStore;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::common::entity_ids::{ContributorId, SubmissionId};
use crate::common::pagination::ValidatedPageArgs;
use crate::domains::catalog::models::PageTarget;

use super::error::ModerationError;
use super::models::{AuditRecord, SubmissionKind, SubmissionRecord, SubmissionStatus};

/// A reviewed transition ready to be persisted.
///
/// `expected_version` is the version read before side effects ran; the
/// write only lands if the row still carries it.
#[derive(Debug, Clone)]
pub struct TransitionUpdate {
    pub id: SubmissionId,
    pub expected_version: i32,
    pub new_status: SubmissionStatus,
    /// The record's applied_ref after this transition. `None` clears it:
    /// the change was reverted, or never applied.
    pub applied_ref: Option<String>,
    pub reviewed_by: ContributorId,
    pub reviewed_at: DateTime<Utc>,
    pub review_note: Option<String>,
}

#[async_trait]
pub trait SubmissionStore: Send + Sync {
    /// Persist a new submission.
    ///
    /// Fails with [`ModerationError::DuplicateSubmission`] when the
    /// submitter already has an active submission with the same natural
    /// key.
    async fn create(&self, submission: SubmissionRecord) -> Result<(), ModerationError>;

    async fn find(&self, id: SubmissionId) -> Result<Option<SubmissionRecord>, ModerationError>;

    /// Write a transition and its audit entry if the version still
    /// matches. The two land atomically.
    ///
    /// Returns `false`, writing nothing, when another writer got there
    /// first.
    async fn complete_transition(
        &self,
        update: TransitionUpdate,
        audit: AuditRecord,
    ) -> Result<bool, ModerationError>;

    async fn has_active_natural_key(
        &self,
        submitter_id: ContributorId,
        natural_key: &str,
    ) -> Result<bool, ModerationError>;

    /// Review-queue listing, oldest first. `target` narrows content-edit
    /// queues to one page type. Returns up to
    /// [`ValidatedPageArgs::fetch_limit`] rows.
    async fn list_by_status_and_kind(
        &self,
        status: SubmissionStatus,
        kind: SubmissionKind,
        target: Option<PageTarget>,
        page: &ValidatedPageArgs,
    ) -> Result<Vec<SubmissionRecord>, ModerationError>;

    /// Audit trail for one submission, oldest first.
    async fn audit_for(&self, id: SubmissionId) -> Result<Vec<AuditRecord>, ModerationError>;
}
