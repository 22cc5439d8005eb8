//! In-memory submission store used by tests.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use super::{SubmissionStore, TransitionUpdate};
use crate::common::entity_ids::{ContributorId, SubmissionId};
use crate::common::pagination::ValidatedPageArgs;
use crate::domains::catalog::models::PageTarget;
use crate::domains::moderation::error::ModerationError;
use crate::domains::moderation::models::{
    AuditRecord, SubmissionKind, SubmissionRecord, SubmissionStatus,
};

#[derive(Default)]
pub struct MemorySubmissionStore {
    submissions: RwLock<HashMap<SubmissionId, SubmissionRecord>>,
    audit: RwLock<Vec<AuditRecord>>,
}

impl MemorySubmissionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All submissions, unordered.
    pub fn all(&self) -> Vec<SubmissionRecord> {
        self.submissions
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .values()
            .cloned()
            .collect()
    }
}

#[async_trait]
impl SubmissionStore for MemorySubmissionStore {
    async fn create(&self, submission: SubmissionRecord) -> Result<(), ModerationError> {
        let mut submissions = self.submissions.write().unwrap_or_else(|e| e.into_inner());

        if let Some(key) = submission.natural_key.as_deref() {
            let duplicate = submissions.values().any(|s| {
                s.submitter_id == submission.submitter_id
                    && !s.status.is_terminal()
                    && s.natural_key.as_deref() == Some(key)
            });
            if duplicate {
                return Err(ModerationError::DuplicateSubmission);
            }
        }

        submissions.insert(submission.id, submission);
        Ok(())
    }

    async fn find(&self, id: SubmissionId) -> Result<Option<SubmissionRecord>, ModerationError> {
        Ok(self
            .submissions
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(&id)
            .cloned())
    }

    async fn complete_transition(
        &self,
        update: TransitionUpdate,
        audit: AuditRecord,
    ) -> Result<bool, ModerationError> {
        let mut submissions = self.submissions.write().unwrap_or_else(|e| e.into_inner());

        let Some(record) = submissions.get_mut(&update.id) else {
            return Ok(false);
        };
        if record.version != update.expected_version {
            return Ok(false);
        }

        record.status = update.new_status;
        record.applied_ref = update.applied_ref;
        record.reviewed_by = Some(update.reviewed_by);
        record.reviewed_at = Some(update.reviewed_at);
        record.review_note = update.review_note;
        record.version += 1;

        // Still under the submissions lock, so the entry lands with the
        // write it records
        self.audit
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .push(audit);
        Ok(true)
    }

    async fn has_active_natural_key(
        &self,
        submitter_id: ContributorId,
        natural_key: &str,
    ) -> Result<bool, ModerationError> {
        Ok(self
            .submissions
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .values()
            .any(|s| {
                s.submitter_id == submitter_id
                    && !s.status.is_terminal()
                    && s.natural_key.as_deref() == Some(natural_key)
            }))
    }

    async fn list_by_status_and_kind(
        &self,
        status: SubmissionStatus,
        kind: SubmissionKind,
        target: Option<PageTarget>,
        page: &ValidatedPageArgs,
    ) -> Result<Vec<SubmissionRecord>, ModerationError> {
        let mut rows: Vec<SubmissionRecord> = self
            .submissions
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .values()
            .filter(|s| s.status == status && s.kind == kind)
            .filter(|s| target.is_none() || s.target_type == target)
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));

        Ok(rows
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.fetch_limit() as usize)
            .collect())
    }

    async fn audit_for(&self, id: SubmissionId) -> Result<Vec<AuditRecord>, ModerationError> {
        let mut rows: Vec<AuditRecord> = self
            .audit
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .filter(|a| a.submission_id == id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(rows)
    }
}
