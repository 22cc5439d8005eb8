//! Moderation pipeline orchestration.
//!
//! [`ModerationService`] owns the full submission lifecycle: intake
//! (validation, dedupe, trust stamping, the trusted immediate-apply path)
//! and review (locking, transition planning, adapter side effects, the
//! version-guarded status write, audit). Storage and catalog access go
//! through the trait seams, so the service runs identically over Postgres
//! and the in-memory stores.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::common::entity_ids::{ContributorId, SubmissionId};
use crate::common::pagination::{Page, ValidatedPageArgs};
use crate::domains::catalog::models::PageTarget;
use crate::domains::catalog::Catalog;
use crate::domains::contributors::TrustEvaluator;

use super::adapters;
use super::error::ModerationError;
use super::locks::SubmissionLocks;
use super::machine::{plan_transition, ModerationAction, PlannedSideEffect};
use super::models::{
    AuditRecord, ContentEditPayload, SubmissionKind, SubmissionPayload, SubmissionRecord,
    SubmissionStatus,
};
use super::store::{SubmissionStore, TransitionUpdate};

pub struct ModerationService {
    store: Arc<dyn SubmissionStore>,
    catalog: Arc<dyn Catalog>,
    trust: Arc<dyn TrustEvaluator>,
    pub(super) locks: SubmissionLocks,
}

impl ModerationService {
    pub fn new(
        store: Arc<dyn SubmissionStore>,
        catalog: Arc<dyn Catalog>,
        trust: Arc<dyn TrustEvaluator>,
    ) -> Self {
        Self {
            store,
            catalog,
            trust,
            locks: SubmissionLocks::new(),
        }
    }

    // ========================================================================
    // Intake
    // ========================================================================

    /// Take in a new submission.
    ///
    /// Validates the payload, rejects natural-key duplicates, stamps the
    /// submitter's current trust tier, and on the trusted path applies the
    /// change to the catalog before the record is persisted.
    pub async fn submit(
        &self,
        payload: SubmissionPayload,
        submitter_id: ContributorId,
    ) -> Result<SubmissionRecord, ModerationError> {
        validate_payload(&payload)?;
        self.check_references(&payload).await?;

        if let Some(key) = payload.natural_key() {
            if self.store.has_active_natural_key(submitter_id, &key).await? {
                return Err(ModerationError::DuplicateSubmission);
            }
        }

        let trusted = self.trust.is_trusted(submitter_id, payload.kind()).await?;

        let mut submission = SubmissionRecord::new(payload, submitter_id, trusted);
        if trusted {
            let applied_ref = adapters::apply(&submission, self.catalog.as_ref()).await?;
            submission.applied_ref = Some(applied_ref);
        }

        if let Err(create_err) = self.store.create(submission.clone()).await {
            // Unwind the trusted-path apply so a lost dedupe race does not
            // leave an orphaned catalog record
            if submission.applied_ref.is_some() {
                if let Err(revert_err) =
                    adapters::revert(&submission, self.catalog.as_ref()).await
                {
                    tracing::warn!(
                        submission_id = %submission.id,
                        error = %revert_err,
                        "Failed to unwind applied change after create failure"
                    );
                }
            }
            return Err(create_err);
        }

        tracing::info!(
            submission_id = %submission.id,
            kind = submission.kind.as_str(),
            trusted,
            "Submission received"
        );
        Ok(submission)
    }

    /// Take in a content edit, capturing the live field value as the
    /// submission's `original_value`.
    pub async fn submit_content_edit(
        &self,
        target_type: PageTarget,
        target_id: Uuid,
        field: String,
        suggested_value: String,
        submitter_id: ContributorId,
    ) -> Result<SubmissionRecord, ModerationError> {
        if !target_type.is_editable(&field) {
            return Err(ModerationError::Validation(format!(
                "field '{}' is not editable on {}",
                field,
                target_type.as_str()
            )));
        }

        let original_value = self
            .catalog
            .read_page_field(target_type, target_id, &field)
            .await?
            .ok_or(ModerationError::NotFound)?;

        let payload = SubmissionPayload::ContentEdit(ContentEditPayload {
            target_type,
            target_id,
            field,
            original_value,
            suggested_value,
        });
        self.submit(payload, submitter_id).await
    }

    /// Availability reports must point at catalog records that exist.
    async fn check_references(&self, payload: &SubmissionPayload) -> Result<(), ModerationError> {
        let SubmissionPayload::AvailabilityReport(report) = payload else {
            return Ok(());
        };

        if !self.catalog.product_exists(report.product_id).await? {
            return Err(ModerationError::ApplyFailed(format!(
                "product {} does not exist",
                report.product_id
            )));
        }
        if !self.catalog.store_exists(report.store_id).await? {
            return Err(ModerationError::ApplyFailed(format!(
                "store {} does not exist",
                report.store_id
            )));
        }
        Ok(())
    }

    // ========================================================================
    // Review
    // ========================================================================

    /// Drive one submission through a reviewed transition.
    ///
    /// Holds the submission's lock across read → side effect → write. The
    /// status write is version-guarded on top, so an out-of-band writer
    /// surfaces as [`ModerationError::Conflict`] instead of a double-apply;
    /// an apply that ran for the losing write is unwound first.
    pub async fn moderate(
        &self,
        id: SubmissionId,
        action: ModerationAction,
        actor_id: ContributorId,
        note: Option<String>,
    ) -> Result<SubmissionRecord, ModerationError> {
        let _guard = self.locks.acquire(id).await;

        let submission = self
            .store
            .find(id)
            .await?
            .ok_or(ModerationError::NotFound)?;
        let plan = plan_transition(submission.status, action)?;

        // The ref the record carries once the transition lands, and
        // whether this call materialized it
        let (applied_ref, applied_here) = match plan.side_effect {
            PlannedSideEffect::RunApply if submission.applied_ref.is_none() => {
                let fresh = adapters::apply(&submission, self.catalog.as_ref()).await?;
                (Some(fresh), true)
            }
            // Already materialized; apply must not run twice
            PlannedSideEffect::RunApply => (submission.applied_ref.clone(), false),
            PlannedSideEffect::RunRevert => {
                adapters::revert(&submission, self.catalog.as_ref()).await?;
                (None, false)
            }
            PlannedSideEffect::None => (submission.applied_ref.clone(), false),
        };

        let landed = self
            .store
            .complete_transition(
                TransitionUpdate {
                    id,
                    expected_version: submission.version,
                    new_status: plan.to,
                    applied_ref: applied_ref.clone(),
                    reviewed_by: actor_id,
                    reviewed_at: Utc::now(),
                    review_note: note.clone(),
                },
                AuditRecord::new(id, plan.from, plan.to, actor_id, note),
            )
            .await?;
        if !landed {
            // Unwind a fresh apply so the losing side of a review race
            // does not leave an orphaned catalog record. The winner may
            // run in another process, out of reach of our lock registry.
            if applied_here {
                let mut applied = submission;
                applied.applied_ref = applied_ref;
                if let Err(revert_err) =
                    adapters::revert(&applied, self.catalog.as_ref()).await
                {
                    tracing::warn!(
                        submission_id = %id,
                        error = %revert_err,
                        "Failed to unwind applied change after losing a review race"
                    );
                }
            }
            return Err(ModerationError::Conflict);
        }

        tracing::info!(
            submission_id = %id,
            from = plan.from.as_str(),
            to = plan.to.as_str(),
            action = action.as_str(),
            actor_id = %actor_id,
            "Submission reviewed"
        );

        self.store.find(id).await?.ok_or(ModerationError::NotFound)
    }

    /// [`ModerationService::moderate`], scoped to one endpoint collection:
    /// an id whose kind (or content-edit target type) does not match is not
    /// found in that collection.
    pub async fn moderate_in_collection(
        &self,
        id: SubmissionId,
        expected_kind: SubmissionKind,
        expected_target: Option<PageTarget>,
        action: ModerationAction,
        actor_id: ContributorId,
        note: Option<String>,
    ) -> Result<SubmissionRecord, ModerationError> {
        // Kind and target never change after intake, so this check can stay
        // outside the lock
        let submission = self
            .store
            .find(id)
            .await?
            .ok_or(ModerationError::NotFound)?;
        if submission.kind != expected_kind {
            return Err(ModerationError::NotFound);
        }
        if let Some(target) = expected_target {
            if submission.target_type != Some(target) {
                return Err(ModerationError::NotFound);
            }
        }

        self.moderate(id, action, actor_id, note).await
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub async fn get_submission(
        &self,
        id: SubmissionId,
    ) -> Result<SubmissionRecord, ModerationError> {
        self.store.find(id).await?.ok_or(ModerationError::NotFound)
    }

    /// Transition history for one submission, oldest first.
    pub async fn audit_trail(&self, id: SubmissionId) -> Result<Vec<AuditRecord>, ModerationError> {
        if self.store.find(id).await?.is_none() {
            return Err(ModerationError::NotFound);
        }
        self.store.audit_for(id).await
    }

    /// The untrusted review queue: `pending` submissions of one kind.
    pub async fn pending_queue(
        &self,
        kind: SubmissionKind,
        target: Option<PageTarget>,
        page: &ValidatedPageArgs,
    ) -> Result<Page<SubmissionRecord>, ModerationError> {
        let rows = self
            .store
            .list_by_status_and_kind(SubmissionStatus::Pending, kind, target, page)
            .await?;
        Ok(Page::from_rows(rows, page))
    }

    /// The trusted review queue: `live_pending_review` submissions.
    pub async fn trusted_pending_queue(
        &self,
        kind: SubmissionKind,
        target: Option<PageTarget>,
        page: &ValidatedPageArgs,
    ) -> Result<Page<SubmissionRecord>, ModerationError> {
        let rows = self
            .store
            .list_by_status_and_kind(SubmissionStatus::LivePendingReview, kind, target, page)
            .await?;
        Ok(Page::from_rows(rows, page))
    }
}

fn validate_payload(payload: &SubmissionPayload) -> Result<(), ModerationError> {
    fn required(value: &str, what: &str) -> Result<(), ModerationError> {
        if value.trim().is_empty() {
            return Err(ModerationError::Validation(format!("{} is required", what)));
        }
        Ok(())
    }

    match payload {
        SubmissionPayload::Product(p) => {
            required(&p.name, "product name")?;
            required(&p.brand, "product brand")
        }
        SubmissionPayload::Store(p) => {
            required(&p.name, "store name")?;
            required(&p.address, "store address")?;
            required(&p.city, "store city")
        }
        SubmissionPayload::AvailabilityReport(_) => Ok(()),
        SubmissionPayload::ContentEdit(p) => {
            if !p.target_type.is_editable(&p.field) {
                return Err(ModerationError::Validation(format!(
                    "field '{}' is not editable on {}",
                    p.field,
                    p.target_type.as_str()
                )));
            }
            Ok(())
        }
    }
}
