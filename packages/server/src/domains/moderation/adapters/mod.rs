//! Apply/revert adapters, one per payload kind.
//!
//! `apply` materializes a submission into the catalog and returns the
//! `applied_ref` pointing at the record it created or mutated; `revert`
//! undoes exactly that change. Dispatch is a `match` on the closed payload
//! enum. Each adapter touches only the one catalog record it owns.

use super::error::ModerationError;
use super::models::{SubmissionPayload, SubmissionRecord};
use crate::domains::catalog::Catalog;

mod availability;
mod content_edit;
mod product;
mod store;

/// Materialize the submission's payload into the catalog.
///
/// Callers guard idempotency by checking `applied_ref` is unset first;
/// this function always performs the write.
pub async fn apply(
    submission: &SubmissionRecord,
    catalog: &dyn Catalog,
) -> Result<String, ModerationError> {
    match &submission.payload {
        SubmissionPayload::Product(payload) => product::apply(payload, catalog).await,
        SubmissionPayload::Store(payload) => store::apply(payload, catalog).await,
        SubmissionPayload::AvailabilityReport(payload) => {
            availability::apply(
                payload,
                submission.submitter_id,
                submission.created_at,
                catalog,
            )
            .await
        }
        SubmissionPayload::ContentEdit(payload) => content_edit::apply(payload, catalog).await,
    }
}

/// Undo the previously applied change.
pub async fn revert(
    submission: &SubmissionRecord,
    catalog: &dyn Catalog,
) -> Result<(), ModerationError> {
    let Some(applied_ref) = submission.applied_ref.as_deref() else {
        return Err(ModerationError::RevertFailed(
            "submission has no applied ref".to_string(),
        ));
    };

    match &submission.payload {
        SubmissionPayload::Product(_) => product::revert(applied_ref, catalog).await,
        SubmissionPayload::Store(_) => store::revert(applied_ref, catalog).await,
        SubmissionPayload::AvailabilityReport(_) => {
            availability::revert(applied_ref, catalog).await
        }
        SubmissionPayload::ContentEdit(payload) => content_edit::revert(payload, catalog).await,
    }
}
