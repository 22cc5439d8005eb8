//! Bulk moderation coordinator.
//!
//! Applies one action to a batch of submission ids, isolating per-item
//! failures: a single failing id never aborts its siblings. The batch is
//! deliberately non-transactional, so a cut-off call leaves processed
//! items in their new state and callers re-issue with the rest.

use serde::Serialize;

use crate::common::entity_ids::{ContributorId, SubmissionId};
use crate::domains::catalog::models::PageTarget;

use super::machine::ModerationAction;
use super::models::SubmissionKind;
use super::service::ModerationService;

/// One id that did not make it through the batch.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkFailure {
    pub id: String,
    pub code: &'static str,
    pub reason: String,
}

/// What a bulk call accomplished.
///
/// `modified_count` below the requested batch size is a real outcome, not
/// an error; the failures list names each skipped id.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkOutcome {
    pub modified_count: usize,
    pub failures: Vec<BulkFailure>,
}

impl ModerationService {
    /// Moderate a batch of ids within one endpoint collection.
    ///
    /// Each id goes through the same locked, version-guarded transition as
    /// a single-item call, so a batch racing a single-item review of one of
    /// its ids yields exactly one winner for that id.
    pub async fn moderate_many(
        &self,
        ids: &[SubmissionId],
        expected_kind: SubmissionKind,
        expected_target: Option<PageTarget>,
        action: ModerationAction,
        actor_id: ContributorId,
        note: Option<String>,
    ) -> BulkOutcome {
        let mut modified_count = 0;
        let mut failures = Vec::new();

        for &id in ids {
            match self
                .moderate_in_collection(
                    id,
                    expected_kind,
                    expected_target,
                    action,
                    actor_id,
                    note.clone(),
                )
                .await
            {
                Ok(_) => modified_count += 1,
                Err(e) => failures.push(BulkFailure {
                    id: id.to_string(),
                    code: e.code(),
                    reason: e.to_string(),
                }),
            }
        }

        self.locks.cleanup().await;

        tracing::info!(
            requested = ids.len(),
            modified = modified_count,
            failed = failures.len(),
            action = action.as_str(),
            actor_id = %actor_id,
            "Bulk moderation finished"
        );

        BulkOutcome {
            modified_count,
            failures,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::domains::catalog::MemoryCatalog;
    use crate::domains::contributors::StaticTrustEvaluator;
    use crate::domains::moderation::models::{ProductPayload, SubmissionPayload, SubmissionStatus};
    use crate::domains::moderation::store::MemorySubmissionStore;

    fn service() -> ModerationService {
        ModerationService::new(
            Arc::new(MemorySubmissionStore::new()),
            Arc::new(MemoryCatalog::new()),
            Arc::new(StaticTrustEvaluator::new(vec![])),
        )
    }

    fn product_payload(name: &str) -> SubmissionPayload {
        SubmissionPayload::Product(ProductPayload {
            name: name.to_string(),
            brand: "North Roast".to_string(),
            style: None,
            description: None,
        })
    }

    #[tokio::test]
    async fn test_bulk_approve_isolates_failures() {
        let service = service();
        let submitter = ContributorId::new();
        let admin = ContributorId::new();

        let a = service
            .submit(product_payload("A"), submitter)
            .await
            .unwrap();
        let b = service
            .submit(product_payload("B"), submitter)
            .await
            .unwrap();
        let c = service
            .submit(product_payload("C"), submitter)
            .await
            .unwrap();

        // B is reviewed out of band before the batch reaches it
        service
            .moderate(b.id, ModerationAction::Reject, admin, None)
            .await
            .unwrap();

        let missing = SubmissionId::new();
        let outcome = service
            .moderate_many(
                &[a.id, b.id, c.id, missing],
                SubmissionKind::Product,
                None,
                ModerationAction::Approve,
                admin,
                None,
            )
            .await;

        assert_eq!(outcome.modified_count, 2);
        assert_eq!(outcome.failures.len(), 2);

        let failed_ids: Vec<&str> = outcome.failures.iter().map(|f| f.id.as_str()).collect();
        assert!(failed_ids.contains(&b.id.to_string().as_str()));
        assert!(failed_ids.contains(&missing.to_string().as_str()));

        let b_failure = outcome
            .failures
            .iter()
            .find(|f| f.id == b.id.to_string())
            .unwrap();
        assert_eq!(b_failure.code, "already_reviewed");

        let approved = service.get_submission(a.id).await.unwrap();
        assert_eq!(approved.status, SubmissionStatus::Approved);
    }

    #[tokio::test]
    async fn test_bulk_outcome_serializes_camel_case() {
        let outcome = BulkOutcome {
            modified_count: 1,
            failures: vec![BulkFailure {
                id: "x".to_string(),
                code: "not_found",
                reason: "Submission not found".to_string(),
            }],
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert!(json.get("modifiedCount").is_some());
        assert_eq!(json["failures"][0]["code"], "not_found");
    }
}
