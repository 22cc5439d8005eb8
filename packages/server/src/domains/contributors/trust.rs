//! Trust evaluation at submission intake.
//!
//! The evaluator runs exactly once per submission; its answer is frozen
//! into `trusted_at_submission`. Revoking trust later changes only future
//! submissions.

use std::collections::HashSet;

use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;

use super::models::ContributorRecord;
use crate::common::entity_ids::ContributorId;
use crate::domains::moderation::models::SubmissionKind;

/// Decides whether a submitter's changes of a given kind go live
/// immediately (pending later review) or stay invisible until approved.
#[async_trait]
pub trait TrustEvaluator: Send + Sync {
    async fn is_trusted(&self, submitter: ContributorId, kind: SubmissionKind) -> Result<bool>;
}

/// Trust evaluator driven by a fixed id list (TRUSTED_CONTRIBUTORS config).
pub struct StaticTrustEvaluator {
    trusted: HashSet<ContributorId>,
}

impl StaticTrustEvaluator {
    pub fn new(trusted: impl IntoIterator<Item = ContributorId>) -> Self {
        Self {
            trusted: trusted.into_iter().collect(),
        }
    }

    /// Build from the raw config strings, skipping entries that are not
    /// valid UUIDs.
    pub fn from_identifiers(identifiers: &[String]) -> Self {
        Self {
            trusted: identifiers
                .iter()
                .filter_map(|s| ContributorId::parse(s).ok())
                .collect(),
        }
    }
}

#[async_trait]
impl TrustEvaluator for StaticTrustEvaluator {
    // Trust is currently per-contributor, not per-kind.
    async fn is_trusted(&self, submitter: ContributorId, _kind: SubmissionKind) -> Result<bool> {
        Ok(self.trusted.contains(&submitter))
    }
}

/// Trust evaluator backed by the contributors table.
pub struct PgTrustEvaluator {
    pool: PgPool,
}

impl PgTrustEvaluator {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TrustEvaluator for PgTrustEvaluator {
    async fn is_trusted(&self, submitter: ContributorId, _kind: SubmissionKind) -> Result<bool> {
        let contributor = ContributorRecord::find_by_id(submitter, &self.pool).await?;
        Ok(contributor.map(|c| c.trusted).unwrap_or(false))
    }
}
