use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::submission::SubmissionStatus;
use crate::common::entity_ids::{AuditRecordId, ContributorId, SubmissionId};

/// One append-only entry per successful transition.
///
/// Submission rows only keep the last reviewer; this trail answers "who
/// approved/rejected X and when" for the full history.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AuditRecord {
    pub id: AuditRecordId,
    pub submission_id: SubmissionId,
    pub from_status: SubmissionStatus,
    pub to_status: SubmissionStatus,
    pub actor_id: ContributorId,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl AuditRecord {
    pub fn new(
        submission_id: SubmissionId,
        from_status: SubmissionStatus,
        to_status: SubmissionStatus,
        actor_id: ContributorId,
        note: Option<String>,
    ) -> Self {
        Self {
            id: AuditRecordId::new(),
            submission_id,
            from_status,
            to_status,
            actor_id,
            note,
            created_at: Utc::now(),
        }
    }
}
