//! Submission model: one row per contribution, owned by the state machine
//! for its entire life.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::entity_ids::{ContributorId, ProductId, StoreId, SubmissionId};
use crate::domains::catalog::models::PageTarget;

// ============================================================================
// Enums
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "submission_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    /// Untrusted path: invisible until approved.
    Pending,
    /// Trusted path: already applied, awaiting review.
    LivePendingReview,
    Approved,
    Rejected,
}

impl SubmissionStatus {
    /// Terminal states accept no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, SubmissionStatus::Approved | SubmissionStatus::Rejected)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionStatus::Pending => "pending",
            SubmissionStatus::LivePendingReview => "live_pending_review",
            SubmissionStatus::Approved => "approved",
            SubmissionStatus::Rejected => "rejected",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "submission_kind", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SubmissionKind {
    Product,
    Store,
    AvailabilityReport,
    ContentEdit,
}

impl SubmissionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionKind::Product => "product",
            SubmissionKind::Store => "store",
            SubmissionKind::AvailabilityReport => "availability_report",
            SubmissionKind::ContentEdit => "content_edit",
        }
    }
}

// ============================================================================
// Payloads
// ============================================================================

/// Kind-specific submission data.
///
/// The enum is closed: adding a payload kind means adding a variant here
/// and an apply/revert arm next to the existing ones. Serialized form is
/// self-describing (`kind` tag), which is also what lands in the payload
/// column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SubmissionPayload {
    Product(ProductPayload),
    Store(StorePayload),
    AvailabilityReport(AvailabilityPayload),
    ContentEdit(ContentEditPayload),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    pub name: String,
    pub brand: String,
    pub style: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorePayload {
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: Option<String>,
    pub website: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityPayload {
    pub product_id: ProductId,
    pub store_id: StoreId,
    pub price_range: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentEditPayload {
    pub target_type: PageTarget,
    pub target_id: Uuid,
    pub field: String,
    /// Live value at submission time. Immutable once recorded; apply and
    /// revert both compare against the live target before writing.
    pub original_value: String,
    pub suggested_value: String,
}

impl SubmissionPayload {
    pub fn kind(&self) -> SubmissionKind {
        match self {
            SubmissionPayload::Product(_) => SubmissionKind::Product,
            SubmissionPayload::Store(_) => SubmissionKind::Store,
            SubmissionPayload::AvailabilityReport(_) => SubmissionKind::AvailabilityReport,
            SubmissionPayload::ContentEdit(_) => SubmissionKind::ContentEdit,
        }
    }

    /// Sub-discriminator for content edits.
    pub fn target_type(&self) -> Option<PageTarget> {
        match self {
            SubmissionPayload::ContentEdit(p) => Some(p.target_type),
            _ => None,
        }
    }

    /// Dedupe key for the kinds that forbid duplicate active submissions
    /// per submitter. Stores collide on normalized (name, city);
    /// availability reports on the (product, store) pair.
    pub fn natural_key(&self) -> Option<String> {
        match self {
            SubmissionPayload::Store(p) => Some(format!(
                "store:{}|{}",
                p.name.trim().to_lowercase(),
                p.city.trim().to_lowercase()
            )),
            SubmissionPayload::AvailabilityReport(p) => Some(format!(
                "availability_report:{}|{}",
                p.product_id, p.store_id
            )),
            _ => None,
        }
    }
}

// ============================================================================
// Submission record
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRecord {
    pub id: SubmissionId,
    pub kind: SubmissionKind,
    pub target_type: Option<PageTarget>,
    pub payload: SubmissionPayload,
    pub submitter_id: ContributorId,
    /// Trust snapshot frozen at intake; later trust changes never rewrite
    /// history.
    pub trusted_at_submission: bool,
    pub status: SubmissionStatus,
    /// Pointer into the catalog record this submission created or mutated.
    /// Set exactly when status is `live_pending_review` or `approved`.
    pub applied_ref: Option<String>,
    /// Compared-and-swapped on every transition.
    pub version: i32,
    pub natural_key: Option<String>,
    pub created_at: DateTime<Utc>,
    pub reviewed_by: Option<ContributorId>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub review_note: Option<String>,
}

impl SubmissionRecord {
    /// Build a fresh submission. Trusted submitters start on the live path;
    /// the caller runs apply and records `applied_ref` before persisting.
    pub fn new(payload: SubmissionPayload, submitter_id: ContributorId, trusted: bool) -> Self {
        let status = if trusted {
            SubmissionStatus::LivePendingReview
        } else {
            SubmissionStatus::Pending
        };

        Self {
            id: SubmissionId::new(),
            kind: payload.kind(),
            target_type: payload.target_type(),
            natural_key: payload.natural_key(),
            payload,
            submitter_id,
            trusted_at_submission: trusted,
            status,
            applied_ref: None,
            version: 0,
            created_at: Utc::now(),
            reviewed_by: None,
            reviewed_at: None,
            review_note: None,
        }
    }

    /// `applied_ref` must be set exactly in the states where the change is
    /// live in the catalog.
    pub fn applied_ref_consistent(&self) -> bool {
        let should_be_applied = matches!(
            self.status,
            SubmissionStatus::LivePendingReview | SubmissionStatus::Approved
        );
        should_be_applied == self.applied_ref.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product_payload() -> SubmissionPayload {
        SubmissionPayload::Product(ProductPayload {
            name: "Oat Milk Stout".to_string(),
            brand: "North Roast".to_string(),
            style: Some("stout".to_string()),
            description: None,
        })
    }

    #[test]
    fn test_payload_kind_tags() {
        let json = serde_json::to_value(product_payload()).unwrap();
        assert_eq!(json["kind"], "product");
        assert_eq!(json["name"], "Oat Milk Stout");

        let edit = SubmissionPayload::ContentEdit(ContentEditPayload {
            target_type: PageTarget::City,
            target_id: Uuid::new_v4(),
            field: "headline".to_string(),
            original_value: "old".to_string(),
            suggested_value: "new".to_string(),
        });
        let json = serde_json::to_value(&edit).unwrap();
        assert_eq!(json["kind"], "content_edit");
        assert_eq!(json["targetType"], "city");
        assert_eq!(json["originalValue"], "old");

        let back: SubmissionPayload = serde_json::from_value(json).unwrap();
        assert_eq!(back, edit);
    }

    #[test]
    fn test_natural_key_normalization() {
        let a = SubmissionPayload::Store(StorePayload {
            name: "  Corner Grocer ".to_string(),
            address: "100 Main St".to_string(),
            city: "Duluth".to_string(),
            state: None,
            website: None,
        });
        let b = SubmissionPayload::Store(StorePayload {
            name: "corner grocer".to_string(),
            address: "somewhere else".to_string(),
            city: "DULUTH".to_string(),
            state: Some("MN".to_string()),
            website: None,
        });
        assert_eq!(a.natural_key(), b.natural_key());

        assert!(product_payload().natural_key().is_none());
    }

    #[test]
    fn test_new_submission_paths() {
        let submitter = ContributorId::new();

        let pending = SubmissionRecord::new(product_payload(), submitter, false);
        assert_eq!(pending.status, SubmissionStatus::Pending);
        assert_eq!(pending.version, 0);
        assert!(pending.applied_ref_consistent());

        let live = SubmissionRecord::new(product_payload(), submitter, true);
        assert_eq!(live.status, SubmissionStatus::LivePendingReview);
        assert!(live.trusted_at_submission);
        // not yet consistent: the caller must apply and set applied_ref
        assert!(!live.applied_ref_consistent());
    }

    #[test]
    fn test_terminal_states() {
        assert!(!SubmissionStatus::Pending.is_terminal());
        assert!(!SubmissionStatus::LivePendingReview.is_terminal());
        assert!(SubmissionStatus::Approved.is_terminal());
        assert!(SubmissionStatus::Rejected.is_terminal());
    }
}
