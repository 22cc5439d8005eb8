//! Moderation domain - the trust-tiered submission pipeline
//!
//! Architecture:
//!   intake → [`service::ModerationService`] → [`machine`] plans the
//!   transition → [`adapters`] apply/revert catalog changes →
//!   [`store::SubmissionStore`] persists the version-guarded status write
//!   and the audit trail.

pub mod adapters;
pub mod bulk;
pub mod error;
pub mod locks;
pub mod machine;
pub mod models;
pub mod service;
pub mod store;

// Re-export commonly used types
pub use bulk::{BulkFailure, BulkOutcome};
pub use error::ModerationError;
pub use machine::{plan_transition, ModerationAction, PlannedSideEffect, TransitionPlan};
pub use models::{
    AuditRecord, AvailabilityPayload, ContentEditPayload, ProductPayload, StorePayload,
    SubmissionKind, SubmissionPayload, SubmissionRecord, SubmissionStatus,
};
pub use service::ModerationService;
pub use store::{MemorySubmissionStore, PgSubmissionStore, SubmissionStore};
