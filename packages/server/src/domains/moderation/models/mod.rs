pub mod audit;
pub mod submission;

pub use audit::AuditRecord;
pub use submission::{
    AvailabilityPayload, ContentEditPayload, ProductPayload, StorePayload, SubmissionKind,
    SubmissionPayload, SubmissionRecord, SubmissionStatus,
};
