use thiserror::Error;

/// Errors surfaced by the moderation pipeline
#[derive(Error, Debug)]
pub enum ModerationError {
    #[error("Submission not found")]
    NotFound,

    #[error("Submission has already been reviewed")]
    AlreadyReviewed,

    #[error("Live value no longer matches this submission; re-review required")]
    StaleTarget,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("An active submission already exists for this target")]
    DuplicateSubmission,

    #[error("Apply failed: {0}")]
    ApplyFailed(String),

    #[error("Revert failed: {0}")]
    RevertFailed(String),

    #[error("Submission was modified concurrently; retry the action")]
    Conflict,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

impl ModerationError {
    /// Machine-readable code carried in error bodies and bulk failure
    /// entries.
    pub fn code(&self) -> &'static str {
        match self {
            ModerationError::NotFound => "not_found",
            ModerationError::AlreadyReviewed => "already_reviewed",
            ModerationError::StaleTarget => "stale_target",
            ModerationError::Validation(_) => "validation_error",
            ModerationError::DuplicateSubmission => "duplicate_submission",
            ModerationError::ApplyFailed(_) => "apply_failed",
            ModerationError::RevertFailed(_) => "revert_failed",
            ModerationError::Conflict => "conflict",
            ModerationError::Database(_) => "storage_error",
            ModerationError::Storage(_) => "storage_error",
        }
    }
}
