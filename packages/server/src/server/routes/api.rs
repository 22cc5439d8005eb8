//! Shared plumbing for the REST route modules.
//!
//! Maps domain errors onto HTTP responses and holds the request and
//! response shapes used by more than one route module.

use axum::{
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::common::{Actor, AdminCapability, AuthError, SubmissionId};
use crate::domains::moderation::{
    BulkFailure, BulkOutcome, ModerationError, SubmissionRecord, SubmissionStatus,
};
use crate::server::app::AppState;
use crate::server::middleware::AuthUser;

// ============================================================================
// Error envelope
// ============================================================================

/// An HTTP-ready error: status code plus the `{error, code}` body
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            code: "validation_error",
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": self.message,
            "code": self.code,
        }));
        (self.status, body).into_response()
    }
}

impl From<ModerationError> for ApiError {
    fn from(err: ModerationError) -> Self {
        let status = match &err {
            ModerationError::NotFound => StatusCode::NOT_FOUND,
            ModerationError::AlreadyReviewed
            | ModerationError::StaleTarget
            | ModerationError::DuplicateSubmission
            | ModerationError::Conflict => StatusCode::CONFLICT,
            ModerationError::Validation(_) => StatusCode::BAD_REQUEST,
            ModerationError::ApplyFailed(_) | ModerationError::RevertFailed(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ModerationError::Database(_) | ModerationError::Storage(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        // Storage internals stay out of response bodies
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %err, "Internal error while handling request");
            "Internal server error".to_string()
        } else {
            err.to_string()
        };

        Self {
            status,
            code: err.code(),
            message,
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        let (status, code) = match &err {
            AuthError::AuthenticationRequired => {
                (StatusCode::UNAUTHORIZED, "authentication_required")
            }
            AuthError::InvalidToken => (StatusCode::UNAUTHORIZED, "invalid_token"),
            AuthError::PermissionDenied(_) => (StatusCode::FORBIDDEN, "permission_denied"),
            AuthError::AdminRequired => (StatusCode::FORBIDDEN, "admin_required"),
            AuthError::DatabaseError(_) | AuthError::InternalError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
            }
        };

        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %err, "Internal error during authorization");
            "Internal server error".to_string()
        } else {
            err.to_string()
        };

        Self {
            status,
            code,
            message,
        }
    }
}

// ============================================================================
// Authentication helpers
// ============================================================================

/// The contributor on the request, or 401 when the JWT middleware left no
/// identity behind
pub fn require_contributor(auth: Option<Extension<AuthUser>>) -> Result<AuthUser, ApiError> {
    auth.map(|Extension(user)| user)
        .ok_or_else(|| ApiError::from(AuthError::AuthenticationRequired))
}

/// The contributor on the request, checked for an admin capability
pub async fn require_admin(
    state: &AppState,
    auth: Option<Extension<AuthUser>>,
    capability: AdminCapability,
) -> Result<AuthUser, ApiError> {
    let user = require_contributor(auth)?;
    Actor::new(user.contributor_id, user.is_admin)
        .can(capability)
        .check(state)
        .await?;
    Ok(user)
}

// ============================================================================
// Path and body parsing
// ============================================================================

pub fn parse_submission_id(raw: &str) -> Result<SubmissionId, ApiError> {
    SubmissionId::parse(raw).map_err(|_| ApiError::validation("invalid submission id"))
}

pub fn parse_target_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::validation("invalid id"))
}

/// Split raw bulk ids into parsed ids plus per-item failures for the rest.
///
/// A malformed id in a batch is reported in the failure list rather than
/// rejecting the sibling ids with it.
pub fn parse_bulk_ids(raw_ids: &[String]) -> (Vec<SubmissionId>, Vec<BulkFailure>) {
    let mut ids = Vec::with_capacity(raw_ids.len());
    let mut failures = Vec::new();
    for raw in raw_ids {
        match SubmissionId::parse(raw) {
            Ok(id) => ids.push(id),
            Err(_) => failures.push(BulkFailure {
                id: raw.clone(),
                code: "validation_error",
                reason: "invalid submission id".to_string(),
            }),
        }
    }
    (ids, failures)
}

// ============================================================================
// Wire shapes shared across route modules
// ============================================================================

/// Intake success body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionAccepted {
    pub message: String,
    pub submission_id: SubmissionId,
    pub status: SubmissionStatus,
}

impl SubmissionAccepted {
    pub fn new(message: impl Into<String>, submission: &SubmissionRecord) -> Self {
        Self {
            message: message.into(),
            submission_id: submission.id,
            status: submission.status,
        }
    }
}

/// Single-decision success body
#[derive(Debug, Serialize)]
pub struct ReviewResponse {
    pub message: String,
}

impl ReviewResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Bulk-decision success body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkReviewResponse {
    pub message: String,
    pub modified_count: usize,
    pub failures: Vec<BulkFailure>,
}

impl BulkReviewResponse {
    pub fn new(message: impl Into<String>, outcome: BulkOutcome) -> Self {
        Self {
            message: message.into(),
            modified_count: outcome.modified_count,
            failures: outcome.failures,
        }
    }
}

/// Optional reviewer note on a decision call.
///
/// Approve endpoints send `reviewNote`; reject endpoints send `reason`.
/// Both land in the same review_note column, so either name is accepted
/// everywhere.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRequest {
    pub review_note: Option<String>,
    pub reason: Option<String>,
}

impl ReviewRequest {
    pub fn note(self) -> Option<String> {
        self.review_note.or(self.reason)
    }
}
