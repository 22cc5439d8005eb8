//! Submission detail and audit trail lookups for the admin review screens.

use axum::{
    extract::{Extension, Path},
    routing::get,
    Json, Router,
};

use crate::common::AdminCapability;
use crate::domains::moderation::{AuditRecord, SubmissionRecord};
use crate::server::app::AppState;
use crate::server::middleware::AuthUser;
use crate::server::routes::api::{parse_submission_id, require_admin, ApiError};

pub fn router() -> Router {
    Router::new()
        .route("/submissions/:id", get(get_submission))
        .route("/submissions/:id/audit", get(get_audit_trail))
}

/// GET /submissions/:id - full submission record
async fn get_submission(
    Extension(state): Extension<AppState>,
    auth: Option<Extension<AuthUser>>,
    Path(id): Path<String>,
) -> Result<Json<SubmissionRecord>, ApiError> {
    require_admin(&state, auth, AdminCapability::ViewReviewQueues).await?;
    let id = parse_submission_id(&id)?;
    let submission = state.moderation.get_submission(id).await?;
    Ok(Json(submission))
}

/// GET /submissions/:id/audit - transition history, oldest first
async fn get_audit_trail(
    Extension(state): Extension<AppState>,
    auth: Option<Extension<AuthUser>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<AuditRecord>>, ApiError> {
    require_admin(&state, auth, AdminCapability::ViewReviewQueues).await?;
    let id = parse_submission_id(&id)?;
    let trail = state.moderation.audit_trail(id).await?;
    Ok(Json(trail))
}
