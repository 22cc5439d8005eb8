//! Availability report intake, review decisions, and review queues.
//!
//! Reports also carry the batch resolution endpoint the admin review
//! screen uses to confirm or reject a whole page of sightings at once.

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use serde::Deserialize;

use crate::common::{AdminCapability, Page, PageArgs};
use crate::domains::moderation::{
    AvailabilityPayload, ModerationAction, SubmissionKind, SubmissionPayload, SubmissionRecord,
    SubmissionStatus,
};
use crate::server::app::AppState;
use crate::server::middleware::AuthUser;
use crate::server::routes::api::{
    parse_bulk_ids, parse_submission_id, require_admin, require_contributor, ApiError,
    BulkReviewResponse, ReviewRequest, ReviewResponse, SubmissionAccepted,
};

pub fn router() -> Router {
    Router::new()
        .route("/reports", post(submit_report))
        .route("/reports/:id/approve", post(approve_report))
        .route("/reports/:id/reject", post(reject_report))
        .route("/reports/:id/approve-trusted", post(approve_report))
        .route("/reports/:id/reject-trusted", post(reject_report))
        .route("/reports/pending", get(pending_reports))
        .route("/reports/trusted-pending", get(trusted_pending_reports))
        .route("/pending-reports/bulk-moderate", put(bulk_moderate_reports))
}

/// POST /reports - report product availability at a store
///
/// The referenced product and store must exist (422 otherwise); a second
/// active report by the same contributor for the same pair is 409.
async fn submit_report(
    Extension(state): Extension<AppState>,
    auth: Option<Extension<AuthUser>>,
    Json(payload): Json<AvailabilityPayload>,
) -> Result<(StatusCode, Json<SubmissionAccepted>), ApiError> {
    let user = require_contributor(auth)?;
    let submission = state
        .moderation
        .submit(
            SubmissionPayload::AvailabilityReport(payload),
            user.contributor_id,
        )
        .await?;
    let message = match submission.status {
        SubmissionStatus::LivePendingReview => "Availability recorded and queued for review",
        _ => "Availability report submitted for review",
    };
    Ok((
        StatusCode::CREATED,
        Json(SubmissionAccepted::new(message, &submission)),
    ))
}

/// POST /reports/:id/approve (and /approve-trusted)
async fn approve_report(
    Extension(state): Extension<AppState>,
    auth: Option<Extension<AuthUser>>,
    Path(id): Path<String>,
    body: Option<Json<ReviewRequest>>,
) -> Result<Json<ReviewResponse>, ApiError> {
    review_report(state, auth, id, ModerationAction::Approve, body).await
}

/// POST /reports/:id/reject (and /reject-trusted)
async fn reject_report(
    Extension(state): Extension<AppState>,
    auth: Option<Extension<AuthUser>>,
    Path(id): Path<String>,
    body: Option<Json<ReviewRequest>>,
) -> Result<Json<ReviewResponse>, ApiError> {
    review_report(state, auth, id, ModerationAction::Reject, body).await
}

async fn review_report(
    state: AppState,
    auth: Option<Extension<AuthUser>>,
    raw_id: String,
    action: ModerationAction,
    body: Option<Json<ReviewRequest>>,
) -> Result<Json<ReviewResponse>, ApiError> {
    let user = require_admin(&state, auth, AdminCapability::ReviewSubmissions).await?;
    let id = parse_submission_id(&raw_id)?;
    let note = body.map(|Json(b)| b).unwrap_or_default().note();

    state
        .moderation
        .moderate_in_collection(
            id,
            SubmissionKind::AvailabilityReport,
            None,
            action,
            user.contributor_id,
            note,
        )
        .await?;

    let message = match action {
        ModerationAction::Approve => "Availability report confirmed",
        ModerationAction::Reject => "Availability report rejected",
    };
    Ok(Json(ReviewResponse::new(message)))
}

/// How an admin resolved a batch of availability reports
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
enum ReportResolution {
    Confirmed,
    Rejected,
}

impl ReportResolution {
    fn action(self) -> ModerationAction {
        match self {
            ReportResolution::Confirmed => ModerationAction::Approve,
            ReportResolution::Rejected => ModerationAction::Reject,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BulkModerateRequest {
    report_ids: Vec<String>,
    status: ReportResolution,
}

/// PUT /pending-reports/bulk-moderate - resolve a batch of reports
async fn bulk_moderate_reports(
    Extension(state): Extension<AppState>,
    auth: Option<Extension<AuthUser>>,
    Json(body): Json<BulkModerateRequest>,
) -> Result<Json<BulkReviewResponse>, ApiError> {
    let user = require_admin(&state, auth, AdminCapability::BulkReviewSubmissions).await?;
    let (ids, invalid) = parse_bulk_ids(&body.report_ids);

    let mut outcome = state
        .moderation
        .moderate_many(
            &ids,
            SubmissionKind::AvailabilityReport,
            None,
            body.status.action(),
            user.contributor_id,
            None,
        )
        .await;
    outcome.failures.extend(invalid);

    Ok(Json(BulkReviewResponse::new(
        "Report review finished",
        outcome,
    )))
}

/// GET /reports/pending - untrusted reports awaiting review
async fn pending_reports(
    Extension(state): Extension<AppState>,
    auth: Option<Extension<AuthUser>>,
    Query(args): Query<PageArgs>,
) -> Result<Json<Page<SubmissionRecord>>, ApiError> {
    require_admin(&state, auth, AdminCapability::ViewReviewQueues).await?;
    let page = args.validate().map_err(ApiError::validation)?;
    let result = state
        .moderation
        .pending_queue(SubmissionKind::AvailabilityReport, None, &page)
        .await?;
    Ok(Json(result))
}

/// GET /reports/trusted-pending - live reports awaiting post-review
async fn trusted_pending_reports(
    Extension(state): Extension<AppState>,
    auth: Option<Extension<AuthUser>>,
    Query(args): Query<PageArgs>,
) -> Result<Json<Page<SubmissionRecord>>, ApiError> {
    require_admin(&state, auth, AdminCapability::ViewReviewQueues).await?;
    let page = args.validate().map_err(ApiError::validation)?;
    let result = state
        .moderation
        .trusted_pending_queue(SubmissionKind::AvailabilityReport, None, &page)
        .await?;
    Ok(Json(result))
}
