//! Store submission intake, review decisions, and review queues.

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use crate::common::{AdminCapability, Page, PageArgs};
use crate::domains::moderation::{
    ModerationAction, StorePayload, SubmissionKind, SubmissionPayload, SubmissionRecord,
    SubmissionStatus,
};
use crate::server::app::AppState;
use crate::server::middleware::AuthUser;
use crate::server::routes::api::{
    parse_submission_id, require_admin, require_contributor, ApiError, ReviewRequest,
    ReviewResponse, SubmissionAccepted,
};

pub fn router() -> Router {
    Router::new()
        .route("/stores", post(submit_store))
        .route("/stores/:id/approve", post(approve_store))
        .route("/stores/:id/reject", post(reject_store))
        .route("/stores/:id/approve-trusted", post(approve_store))
        .route("/stores/:id/reject-trusted", post(reject_store))
        .route("/stores/pending", get(pending_stores))
        .route("/stores/trusted-pending", get(trusted_pending_stores))
}

/// POST /stores - submit a store for review
///
/// Duplicate active submissions for the same (submitter, name + city) key
/// come back as 409.
async fn submit_store(
    Extension(state): Extension<AppState>,
    auth: Option<Extension<AuthUser>>,
    Json(payload): Json<StorePayload>,
) -> Result<(StatusCode, Json<SubmissionAccepted>), ApiError> {
    let user = require_contributor(auth)?;
    let submission = state
        .moderation
        .submit(SubmissionPayload::Store(payload), user.contributor_id)
        .await?;
    let message = match submission.status {
        SubmissionStatus::LivePendingReview => "Store added to the catalog and queued for review",
        _ => "Store submitted for review",
    };
    Ok((
        StatusCode::CREATED,
        Json(SubmissionAccepted::new(message, &submission)),
    ))
}

/// POST /stores/:id/approve (and /approve-trusted)
async fn approve_store(
    Extension(state): Extension<AppState>,
    auth: Option<Extension<AuthUser>>,
    Path(id): Path<String>,
    body: Option<Json<ReviewRequest>>,
) -> Result<Json<ReviewResponse>, ApiError> {
    review_store(state, auth, id, ModerationAction::Approve, body).await
}

/// POST /stores/:id/reject (and /reject-trusted)
async fn reject_store(
    Extension(state): Extension<AppState>,
    auth: Option<Extension<AuthUser>>,
    Path(id): Path<String>,
    body: Option<Json<ReviewRequest>>,
) -> Result<Json<ReviewResponse>, ApiError> {
    review_store(state, auth, id, ModerationAction::Reject, body).await
}

async fn review_store(
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
            SubmissionKind::Store,
            None,
            action,
            user.contributor_id,
            note,
        )
        .await?;

    let message = match action {
        ModerationAction::Approve => "Store submission approved",
        ModerationAction::Reject => "Store submission rejected",
    };
    Ok(Json(ReviewResponse::new(message)))
}

/// GET /stores/pending - untrusted submissions awaiting review
async fn pending_stores(
    Extension(state): Extension<AppState>,
    auth: Option<Extension<AuthUser>>,
    Query(args): Query<PageArgs>,
) -> Result<Json<Page<SubmissionRecord>>, ApiError> {
    require_admin(&state, auth, AdminCapability::ViewReviewQueues).await?;
    let page = args.validate().map_err(ApiError::validation)?;
    let result = state
        .moderation
        .pending_queue(SubmissionKind::Store, None, &page)
        .await?;
    Ok(Json(result))
}

/// GET /stores/trusted-pending - live submissions awaiting post-review
async fn trusted_pending_stores(
    Extension(state): Extension<AppState>,
    auth: Option<Extension<AuthUser>>,
    Query(args): Query<PageArgs>,
) -> Result<Json<Page<SubmissionRecord>>, ApiError> {
    require_admin(&state, auth, AdminCapability::ViewReviewQueues).await?;
    let page = args.validate().map_err(ApiError::validation)?;
    let result = state
        .moderation
        .trusted_pending_queue(SubmissionKind::Store, None, &page)
        .await?;
    Ok(Json(result))
}
