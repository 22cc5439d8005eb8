//! Content edit intake, review decisions, and review queues.
//!
//! Edits target one field on a city, retailer, or brand page. Each target
//! type gets its own collection of endpoints; a submission id from one
//! collection is not found in another.

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use serde::Deserialize;

use crate::common::{AdminCapability, Page, PageArgs};
use crate::domains::catalog::PageTarget;
use crate::domains::moderation::{
    ModerationAction, SubmissionKind, SubmissionRecord, SubmissionStatus,
};
use crate::server::app::AppState;
use crate::server::middleware::AuthUser;
use crate::server::routes::api::{
    parse_bulk_ids, parse_submission_id, parse_target_id, require_admin, require_contributor,
    ApiError, BulkReviewResponse, ReviewRequest, ReviewResponse, SubmissionAccepted,
};

pub fn router() -> Router {
    Router::new()
        // Intake, hung off the page being edited
        .route("/cities/:id/content-edits", post(submit_city_edit))
        .route("/retailers/:id/content-edits", post(submit_retailer_edit))
        .route("/brands/:id/content-edits", post(submit_brand_edit))
        // Review decisions, one collection per target type
        .route("/city-content-edits/:id/approve", post(approve_city_edit))
        .route("/city-content-edits/:id/reject", post(reject_city_edit))
        .route(
            "/retailer-content-edits/:id/approve",
            post(approve_retailer_edit),
        )
        .route(
            "/retailer-content-edits/:id/reject",
            post(reject_retailer_edit),
        )
        .route("/brand-content-edits/:id/approve", post(approve_brand_edit))
        .route("/brand-content-edits/:id/reject", post(reject_brand_edit))
        // Batch decisions
        .route("/city-content-edits/bulk-review", put(bulk_review_city_edits))
        .route(
            "/retailer-content-edits/bulk-review",
            put(bulk_review_retailer_edits),
        )
        .route(
            "/brand-content-edits/bulk-review",
            put(bulk_review_brand_edits),
        )
        // Queues
        .route("/city-content-edits/pending", get(pending_city_edits))
        .route(
            "/city-content-edits/trusted-pending",
            get(trusted_pending_city_edits),
        )
        .route("/retailer-content-edits/pending", get(pending_retailer_edits))
        .route(
            "/retailer-content-edits/trusted-pending",
            get(trusted_pending_retailer_edits),
        )
        .route("/brand-content-edits/pending", get(pending_brand_edits))
        .route(
            "/brand-content-edits/trusted-pending",
            get(trusted_pending_brand_edits),
        )
}

// ============================================================================
// Intake
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContentEditRequest {
    field: String,
    suggested_value: String,
}

/// POST /cities/:id/content-edits
async fn submit_city_edit(
    Extension(state): Extension<AppState>,
    auth: Option<Extension<AuthUser>>,
    Path(id): Path<String>,
    Json(body): Json<ContentEditRequest>,
) -> Result<(StatusCode, Json<SubmissionAccepted>), ApiError> {
    submit_edit(state, auth, PageTarget::City, id, body).await
}

/// POST /retailers/:id/content-edits
async fn submit_retailer_edit(
    Extension(state): Extension<AppState>,
    auth: Option<Extension<AuthUser>>,
    Path(id): Path<String>,
    Json(body): Json<ContentEditRequest>,
) -> Result<(StatusCode, Json<SubmissionAccepted>), ApiError> {
    submit_edit(state, auth, PageTarget::Retailer, id, body).await
}

/// POST /brands/:id/content-edits
async fn submit_brand_edit(
    Extension(state): Extension<AppState>,
    auth: Option<Extension<AuthUser>>,
    Path(id): Path<String>,
    Json(body): Json<ContentEditRequest>,
) -> Result<(StatusCode, Json<SubmissionAccepted>), ApiError> {
    submit_edit(state, auth, PageTarget::Brand, id, body).await
}

async fn submit_edit(
    state: AppState,
    auth: Option<Extension<AuthUser>>,
    target: PageTarget,
    raw_id: String,
    body: ContentEditRequest,
) -> Result<(StatusCode, Json<SubmissionAccepted>), ApiError> {
    let user = require_contributor(auth)?;
    let target_id = parse_target_id(&raw_id)?;

    let submission = state
        .moderation
        .submit_content_edit(
            target,
            target_id,
            body.field,
            body.suggested_value,
            user.contributor_id,
        )
        .await?;

    let message = match submission.status {
        SubmissionStatus::LivePendingReview => "Edit published and queued for review",
        _ => "Edit submitted for review",
    };
    Ok((
        StatusCode::CREATED,
        Json(SubmissionAccepted::new(message, &submission)),
    ))
}

// ============================================================================
// Review decisions
// ============================================================================

macro_rules! review_handlers {
    ($approve:ident, $reject:ident, $target:expr) => {
        async fn $approve(
            Extension(state): Extension<AppState>,
            auth: Option<Extension<AuthUser>>,
            Path(id): Path<String>,
            body: Option<Json<ReviewRequest>>,
        ) -> Result<Json<ReviewResponse>, ApiError> {
            review_edit(state, auth, $target, id, ModerationAction::Approve, body).await
        }

        async fn $reject(
            Extension(state): Extension<AppState>,
            auth: Option<Extension<AuthUser>>,
            Path(id): Path<String>,
            body: Option<Json<ReviewRequest>>,
        ) -> Result<Json<ReviewResponse>, ApiError> {
            review_edit(state, auth, $target, id, ModerationAction::Reject, body).await
        }
    };
}

review_handlers!(approve_city_edit, reject_city_edit, PageTarget::City);
review_handlers!(approve_retailer_edit, reject_retailer_edit, PageTarget::Retailer);
review_handlers!(approve_brand_edit, reject_brand_edit, PageTarget::Brand);

async fn review_edit(
    state: AppState,
    auth: Option<Extension<AuthUser>>,
    target: PageTarget,
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
            SubmissionKind::ContentEdit,
            Some(target),
            action,
            user.contributor_id,
            note,
        )
        .await?;

    let message = match action {
        ModerationAction::Approve => "Content edit approved",
        ModerationAction::Reject => "Content edit rejected",
    };
    Ok(Json(ReviewResponse::new(message)))
}

// ============================================================================
// Batch decisions
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BulkReviewRequest {
    edit_ids: Vec<String>,
    action: ModerationAction,
    note: Option<String>,
}

/// PUT /city-content-edits/bulk-review
async fn bulk_review_city_edits(
    Extension(state): Extension<AppState>,
    auth: Option<Extension<AuthUser>>,
    Json(body): Json<BulkReviewRequest>,
) -> Result<Json<BulkReviewResponse>, ApiError> {
    bulk_review_edits(state, auth, PageTarget::City, body).await
}

/// PUT /retailer-content-edits/bulk-review
async fn bulk_review_retailer_edits(
    Extension(state): Extension<AppState>,
    auth: Option<Extension<AuthUser>>,
    Json(body): Json<BulkReviewRequest>,
) -> Result<Json<BulkReviewResponse>, ApiError> {
    bulk_review_edits(state, auth, PageTarget::Retailer, body).await
}

/// PUT /brand-content-edits/bulk-review
async fn bulk_review_brand_edits(
    Extension(state): Extension<AppState>,
    auth: Option<Extension<AuthUser>>,
    Json(body): Json<BulkReviewRequest>,
) -> Result<Json<BulkReviewResponse>, ApiError> {
    bulk_review_edits(state, auth, PageTarget::Brand, body).await
}

async fn bulk_review_edits(
    state: AppState,
    auth: Option<Extension<AuthUser>>,
    target: PageTarget,
    body: BulkReviewRequest,
) -> Result<Json<BulkReviewResponse>, ApiError> {
    let user = require_admin(&state, auth, AdminCapability::BulkReviewSubmissions).await?;
    let (ids, invalid) = parse_bulk_ids(&body.edit_ids);

    let mut outcome = state
        .moderation
        .moderate_many(
            &ids,
            SubmissionKind::ContentEdit,
            Some(target),
            body.action,
            user.contributor_id,
            body.note,
        )
        .await;
    outcome.failures.extend(invalid);

    Ok(Json(BulkReviewResponse::new(
        "Content edit review finished",
        outcome,
    )))
}

// ============================================================================
// Queues
// ============================================================================

macro_rules! queue_handlers {
    ($pending:ident, $trusted:ident, $target:expr) => {
        async fn $pending(
            Extension(state): Extension<AppState>,
            auth: Option<Extension<AuthUser>>,
            Query(args): Query<PageArgs>,
        ) -> Result<Json<Page<SubmissionRecord>>, ApiError> {
            edit_queue(state, auth, $target, false, args).await
        }

        async fn $trusted(
            Extension(state): Extension<AppState>,
            auth: Option<Extension<AuthUser>>,
            Query(args): Query<PageArgs>,
        ) -> Result<Json<Page<SubmissionRecord>>, ApiError> {
            edit_queue(state, auth, $target, true, args).await
        }
    };
}

queue_handlers!(pending_city_edits, trusted_pending_city_edits, PageTarget::City);
queue_handlers!(
    pending_retailer_edits,
    trusted_pending_retailer_edits,
    PageTarget::Retailer
);
queue_handlers!(pending_brand_edits, trusted_pending_brand_edits, PageTarget::Brand);

async fn edit_queue(
    state: AppState,
    auth: Option<Extension<AuthUser>>,
    target: PageTarget,
    trusted: bool,
    args: PageArgs,
) -> Result<Json<Page<SubmissionRecord>>, ApiError> {
    require_admin(&state, auth, AdminCapability::ViewReviewQueues).await?;
    let page = args.validate().map_err(ApiError::validation)?;

    let result = if trusted {
        state
            .moderation
            .trusted_pending_queue(SubmissionKind::ContentEdit, Some(target), &page)
            .await?
    } else {
        state
            .moderation
            .pending_queue(SubmissionKind::ContentEdit, Some(target), &page)
            .await?
    };
    Ok(Json(result))
}
