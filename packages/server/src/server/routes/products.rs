//! Product submission intake, review decisions, and review queues.

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use crate::common::{AdminCapability, Page, PageArgs};
use crate::domains::moderation::{
    ModerationAction, ProductPayload, SubmissionKind, SubmissionPayload, SubmissionRecord,
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
        .route("/products", post(submit_product))
        .route("/products/:id/approve", post(approve_product))
        .route("/products/:id/reject", post(reject_product))
        .route("/products/:id/approve-trusted", post(approve_product))
        .route("/products/:id/reject-trusted", post(reject_product))
        .route("/products/pending", get(pending_products))
        .route("/products/trusted-pending", get(trusted_pending_products))
}

/// POST /products - submit a product for review
async fn submit_product(
    Extension(state): Extension<AppState>,
    auth: Option<Extension<AuthUser>>,
    Json(payload): Json<ProductPayload>,
) -> Result<(StatusCode, Json<SubmissionAccepted>), ApiError> {
    let user = require_contributor(auth)?;
    let submission = state
        .moderation
        .submit(SubmissionPayload::Product(payload), user.contributor_id)
        .await?;
    let message = match submission.status {
        SubmissionStatus::LivePendingReview => "Product added to the catalog and queued for review",
        _ => "Product submitted for review",
    };
    Ok((
        StatusCode::CREATED,
        Json(SubmissionAccepted::new(message, &submission)),
    ))
}

/// POST /products/:id/approve (and /approve-trusted)
async fn approve_product(
    Extension(state): Extension<AppState>,
    auth: Option<Extension<AuthUser>>,
    Path(id): Path<String>,
    body: Option<Json<ReviewRequest>>,
) -> Result<Json<ReviewResponse>, ApiError> {
    review_product(state, auth, id, ModerationAction::Approve, body).await
}

/// POST /products/:id/reject (and /reject-trusted)
async fn reject_product(
    Extension(state): Extension<AppState>,
    auth: Option<Extension<AuthUser>>,
    Path(id): Path<String>,
    body: Option<Json<ReviewRequest>>,
) -> Result<Json<ReviewResponse>, ApiError> {
    review_product(state, auth, id, ModerationAction::Reject, body).await
}

async fn review_product(
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
            SubmissionKind::Product,
            None,
            action,
            user.contributor_id,
            note,
        )
        .await?;

    let message = match action {
        ModerationAction::Approve => "Product submission approved",
        ModerationAction::Reject => "Product submission rejected",
    };
    Ok(Json(ReviewResponse::new(message)))
}

/// GET /products/pending - untrusted submissions awaiting review
async fn pending_products(
    Extension(state): Extension<AppState>,
    auth: Option<Extension<AuthUser>>,
    Query(args): Query<PageArgs>,
) -> Result<Json<Page<SubmissionRecord>>, ApiError> {
    require_admin(&state, auth, AdminCapability::ViewReviewQueues).await?;
    let page = args.validate().map_err(ApiError::validation)?;
    let result = state
        .moderation
        .pending_queue(SubmissionKind::Product, None, &page)
        .await?;
    Ok(Json(result))
}

/// GET /products/trusted-pending - live submissions awaiting post-review
async fn trusted_pending_products(
    Extension(state): Extension<AppState>,
    auth: Option<Extension<AuthUser>>,
    Query(args): Query<PageArgs>,
) -> Result<Json<Page<SubmissionRecord>>, ApiError> {
    require_admin(&state, auth, AdminCapability::ViewReviewQueues).await?;
    let page = args.validate().map_err(ApiError::validation)?;
    let result = state
        .moderation
        .trusted_pending_queue(SubmissionKind::Product, None, &page)
        .await?;
    Ok(Json(result))
}
