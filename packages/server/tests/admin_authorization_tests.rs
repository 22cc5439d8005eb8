//! Authorization tests for the moderation API.
//!
//! Each guarded endpoint is checked three ways: an admin succeeds, an
//! authenticated non-admin is refused, and an anonymous caller is asked
//! to authenticate. Intake endpoints only require a signed-in
//! contributor.

mod common;

use axum::http::StatusCode;
use serde_json::json;

use crate::common::{body_json, TestHarness};

async fn pending_product_id(ctx: &TestHarness) -> String {
    let response = ctx
        .post(
            "/products",
            &ctx.contributor_token(),
            json!({"name": "Cream Ale", "brand": "Castle Danger"}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["submissionId"]
        .as_str()
        .unwrap()
        .to_string()
}

// ============================================================================
// Intake: any signed-in contributor
// ============================================================================

#[tokio::test]
async fn intake_without_token_is_unauthenticated() {
    let ctx = TestHarness::new();

    let response = ctx
        .send(
            "POST",
            "/products",
            None,
            Some(json!({"name": "Pilsner", "brand": "Bent Paddle"})),
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["code"], "authentication_required");
    assert!(ctx.store.all().is_empty());
}

#[tokio::test]
async fn intake_with_garbage_token_is_unauthenticated() {
    let ctx = TestHarness::new();

    let response = ctx
        .post(
            "/stores",
            "not.a.jwt",
            json!({"name": "Superior Spirits", "address": "12 Tower Ave", "city": "Superior"}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn intake_accepts_plain_contributors() {
    let ctx = TestHarness::new();

    let response = ctx
        .post(
            "/products",
            &ctx.contributor_token(),
            json!({"name": "Pilsner", "brand": "Bent Paddle"}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

// ============================================================================
// Single decisions: admin only
// ============================================================================

#[tokio::test]
async fn approve_as_admin_succeeds() {
    let ctx = TestHarness::new();
    let id = pending_product_id(&ctx).await;

    let response = ctx
        .post_empty(&format!("/products/{}/approve", id), &ctx.admin_token())
        .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn approve_as_non_admin_fails() {
    let ctx = TestHarness::new();
    let id = pending_product_id(&ctx).await;

    let response = ctx
        .post_empty(
            &format!("/products/{}/approve", id),
            &ctx.contributor_token(),
        )
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = body_json(response).await;
    assert_eq!(body["code"], "admin_required");

    // The submission is untouched
    assert_eq!(ctx.store.all()[0].status.as_str(), "pending");
}

#[tokio::test]
async fn approve_unauthenticated_fails() {
    let ctx = TestHarness::new();
    let id = pending_product_id(&ctx).await;

    let response = ctx
        .send("POST", &format!("/products/{}/approve", id), None, None)
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn reject_as_non_admin_fails() {
    let ctx = TestHarness::new();
    let id = pending_product_id(&ctx).await;

    let response = ctx
        .post_empty(&format!("/products/{}/reject", id), &ctx.trusted_token())
        .await;
    // Trust raises intake, not review powers
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ============================================================================
// Bulk review: admin only
// ============================================================================

#[tokio::test]
async fn bulk_moderate_as_admin_succeeds() {
    let ctx = TestHarness::new();

    let response = ctx
        .put(
            "/pending-reports/bulk-moderate",
            &ctx.admin_token(),
            json!({"reportIds": [], "status": "confirmed"}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn bulk_moderate_as_non_admin_fails() {
    let ctx = TestHarness::new();

    let response = ctx
        .put(
            "/pending-reports/bulk-moderate",
            &ctx.contributor_token(),
            json!({"reportIds": [], "status": "confirmed"}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn bulk_moderate_unauthenticated_fails() {
    let ctx = TestHarness::new();

    let response = ctx
        .send(
            "PUT",
            "/pending-reports/bulk-moderate",
            None,
            Some(json!({"reportIds": [], "status": "confirmed"})),
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn bulk_content_review_as_non_admin_fails() {
    let ctx = TestHarness::new();

    let response = ctx
        .put(
            "/city-content-edits/bulk-review",
            &ctx.contributor_token(),
            json!({"editIds": [], "action": "approve"}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ============================================================================
// Queues and submission lookups: admin only
// ============================================================================

#[tokio::test]
async fn queues_as_admin_succeed() {
    let ctx = TestHarness::new();

    for path in [
        "/products/pending",
        "/products/trusted-pending",
        "/stores/pending",
        "/reports/pending",
        "/city-content-edits/pending",
        "/brand-content-edits/trusted-pending",
    ] {
        let response = ctx.get(path, Some(&ctx.admin_token())).await;
        assert_eq!(response.status(), StatusCode::OK, "queue {path}");
    }
}

#[tokio::test]
async fn queues_as_non_admin_fail() {
    let ctx = TestHarness::new();

    for path in ["/products/pending", "/reports/trusted-pending"] {
        let response = ctx.get(path, Some(&ctx.contributor_token())).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN, "queue {path}");
    }
}

#[tokio::test]
async fn queues_unauthenticated_fail() {
    let ctx = TestHarness::new();

    let response = ctx.get("/stores/pending", None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn submission_lookup_as_non_admin_fails() {
    let ctx = TestHarness::new();
    let id = pending_product_id(&ctx).await;

    let detail = ctx
        .get(&format!("/submissions/{}", id), Some(&ctx.contributor_token()))
        .await;
    assert_eq!(detail.status(), StatusCode::FORBIDDEN);

    let audit = ctx
        .get(
            &format!("/submissions/{}/audit", id),
            Some(&ctx.contributor_token()),
        )
        .await;
    assert_eq!(audit.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn submission_lookup_as_admin_succeeds() {
    let ctx = TestHarness::new();
    let id = pending_product_id(&ctx).await;

    let response = ctx
        .get(&format!("/submissions/{}", id), Some(&ctx.admin_token()))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["id"], id.as_str());
}
