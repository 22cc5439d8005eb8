//! Test harness that stands up the full HTTP surface over in-memory stores.
//!
//! Tests drive the real router (JWT middleware, authorization checks,
//! route handlers) with `tower::ServiceExt::oneshot`; only the storage
//! behind the moderation service is swapped for memory implementations,
//! so catalog effects can be asserted directly.

use std::sync::Arc;

use axum::body::Body;
use axum::http::Request;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use server_core::common::{ContributorId, ProductId, StoreId};
use server_core::domains::auth::JwtService;
use server_core::domains::catalog::{
    BrandRecord, CityRecord, MemoryCatalog, ProductRecord, RetailerRecord, StoreRecord,
};
use server_core::domains::contributors::StaticTrustEvaluator;
use server_core::domains::moderation::{MemorySubmissionStore, ModerationService};
use server_core::server::app::{build_router, AppState};

/// A fully wired application plus handles on its in-memory backing stores.
///
/// Three identities are minted per harness: an admin reviewer, an
/// untrusted contributor, and a trusted contributor.
pub struct TestHarness {
    pub router: Router,
    pub catalog: Arc<MemoryCatalog>,
    pub store: Arc<MemorySubmissionStore>,
    pub service: Arc<ModerationService>,
    pub jwt: Arc<JwtService>,
    pub admin_id: ContributorId,
    pub contributor_id: ContributorId,
    pub trusted_id: ContributorId,
}

impl TestHarness {
    pub fn new() -> Self {
        let admin_id = ContributorId::new();
        let contributor_id = ContributorId::new();
        let trusted_id = ContributorId::new();

        let catalog = Arc::new(MemoryCatalog::new());
        let store = Arc::new(MemorySubmissionStore::new());
        let trust = Arc::new(StaticTrustEvaluator::new([trusted_id]));
        let service = Arc::new(ModerationService::new(
            store.clone(),
            catalog.clone(),
            trust,
        ));

        let jwt = Arc::new(JwtService::new("test_secret", "test_issuer".to_string()));

        let state = AppState {
            db_pool: None,
            moderation: service.clone(),
            jwt_service: jwt.clone(),
            admin_identifiers: vec![admin_id.to_string()],
        };
        let router = build_router(state, &[]);

        Self {
            router,
            catalog,
            store,
            service,
            jwt,
            admin_id,
            contributor_id,
            trusted_id,
        }
    }

    // ========================================================================
    // Tokens
    // ========================================================================

    pub fn admin_token(&self) -> String {
        self.jwt
            .create_token(self.admin_id, "Queue Admin".to_string(), true)
            .unwrap()
    }

    pub fn contributor_token(&self) -> String {
        self.jwt
            .create_token(self.contributor_id, "Plain Contributor".to_string(), false)
            .unwrap()
    }

    pub fn trusted_token(&self) -> String {
        self.jwt
            .create_token(self.trusted_id, "Trusted Regular".to_string(), false)
            .unwrap()
    }

    // ========================================================================
    // Requests
    // ========================================================================

    pub async fn send(
        &self,
        method: &str,
        path: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> axum::response::Response {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {}", token));
        }
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn post(&self, path: &str, token: &str, body: Value) -> axum::response::Response {
        self.send("POST", path, Some(token), Some(body)).await
    }

    pub async fn post_empty(&self, path: &str, token: &str) -> axum::response::Response {
        self.send("POST", path, Some(token), None).await
    }

    pub async fn put(&self, path: &str, token: &str, body: Value) -> axum::response::Response {
        self.send("PUT", path, Some(token), Some(body)).await
    }

    pub async fn get(&self, path: &str, token: Option<&str>) -> axum::response::Response {
        self.send("GET", path, token, None).await
    }

    // ========================================================================
    // Catalog seeds
    // ========================================================================

    pub fn seed_product(&self, name: &str) -> ProductId {
        let product = ProductRecord::new(
            name.to_string(),
            "North Shore".to_string(),
            Some("lager".to_string()),
            None,
        );
        let id = product.id;
        self.catalog.seed_product(product);
        id
    }

    pub fn seed_store(&self, name: &str) -> StoreId {
        let store = StoreRecord::new(
            name.to_string(),
            "101 Superior St".to_string(),
            "Duluth".to_string(),
            Some("MN".to_string()),
            None,
        );
        let id = store.id;
        self.catalog.seed_store(store);
        id
    }

    pub fn seed_city(&self, name: &str, headline: &str) -> Uuid {
        let mut city = CityRecord::new(name.to_string(), "MN".to_string());
        city.headline = headline.to_string();
        let id = city.id.into_uuid();
        self.catalog.seed_city(city);
        id
    }

    pub fn seed_retailer(&self, name: &str, website: &str) -> Uuid {
        let mut retailer = RetailerRecord::new(name.to_string());
        retailer.website = website.to_string();
        let id = retailer.id.into_uuid();
        self.catalog.seed_retailer(retailer);
        id
    }

    pub fn seed_brand(&self, name: &str, tagline: &str) -> Uuid {
        let mut brand = BrandRecord::new(name.to_string());
        brand.tagline = tagline.to_string();
        let id = brand.id.into_uuid();
        self.catalog.seed_brand(brand);
        id
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// Decode a response body as JSON, falling back to the raw text.
pub async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).to_string()))
}
