//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    middleware,
    routing::get,
    Router,
};
use sqlx::PgPool;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::common::HasAuthContext;
use crate::config::Config;
use crate::domains::auth::JwtService;
use crate::domains::catalog::PgCatalog;
use crate::domains::contributors::{PgTrustEvaluator, StaticTrustEvaluator, TrustEvaluator};
use crate::domains::moderation::{ModerationService, PgSubmissionStore};
use crate::server::middleware::jwt_auth_middleware;
use crate::server::routes;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Present when the service runs over Postgres; the health endpoint
    /// reports on it. Test assemblies over in-memory stores leave it out.
    pub db_pool: Option<PgPool>,
    pub moderation: Arc<ModerationService>,
    pub jwt_service: Arc<JwtService>,
    pub admin_identifiers: Vec<String>,
}

impl HasAuthContext for AppState {
    fn admin_identifiers(&self) -> &[String] {
        &self.admin_identifiers
    }
}

/// Build the application over Postgres-backed stores
pub fn build_app(pool: PgPool, config: &Config) -> Router {
    let jwt_service = Arc::new(JwtService::new(&config.jwt_secret, config.jwt_issuer.clone()));

    let store = Arc::new(PgSubmissionStore::new(pool.clone()));
    let catalog = Arc::new(PgCatalog::new(pool.clone()));

    // A non-empty TRUSTED_CONTRIBUTORS list overrides the contributors
    // table (bootstrap and development); deployments leave it empty and
    // manage trust through the table.
    let trust: Arc<dyn TrustEvaluator> = if config.trusted_contributors.is_empty() {
        Arc::new(PgTrustEvaluator::new(pool.clone()))
    } else {
        Arc::new(StaticTrustEvaluator::from_identifiers(
            &config.trusted_contributors,
        ))
    };

    let moderation = Arc::new(ModerationService::new(store, catalog, trust));

    let state = AppState {
        db_pool: Some(pool),
        moderation,
        jwt_service,
        admin_identifiers: config.admin_identifiers.clone(),
    };

    build_router(state, &config.allowed_origins)
}

/// Build the Axum router from prepared state
///
/// Split out from [`build_app`] so tests can stand up the same HTTP
/// surface over in-memory stores.
pub fn build_router(state: AppState, allowed_origins: &[String]) -> Router {
    let cors = cors_layer(allowed_origins);

    // Clone jwt_service for middleware closure
    let jwt_service_for_middleware = state.jwt_service.clone();

    Router::new()
        .merge(routes::products::router())
        .merge(routes::stores::router())
        .merge(routes::reports::router())
        .merge(routes::content_edits::router())
        .merge(routes::submissions::router())
        .route("/health", get(routes::health_handler))
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(middleware::from_fn(move |req, next| {
            jwt_auth_middleware(jwt_service_for_middleware.clone(), req, next)
        })) // JWT authentication
        .layer(Extension(state)) // Add shared state (must be after middlewares that need it)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// CORS configuration
///
/// An empty origin list allows any origin (development); deployments set
/// ALLOWED_ORIGINS to the exact front-end origins.
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE]);

    if allowed_origins.is_empty() {
        cors.allow_origin(tower_http::cors::Any)
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        cors.allow_origin(tower_http::cors::AllowOrigin::list(origins))
    }
}
