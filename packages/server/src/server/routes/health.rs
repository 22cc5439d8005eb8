use axum::{extract::Extension, http::StatusCode, Json};
use serde::Serialize;

use crate::server::app::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    database: DatabaseHealth,
    #[serde(skip_serializing_if = "Option::is_none")]
    connection_pool: Option<ConnectionPoolHealth>,
}

#[derive(Serialize)]
pub struct DatabaseHealth {
    status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Serialize)]
pub struct ConnectionPoolHealth {
    size: u32,
    idle_connections: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_connections: Option<u32>,
}

/// Health check endpoint
///
/// Checks database connectivity and connection pool utilization. A state
/// assembled over in-memory stores has no pool; the database section then
/// reports "disabled" and counts as healthy.
///
/// Returns 200 OK if all systems are healthy, 503 Service Unavailable otherwise.
pub async fn health_handler(
    Extension(state): Extension<AppState>,
) -> (StatusCode, Json<HealthResponse>) {
    let (db_health, pool_health) = match &state.db_pool {
        Some(pool) => {
            // Check database connection and measure latency
            let db_health = match tokio::time::timeout(
                std::time::Duration::from_secs(5),
                sqlx::query("SELECT 1").execute(pool),
            )
            .await
            {
                Ok(Ok(_)) => DatabaseHealth {
                    status: "ok".to_string(),
                    error: None,
                },
                Ok(Err(e)) => DatabaseHealth {
                    status: "error".to_string(),
                    error: Some(format!("Query failed: {}", e)),
                },
                Err(_) => DatabaseHealth {
                    status: "error".to_string(),
                    error: Some("Query timeout (>5s)".to_string()),
                },
            };

            // Get connection pool metrics
            let pool_options = pool.options();
            let pool_health = ConnectionPoolHealth {
                size: pool.size(),
                idle_connections: pool.num_idle(),
                max_connections: Some(pool_options.get_max_connections()),
            };

            (db_health, Some(pool_health))
        }
        None => (
            DatabaseHealth {
                status: "disabled".to_string(),
                error: None,
            },
            None,
        ),
    };

    // Determine overall health
    let is_healthy = db_health.status != "error";

    let overall_status = if is_healthy { "healthy" } else { "unhealthy" };

    let status_code = if is_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status_code,
        Json(HealthResponse {
            status: overall_status.to_string(),
            database: db_health,
            connection_pool: pool_health,
        }),
    )
}
