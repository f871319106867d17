//! Health check backed by a real database round trip.

use axum::{Json, extract::State, http::StatusCode};
use database::postgres::check_health_detailed;
use sea_orm::DatabaseConnection;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub database: DatabaseHealth,
}

#[derive(Debug, Serialize)]
pub struct DatabaseHealth {
    pub healthy: bool,
    pub response_time_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// 200 when PostgreSQL answers `SELECT 1`, 503 otherwise.
pub async fn health_handler(
    State(db): State<DatabaseConnection>,
) -> (StatusCode, Json<HealthResponse>) {
    let db_status = check_health_detailed(&db).await;

    let (status_code, status) = if db_status.healthy {
        (StatusCode::OK, "healthy")
    } else {
        tracing::warn!(message = ?db_status.message, "Health check failed");
        (StatusCode::SERVICE_UNAVAILABLE, "unhealthy")
    };

    (
        status_code,
        Json(HealthResponse {
            status,
            version: env!("CARGO_PKG_VERSION"),
            database: DatabaseHealth {
                healthy: db_status.healthy,
                response_time_ms: db_status.response_time_ms,
                message: db_status.message,
            },
        }),
    )
}
