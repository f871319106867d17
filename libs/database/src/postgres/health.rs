use std::time::Instant;

use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseConnection, Statement};
use tracing::{debug, warn};

use crate::error::DatabaseError;

/// Round-trips `SELECT 1` through the pool.
pub async fn check_health(db: &DatabaseConnection) -> Result<(), DatabaseError> {
    let ping = Statement::from_string(DatabaseBackend::Postgres, "SELECT 1");
    db.query_one_raw(ping)
        .await
        .map_err(|e| DatabaseError::HealthCheckFailed(e.to_string()))?;
    debug!("PostgreSQL health check succeeded");
    Ok(())
}

/// Outcome of a timed health check, reported by `/health`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthStatus {
    pub healthy: bool,
    pub message: Option<String>,
    pub response_time_ms: u64,
}

impl HealthStatus {
    pub fn healthy(response_time_ms: u64) -> Self {
        Self {
            healthy: true,
            message: None,
            response_time_ms,
        }
    }

    pub fn unhealthy(message: impl Into<String>, response_time_ms: u64) -> Self {
        Self {
            healthy: false,
            message: Some(message.into()),
            response_time_ms,
        }
    }
}

/// Like [`check_health`] but never fails; latency is measured either way.
pub async fn check_health_detailed(db: &DatabaseConnection) -> HealthStatus {
    let started = Instant::now();
    let outcome = check_health(db).await;
    let elapsed = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

    match outcome {
        Ok(()) => HealthStatus::healthy(elapsed),
        Err(err) => {
            warn!(error = %err, "database reported unhealthy");
            HealthStatus::unhealthy(err.to_string(), elapsed)
        }
    }
}
