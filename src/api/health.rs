//! Health check endpoints

use std::time::Instant;

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::api::types::{Json, MessageResponse};

use super::state::AppState;

/// Public message for a failed storage check; the cause is only logged
const DATABASE_UNREACHABLE: &str = "Database unreachable";

/// Health response with dependency status
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: String,
    /// Seconds since the process started serving
    pub uptime: f64,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Overall health status
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum HealthStatus {
    Up,
    Down,
}

/// Individual dependency checks
#[derive(Debug, Serialize)]
pub struct HealthChecks {
    pub database: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_latency_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// GET /health - verifies storage is reachable
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let start = Instant::now();
    let result = state.user_service.health_check().await;
    let latency = start.elapsed().as_millis() as u64;

    let (status, checks) = match result {
        Ok(()) => (
            HealthStatus::Up,
            HealthChecks {
                database: true,
                database_latency_ms: Some(latency),
                message: None,
            },
        ),
        Err(e) => {
            tracing::warn!(error = %e, "Health check failed");
            (
                HealthStatus::Down,
                HealthChecks {
                    database: false,
                    database_latency_ms: Some(latency),
                    message: Some(DATABASE_UNREACHABLE.to_string()),
                },
            )
        }
    };

    let response = HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime: state.started_at.elapsed().as_secs_f64(),
        timestamp: Utc::now(),
        checks,
    };

    let status_code = match status {
        HealthStatus::Up => StatusCode::OK,
        HealthStatus::Down => StatusCode::SERVICE_UNAVAILABLE,
    };

    (status_code, Json(response))
}

/// Liveness check - simple check to verify the process is running
pub async fn live_check() -> impl IntoResponse {
    StatusCode::OK
}

/// GET / - service banner
pub async fn index() -> Json<MessageResponse> {
    Json(MessageResponse::new("User service"))
}
