use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use std::time::Instant;

use crate::controller::AppState;
use crate::optimizer::NormalizedPlant;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: String,
    timestamp: chrono::DateTime<chrono::Utc>,
    strategy: &'static str,
    checks: HealthChecks,
}

#[derive(Debug, Serialize)]
pub struct HealthChecks {
    dispatcher: ComponentHealth,
}

/// Health status of a component
#[derive(Debug, Serialize)]
pub struct ComponentHealth {
    status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    latency_us: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl ComponentHealth {
    fn healthy(latency_us: u64) -> Self {
        Self {
            status: "healthy".to_string(),
            latency_us: Some(latency_us),
            error: None,
        }
    }

    fn unhealthy(error: String) -> Self {
        Self {
            status: "unhealthy".to_string(),
            latency_us: None,
            error: Some(error),
        }
    }

    fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

/// GET /health - Health check endpoint
///
/// Runs the configured strategy on a one-plant problem
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let dispatcher = check_dispatcher(&state);
    let healthy = dispatcher.is_healthy();

    let response = HealthResponse {
        status: if healthy { "healthy" } else { "degraded" }.to_string(),
        timestamp: chrono::Utc::now(),
        strategy: state.controller.strategy_name(),
        checks: HealthChecks { dispatcher },
    };

    let status_code = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(response))
}

fn check_dispatcher(state: &AppState) -> ComponentHealth {
    let start = Instant::now();
    let probe = [NormalizedPlant::new(1.0, 1.0, 0.0, 10.0)];

    match state.controller.dispatch_probe(&probe, 5.0) {
        Ok(true) => ComponentHealth::healthy(start.elapsed().as_micros() as u64),
        Ok(false) => ComponentHealth::unhealthy("probe load not reached".to_string()),
        Err(e) => ComponentHealth::unhealthy(e.to_string()),
    }
}

/// GET /health/ready - Readiness probe
pub async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    if check_dispatcher(&state).is_healthy() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

/// GET /health/live - Liveness probe
pub async fn liveness_check() -> impl IntoResponse {
    StatusCode::OK
}
