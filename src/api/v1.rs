use axum::{
    routing::{get, post},
    Router,
};

use crate::{
    api::{health, production_plan},
    controller::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/productionplan", post(production_plan::production_plan))
        .route(
            "/productionplan/summary",
            post(production_plan::production_plan_summary),
        )
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/health/live", get(health::liveness_check))
}
