use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::Serialize;

use crate::{
    api::error::ApiError,
    controller::{AppState, ProductionPlan},
    domain::ProductionPlanRequest,
};

/// Delivered load of one plant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlantOutput {
    pub name: String,
    pub p: f64,
}

/// Best-effort plan returned when the load cannot be matched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InfeasiblePlan {
    pub message: String,
    pub requested_load: f64,
    pub achieved_load: f64,
    pub shortfall: f64,
    pub total_cost: f64,
    pub plan: Vec<PlantOutput>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ProductionPlanResponse {
    Planned(Vec<PlantOutput>),
    Infeasible(InfeasiblePlan),
}

impl From<&ProductionPlan> for ProductionPlanResponse {
    fn from(result: &ProductionPlan) -> Self {
        let outputs: Vec<PlantOutput> = result
            .effective_outputs()
            .into_iter()
            .map(|(name, p)| PlantOutput {
                name: name.to_string(),
                p,
            })
            .collect();

        let plan = &result.plan;
        if plan.reached {
            return Self::Planned(outputs);
        }

        Self::Infeasible(InfeasiblePlan {
            message: format!(
                "Infeasible problem: can not achieve {:.2}. Actual load generated: {:.2}",
                plan.target_load, plan.achieved_load
            ),
            requested_load: plan.target_load,
            achieved_load: plan.achieved_load,
            shortfall: plan.shortfall(),
            total_cost: result.summary.total_cost,
            plan: outputs,
        })
    }
}

/// Per-plant line of a plan summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlantCost {
    pub name: String,
    /// Generated output before efficiency losses.
    pub output: f64,
    /// Delivered load.
    pub p: f64,
    /// Euro.
    pub cost: f64,
}

/// Plan with its cost breakdown, plants in merit order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanSummaryResponse {
    pub reached: bool,
    pub requested_load: f64,
    pub total_load: f64,
    pub total_cost: f64,
    pub load_difference: f64,
    pub plants: Vec<PlantCost>,
}

impl From<&ProductionPlan> for PlanSummaryResponse {
    fn from(result: &ProductionPlan) -> Self {
        let summary = &result.summary;
        let plants = summary
            .contributions
            .iter()
            .map(|c| PlantCost {
                name: result.names[c.index].clone(),
                output: c.output,
                p: c.effective_output,
                cost: c.cost,
            })
            .collect();

        Self {
            reached: result.plan.reached,
            requested_load: result.plan.target_load,
            total_load: summary.total_load,
            total_cost: summary.total_cost,
            load_difference: summary.load_difference,
            plants,
        }
    }
}

fn compute_plan(
    state: &AppState,
    payload: Result<Json<ProductionPlanRequest>, JsonRejection>,
) -> Result<ProductionPlan, ApiError> {
    let Json(request) = payload?;
    tracing::debug!(
        load = request.load,
        plants = request.powerplants.len(),
        "production plan requested"
    );

    Ok(state.controller.plan(&request)?)
}

/// POST /productionplan - Compute a production plan for the requested load
pub async fn production_plan(
    State(state): State<AppState>,
    payload: Result<Json<ProductionPlanRequest>, JsonRejection>,
) -> Result<Json<ProductionPlanResponse>, ApiError> {
    let result = compute_plan(&state, payload)?;
    Ok(Json(ProductionPlanResponse::from(&result)))
}

/// POST /productionplan/summary - Same plan with per-plant cost and totals
pub async fn production_plan_summary(
    State(state): State<AppState>,
    payload: Result<Json<ProductionPlanRequest>, JsonRejection>,
) -> Result<Json<PlanSummaryResponse>, ApiError> {
    let result = compute_plan(&state, payload)?;
    Ok(Json(PlanSummaryResponse::from(&result)))
}
